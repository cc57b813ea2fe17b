/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the GraphQL layer calls use cases directly.
pub mod outbound;
