//! Entity mediation: the domain core between GraphQL and gvmd.
//!
//! Holds the entity model, the filter-string and cursor vocabulary, the
//! rules for resolving id selections and the pagination window math. It
//! does no I/O; the ports and adapters supply the protocol connection.
pub mod domain;
pub mod policies;
pub mod services;
