/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod gmp;
pub mod session;
