/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define how the application core reaches gvmd and where it
/// keeps login sessions.
pub mod gmp_client;
pub mod gmp_connector;
pub mod session_store;

pub use gmp_client::{GmpClient, GmpResponse};
pub use gmp_connector::GmpConnector;
pub use session_store::SessionStore;
