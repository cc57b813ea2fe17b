//! HTTP surface: the GraphQL endpoint, its session gate and a health probe.

mod cookie;
mod handlers;
mod router;
mod session_gate;
mod state;

pub use cookie::CookieSettings;
pub use router::create_router;
pub use session_gate::requires_session;
pub use state::AppState;
