use crate::entity_mediation::domain::{Credentials, Session};
use crate::shared::Result;
use async_trait::async_trait;

/// SessionStore port for server-side login sessions
///
/// Implementations own the session lifetime: `load` and `renew` never
/// return an expired session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session with a fresh id expiring one cookie age from now.
    async fn create(&self, credentials: Credentials, timezone: Option<String>) -> Result<Session>;

    async fn load(&self, id: &str) -> Result<Option<Session>>;

    /// Pushes the expiry of a live session one cookie age into the future.
    async fn renew(&self, id: &str) -> Result<Option<Session>>;

    async fn remove(&self, id: &str) -> Result<()>;
}
