use crate::entity_mediation::domain::{Credentials, Session};
use crate::ports::outbound::{GmpConnector, SessionStore};
use crate::shared::error::HyperionError;
use crate::shared::Result;

/// ManageSessionUseCase - login, logout and renewal
///
/// Login proves the credentials against gvmd on a throwaway connection
/// before anything is stored.
pub struct ManageSessionUseCase<'a, S: SessionStore + ?Sized, G: GmpConnector + ?Sized> {
    sessions: &'a S,
    connector: &'a G,
}

impl<'a, S: SessionStore + ?Sized, G: GmpConnector + ?Sized> ManageSessionUseCase<'a, S, G> {
    pub fn new(sessions: &'a S, connector: &'a G) -> Self {
        Self {
            sessions,
            connector,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let credentials = Credentials::new(username, password);
        let client = self.connector.connect().await?;

        let info = match client.authenticate(&credentials).await {
            Ok(info) => info,
            Err(e) => {
                if matches!(
                    e.downcast_ref::<HyperionError>(),
                    Some(HyperionError::AuthenticationFailed)
                ) {
                    tracing::warn!(username, "Rejected login");
                }
                return Err(e);
            }
        };

        let session = self.sessions.create(credentials, info.timezone).await?;
        tracing::info!(username, "User logged in");
        Ok(session)
    }

    pub async fn logout(&self, session_id: Option<&str>) -> Result<()> {
        if let Some(id) = session_id {
            self.sessions.remove(id).await?;
        }
        Ok(())
    }

    /// # Errors
    /// `HyperionError::NotAuthorized` when the session is gone or expired.
    pub async fn renew(&self, session_id: Option<&str>) -> Result<Session> {
        let Some(id) = session_id else {
            return Err(HyperionError::NotAuthorized.into());
        };
        self.sessions
            .renew(id)
            .await?
            .ok_or_else(|| HyperionError::NotAuthorized.into())
    }
}
