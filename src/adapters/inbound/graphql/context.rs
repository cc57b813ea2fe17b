use crate::adapters::inbound::http::CookieSettings;
use crate::entity_mediation::domain::Session;
use crate::ports::outbound::{GmpClient, GmpConnector, SessionStore};
use crate::shared::error::HyperionError;
use crate::shared::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Per-request data handed to every resolver.
///
/// The GMP connection is opened and authenticated by the first resolver
/// that needs it and closed when the request finishes and this value is
/// dropped.
pub struct RequestContext {
    session: Option<Session>,
    cookie_session_id: Option<String>,
    sessions: Arc<dyn SessionStore>,
    connector: Arc<dyn GmpConnector>,
    cookies: CookieSettings,
    gmp: OnceCell<Box<dyn GmpClient>>,
}

impl RequestContext {
    pub fn new(
        session: Option<Session>,
        cookie_session_id: Option<String>,
        sessions: Arc<dyn SessionStore>,
        connector: Arc<dyn GmpConnector>,
        cookies: CookieSettings,
    ) -> Self {
        Self {
            session,
            cookie_session_id,
            sessions,
            connector,
            cookies,
            gmp: OnceCell::new(),
        }
    }

    pub fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| HyperionError::NotAuthorized.into())
    }

    /// Session id sent by the browser, valid or not
    pub fn cookie_session_id(&self) -> Option<&str> {
        self.cookie_session_id.as_deref()
    }

    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    pub fn connector(&self) -> &dyn GmpConnector {
        self.connector.as_ref()
    }

    pub fn cookies(&self) -> &CookieSettings {
        &self.cookies
    }

    /// The request's authenticated GMP connection.
    pub async fn gmp(&self) -> Result<&dyn GmpClient> {
        let session = self.session()?;
        let client = self
            .gmp
            .get_or_try_init(|| async {
                let client = self.connector.connect().await?;
                client.authenticate(&session.credentials).await?;
                Ok::<_, anyhow::Error>(client)
            })
            .await?;
        Ok(client.as_ref())
    }
}
