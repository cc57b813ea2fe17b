use super::cookie::CookieSettings;
use crate::adapters::inbound::graphql::{build_schema, HyperionSchema};
use crate::ports::outbound::{GmpConnector, SessionStore};
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub schema: HyperionSchema,
    pub sessions: Arc<dyn SessionStore>,
    pub connector: Arc<dyn GmpConnector>,
    pub cookies: CookieSettings,
    pub playground: bool,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        connector: Arc<dyn GmpConnector>,
        cookies: CookieSettings,
        playground: bool,
    ) -> Self {
        Self {
            schema: build_schema(),
            sessions,
            connector,
            cookies,
            playground,
        }
    }
}
