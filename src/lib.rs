//! hyperion - GraphQL API gateway for the Greenbone Management Protocol
//!
//! This library exposes gvmd's entities through a GraphQL endpoint. Every
//! HTTP request carrying a valid session cookie gets its own GMP connection,
//! authenticated with the credentials stored in the session.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`entity_mediation`): entity kinds, filter strings,
//!   Relay cursors and the XML mapping of GMP responses
//! - **Application Layer** (`application`): use cases for listing, bulk
//!   actions and sessions
//! - **Ports** (`ports`): interfaces to gvmd and the session store
//! - **Adapters** (`adapters`): GraphQL/HTTP inbound, GMP socket and session
//!   stores outbound
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use hyperion::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn serve() -> Result<()> {
//! let connector = SocketGmpConnector::new(
//!     GmpAddress::Unix("/run/gvmd/gvmd.sock".into()),
//!     Duration::from_secs(60),
//! );
//! let sessions = MemorySessionStore::new(chrono::Duration::seconds(900));
//! let cookies = CookieSettings {
//!     name: "hyperion_session".to_string(),
//!     max_age_secs: 900,
//! };
//!
//! let state = AppState::new(Arc::new(sessions), Arc::new(connector), cookies, false);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, create_router(state)).await?;
//! # Ok(())
//! # }
//! ```

#![recursion_limit = "256"]

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod entity_mediation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::graphql::{build_schema, HyperionSchema, RequestContext};
    pub use crate::adapters::inbound::http::{create_router, AppState, CookieSettings};
    pub use crate::adapters::outbound::gmp::{GmpAddress, SocketGmpConnector};
    pub use crate::adapters::outbound::session::{FileSessionStore, MemorySessionStore};
    pub use crate::application::dto::{BulkDeleteResponse, ListRequest, Selection};
    pub use crate::application::use_cases::{
        CloneEntityUseCase, DeleteEntitiesUseCase, ExportEntitiesUseCase, GetEntityUseCase,
        ListEntitiesUseCase, ManageSessionUseCase,
    };
    pub use crate::entity_mediation::domain::{
        Credentials, Entity, EntityKind, EntityPage, FilterString, GmpCommand, Session, SortOrder,
    };
    pub use crate::entity_mediation::services::PageArguments;
    pub use crate::ports::outbound::{GmpClient, GmpConnector, GmpResponse, SessionStore};
    pub use crate::shared::error::{ExitCode, HyperionError};
    pub use crate::shared::Result;
}
