use super::handlers;
use super::state::AppState;
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let graphql: MethodRouter<AppState> = if state.playground {
        post(handlers::graphql_handler).get(handlers::graphql_playground)
    } else {
        post(handlers::graphql_handler)
    };

    Router::new()
        .route("/graphql", graphql.clone())
        .route("/graphql/", graphql)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
