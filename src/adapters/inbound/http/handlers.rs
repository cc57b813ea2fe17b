use super::session_gate::requires_session;
use super::state::AppState;
use crate::adapters::inbound::graphql::RequestContext;
use crate::entity_mediation::domain::Session;
use crate::shared::error::HyperionError;
use crate::shared::security::is_well_formed_session_id;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// POST /graphql - executes one GraphQL request behind the session gate.
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> Response {
    let request = request.into_inner();
    let cookie_session_id = state.cookies.session_id_from_headers(&headers);
    let session = load_session(&state, cookie_session_id.as_deref()).await;

    if session.is_none() && requires_session(&request.query, request.operation_name.as_deref()) {
        tracing::debug!("Rejected GraphQL request without a valid session");
        return not_authorized();
    }

    let context = RequestContext::new(
        session,
        cookie_session_id,
        state.sessions.clone(),
        state.connector.clone(),
        state.cookies.clone(),
    );
    GraphQLResponse::from(state.schema.execute(request.data(context)).await).into_response()
}

/// GET /graphql - GraphiQL playground
pub async fn graphql_playground() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql/")
            .title("Hyperion GraphQL Playground")
            .finish(),
    )
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn load_session(state: &AppState, session_id: Option<&str>) -> Option<Session> {
    let id = session_id.filter(|id| is_well_formed_session_id(id))?;
    match state.sessions.load(id).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to load session: {:#}", e);
            None
        }
    }
}

fn not_authorized() -> Response {
    let body = json!({ "errors": [{ "message": HyperionError::NotAuthorized.to_string() }] });
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
