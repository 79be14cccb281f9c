use crate::transport::http::types::{AppState, MessageResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (DB reachable)", body = MessageResponse),
        (status = 503, description = "Service is unhealthy (DB unreachable)", body = MessageResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.contacts.store().pool();

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "ok".to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(MessageResponse {
                message: format!("DB ping failed: {}", e),
            }),
        )
            .into_response(),
    }
}
