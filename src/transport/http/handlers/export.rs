use crate::transport::http::types::{AppState, MessageResponse};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/contacts/export",
    responses(
        (status = 200, description = "CSV attachment with the full contact set", body = String, content_type = "text/csv"),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn export_contacts_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.contacts.export_csv().await {
        Ok(csv_bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"contacts.csv\"",
                ),
            ],
            csv_bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to export contacts: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error exporting contacts to CSV".to_string(),
                }),
            )
                .into_response()
        }
    }
}
