use crate::app::contact_service::ContactService;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactService>,
}

/// Body shared by every `{message}` response, success and failure alike.
#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: String,
    #[schema(example = json!(["555-0100", "555-0101"]))]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub name: String,
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against names and phone numbers.
    pub query: String,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(MessageResponse {
            message: format!("Invalid JSON body: {} (expected: {})", err, expected),
        }),
    )
}
