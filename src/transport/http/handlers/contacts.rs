use crate::domain::contact::{Contact, ContactInput};
use crate::domain::error::ServiceError;
use crate::transport::http::types::{
    json_422, AppState, CreateContactRequest, MessageResponse, SearchQuery, UpdateContactRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = MessageResponse),
        (status = 400, description = "Duplicate phone numbers", body = MessageResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn create_contact_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateContactRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"name\": \"...\", \"phoneNumbers\": [...], \"image\": \"...\"}")
                .into_response();
        }
    };

    let input = ContactInput {
        name: request.name,
        image: request.image,
        phone_numbers: request.phone_numbers,
    };

    match state.contacts.create(&input).await {
        Ok(_id) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Contact created successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e @ ServiceError::DuplicatePhoneNumbers(_)) => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse {
                message: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to create contact: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error creating contact".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    params(
        ("id" = i64, Path, description = "Contact id")
    ),
    responses(
        (status = 200, description = "Contact deleted (no-op for an unknown id)", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn delete_contact_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.contacts.remove(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Contact deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to delete contact {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error deleting contact".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/contacts",
    responses(
        (status = 200, description = "All contacts with aggregated phone numbers", body = Vec<Contact>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn list_contacts_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.contacts.list(None).await {
        Ok(contacts) => (StatusCode::OK, Json(contacts)).into_response(),
        Err(e) => {
            tracing::error!("failed to fetch contacts: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error fetching contacts".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/contacts/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Contacts matching the substring", body = Vec<Contact>),
        (status = 400, description = "Missing query parameter"),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn search_contacts_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    match state.contacts.list(Some(&params.query)).await {
        Ok(contacts) => (StatusCode::OK, Json(contacts)).into_response(),
        Err(e) => {
            tracing::error!("failed to search contacts: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error searching contacts".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/contacts/{id}",
    params(
        ("id" = i64, Path, description = "Contact id")
    ),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Contact updated, phone numbers replaced", body = MessageResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn update_contact_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Result<Json<UpdateContactRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"name\": \"...\", \"phoneNumbers\": [...], \"image\": \"...\"}")
                .into_response();
        }
    };

    let input = ContactInput {
        name: request.name,
        image: request.image,
        phone_numbers: request.phone_numbers,
    };

    match state.contacts.update(id, &input).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Contact updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to update contact {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error updating contact".to_string(),
                }),
            )
                .into_response()
        }
    }
}
