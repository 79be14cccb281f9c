use crate::domain::contact::Contact;
use crate::transport::http::handlers::{contacts, export, health};
use crate::transport::http::types::{
    AppState, CreateContactRequest, MessageResponse, UpdateContactRequest,
};
use axum::routing::{get, post, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        contacts::create_contact_handler,
        contacts::list_contacts_handler,
        contacts::search_contacts_handler,
        contacts::update_contact_handler,
        contacts::delete_contact_handler,
        export::export_contacts_handler
    ),
    components(schemas(
        Contact,
        CreateContactRequest,
        UpdateContactRequest,
        MessageResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/contacts",
            post(contacts::create_contact_handler).get(contacts::list_contacts_handler),
        )
        .route("/contacts/search", get(contacts::search_contacts_handler))
        .route("/contacts/export", get(export::export_contacts_handler))
        .route(
            "/contacts/:id",
            put(contacts::update_contact_handler).delete(contacts::delete_contact_handler),
        )
        .with_state(app_state)
}
