// src/bin/api_server.rs

use contact_directory::infra::config;
use contact_directory::transport;
use contact_directory::{ContactService, ContactStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("connecting to Postgres and provisioning schema");
    let store =
        ContactStore::connect(&config::database_url(), config::db_max_connections()).await?;
    let service = Arc::new(ContactService::new(store));

    let app_state = transport::http::AppState {
        contacts: service.clone(),
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    service.store().pool().close().await;
    Ok(())
}
