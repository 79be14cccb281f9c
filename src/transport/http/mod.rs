pub mod router;
pub mod types;
pub mod handlers {
    pub mod contacts;
    pub mod export;
    pub mod health;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
