pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::contact_service::ContactService;
pub use domain::contact::{Contact, ContactInput};
pub use domain::error::ServiceError;
pub use storage::contacts::ContactStore;
