use thiserror::Error;

/// Errors surfaced by the contact service.
///
/// Handlers map `DuplicatePhoneNumbers` to 400 and everything else to 500.
/// There is no retry layer and no transient/permanent distinction: a failed
/// statement is reported to the client immediately with a generic message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Duplicate phone numbers found: {}", .0.join(", "))]
    DuplicatePhoneNumbers(Vec<String>),

    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("csv encoding error: {0}")]
    Export(#[from] csv::Error),
}
