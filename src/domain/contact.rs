use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A contact as presented to clients.
///
/// `phone_numbers` arrives pre-aggregated from the store as a single
/// comma-joined string (empty when the contact has none; order not
/// guaranteed). Callers needing structured access split it themselves.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Path or URL reference to the contact's image, if any.
    pub image: Option<String>,
    #[schema(example = "555-0100,555-0101")]
    pub phone_numbers: String,
}

/// Write payload for create and update: the full desired state of one
/// contact. On update the phone-number set is replaced wholesale, never
/// merged.
#[derive(Debug, Clone)]
pub struct ContactInput {
    pub name: String,
    pub image: Option<String>,
    pub phone_numbers: Vec<String>,
}
