//! Orchestration over the contact store.
//!
//! The store exposes single-statement operations; this service strings them
//! together under explicit transactions and enforces the one business rule
//! the store does not: a phone number may belong to at most one contact.

use crate::app::export;
use crate::domain::contact::{Contact, ContactInput};
use crate::domain::error::ServiceError;
use crate::storage::contacts::ContactStore;

pub struct ContactService {
    store: ContactStore,
}

impl ContactService {
    pub fn new(store: ContactStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Creates a contact and its phone-number rows in one transaction.
    ///
    /// Any submitted number already stored on any contact fails the whole
    /// request with `DuplicatePhoneNumbers` naming the offenders; nothing is
    /// written in that case.
    pub async fn create(&self, input: &ContactInput) -> Result<i64, ServiceError> {
        let mut tx = self.store.pool().begin().await?;

        let duplicates = ContactStore::existing_numbers(&mut *tx, &input.phone_numbers).await?;
        if !duplicates.is_empty() {
            return Err(ServiceError::DuplicatePhoneNumbers(duplicates));
        }

        let id =
            ContactStore::insert_contact(&mut *tx, &input.name, input.image.as_deref()).await?;
        ContactStore::insert_phone_numbers(&mut *tx, id, &input.phone_numbers).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Phone numbers go first so a dangling parent is never observable
    /// mid-operation. Removing an unknown id is an idempotent no-op.
    pub async fn remove(&self, id: i64) -> Result<(), ServiceError> {
        let mut tx = self.store.pool().begin().await?;

        ContactStore::delete_phone_numbers(&mut *tx, id).await?;
        ContactStore::delete_contact(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Overwrites the contact fields and replaces the phone-number set
    /// wholesale (delete-then-reinsert) in one transaction.
    pub async fn update(&self, id: i64, input: &ContactInput) -> Result<(), ServiceError> {
        let mut tx = self.store.pool().begin().await?;

        ContactStore::update_contact(&mut *tx, id, &input.name, input.image.as_deref()).await?;
        ContactStore::delete_phone_numbers(&mut *tx, id).await?;
        ContactStore::insert_phone_numbers(&mut *tx, id, &input.phone_numbers).await?;

        tx.commit().await?;
        Ok(())
    }

    /// All contacts, or those whose name or any phone number contains
    /// `search_term` as a case-insensitive substring.
    pub async fn list(&self, search_term: Option<&str>) -> Result<Vec<Contact>, ServiceError> {
        Ok(self.store.list_contacts(search_term).await?)
    }

    /// Renders the current contact set as a CSV document, entirely in memory.
    pub async fn export_csv(&self) -> Result<Vec<u8>, ServiceError> {
        let contacts = self.store.list_contacts(None).await?;
        Ok(export::render_csv(&contacts)?)
    }
}
