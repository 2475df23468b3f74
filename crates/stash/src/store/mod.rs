//! Persistence collaborator for the stash.
//!
//! The store owns durability. [`ProductStash`](crate::ProductStash) writes through
//! it on every mutation and treats a successful return as the commit point.

mod in_memory;

pub use in_memory::InMemoryStashStore;

use std::sync::Arc;

use thiserror::Error;

use stash_core::{DomainError, ProductId, StashId};
use stash_events::{StoreChange, Subscription};
use stash_products::ProductRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => DomainError::not_found(what),
            other => DomainError::persistence(other.to_string()),
        }
    }
}

/// Transactional storage for the stash and its products.
///
/// Every write either commits fully or fails without effect. After a commit the
/// store publishes a [`StoreChange`] to all change subscribers.
pub trait StashStore: Send + Sync {
    /// Id of the first stash in the store, creating one if there is none.
    fn load_or_create_stash(&self) -> Result<StashId, StoreError>;

    /// All product records of a stash, in insertion order.
    fn list_products(&self, stash_id: StashId) -> Result<Vec<ProductRecord>, StoreError>;

    /// Append a record to the end of the stash.
    fn insert_product(&self, stash_id: StashId, record: ProductRecord) -> Result<(), StoreError>;

    /// Replace the record with the same id in place.
    fn update_product(&self, stash_id: StashId, record: ProductRecord) -> Result<(), StoreError>;

    fn delete_product(&self, stash_id: StashId, product_id: ProductId) -> Result<(), StoreError>;

    /// Subscribe to changes committed after this call, from any writer.
    fn subscribe_changes(&self) -> Subscription<StoreChange>;
}

impl<S> StashStore for Arc<S>
where
    S: StashStore + ?Sized,
{
    fn load_or_create_stash(&self) -> Result<StashId, StoreError> {
        (**self).load_or_create_stash()
    }

    fn list_products(&self, stash_id: StashId) -> Result<Vec<ProductRecord>, StoreError> {
        (**self).list_products(stash_id)
    }

    fn insert_product(&self, stash_id: StashId, record: ProductRecord) -> Result<(), StoreError> {
        (**self).insert_product(stash_id, record)
    }

    fn update_product(&self, stash_id: StashId, record: ProductRecord) -> Result<(), StoreError> {
        (**self).update_product(stash_id, record)
    }

    fn delete_product(&self, stash_id: StashId, product_id: ProductId) -> Result<(), StoreError> {
        (**self).delete_product(stash_id, product_id)
    }

    fn subscribe_changes(&self) -> Subscription<StoreChange> {
        (**self).subscribe_changes()
    }
}
