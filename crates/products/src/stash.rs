use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stash_core::{DomainError, DomainResult, ProductId, StashId};

use crate::ProductRecord;

/// The per-installation container of tracked products, as persisted.
///
/// Owns its product records in insertion order. Product ids are unique within a
/// stash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stash {
    id: StashId,
    created_at: DateTime<Utc>,
    #[serde(default)]
    products: Vec<ProductRecord>,
}

impl Stash {
    pub fn new(id: StashId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            products: Vec::new(),
        }
    }

    pub fn id_typed(&self) -> StashId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Append a record at the end.
    pub fn push(&mut self, record: ProductRecord) -> DomainResult<()> {
        if self.contains(record.id) {
            return Err(DomainError::validation(format!(
                "product {} already in stash",
                record.id
            )));
        }
        self.products.push(record);
        Ok(())
    }

    /// Replace the record with the same id, keeping its position.
    pub fn replace(&mut self, record: ProductRecord) -> DomainResult<()> {
        let index = self
            .position(record.id)
            .ok_or_else(|| DomainError::not_found(format!("product {}", record.id)))?;
        self.products[index] = record;
        Ok(())
    }

    pub fn remove(&mut self, id: ProductId) -> DomainResult<ProductRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))?;
        Ok(self.products.remove(index))
    }
}
