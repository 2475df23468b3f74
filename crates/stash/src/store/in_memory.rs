//! In-memory stash store for tests/dev.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{debug, warn};

use stash_core::{DomainError, ProductId, StashId};
use stash_events::{ChangeFeed, InMemoryChangeFeed, StoreChange, Subscription};
use stash_products::{ProductRecord, Stash};

use super::{StashStore, StoreError};

/// In-memory [`StashStore`].
///
/// Writes are atomic under a single lock. [`set_fail_writes`](Self::set_fail_writes)
/// and [`set_fail_reads`](Self::set_fail_reads) make subsequent writes or product
/// listings fail with [`StoreError::Unavailable`], to exercise failure handling.
#[derive(Debug, Default)]
pub struct InMemoryStashStore {
    stashes: RwLock<Vec<Stash>>,
    feed: InMemoryChangeFeed<StoreChange>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryStashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `stash`, e.g. records written by an older or
    /// newer build.
    pub fn with_stash(stash: Stash) -> Self {
        Self {
            stashes: RwLock::new(vec![stash]),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn stash_count(&self) -> usize {
        self.stashes.read().map(|s| s.len()).unwrap_or(0)
    }

    fn ensure_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    /// Run `f` against the stash with `stash_id` under the write lock.
    fn write<T>(
        &self,
        stash_id: StashId,
        f: impl FnOnce(&mut Stash) -> Result<T, DomainError>,
    ) -> Result<T, StoreError> {
        self.ensure_writable()?;
        let mut stashes = self.stashes.write().map_err(|_| StoreError::Poisoned)?;
        let stash = stashes
            .iter_mut()
            .find(|s| s.id_typed() == stash_id)
            .ok_or_else(|| StoreError::NotFound(format!("stash {stash_id}")))?;
        f(stash).map_err(|e| match e {
            DomainError::NotFound(what) => StoreError::NotFound(what),
            other => StoreError::Conflict(other.to_string()),
        })
    }

    fn publish(&self, change: StoreChange) {
        if let Err(err) = self.feed.publish(change) {
            // The write is already committed; subscribers catch up on their next reload.
            warn!(error = ?err, "failed to publish store change");
        }
    }
}

impl StashStore for InMemoryStashStore {
    fn load_or_create_stash(&self) -> Result<StashId, StoreError> {
        {
            let stashes = self.stashes.read().map_err(|_| StoreError::Poisoned)?;
            if let Some(stash) = stashes.first() {
                return Ok(stash.id_typed());
            }
        }

        self.ensure_writable()?;
        let mut stashes = self.stashes.write().map_err(|_| StoreError::Poisoned)?;
        // Another writer may have created it between the two locks.
        if let Some(stash) = stashes.first() {
            return Ok(stash.id_typed());
        }

        let now = Utc::now();
        let stash = Stash::new(StashId::new(), now);
        let stash_id = stash.id_typed();
        stashes.push(stash);
        drop(stashes);

        debug!(%stash_id, "stash created");
        self.publish(StoreChange::StashCreated {
            stash_id,
            occurred_at: now,
        });
        Ok(stash_id)
    }

    fn list_products(&self, stash_id: StashId) -> Result<Vec<ProductRecord>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        let stashes = self.stashes.read().map_err(|_| StoreError::Poisoned)?;
        stashes
            .iter()
            .find(|s| s.id_typed() == stash_id)
            .map(|s| s.products().to_vec())
            .ok_or_else(|| StoreError::NotFound(format!("stash {stash_id}")))
    }

    fn insert_product(&self, stash_id: StashId, record: ProductRecord) -> Result<(), StoreError> {
        let product_id = record.id;
        self.write(stash_id, |stash| stash.push(record))?;
        self.publish(StoreChange::ProductInserted {
            stash_id,
            product_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    fn update_product(&self, stash_id: StashId, record: ProductRecord) -> Result<(), StoreError> {
        let product_id = record.id;
        self.write(stash_id, |stash| stash.replace(record))?;
        self.publish(StoreChange::ProductUpdated {
            stash_id,
            product_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    fn delete_product(&self, stash_id: StashId, product_id: ProductId) -> Result<(), StoreError> {
        self.write(stash_id, |stash| stash.remove(product_id))?;
        self.publish(StoreChange::ProductDeleted {
            stash_id,
            product_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    fn subscribe_changes(&self) -> Subscription<StoreChange> {
        self.feed.subscribe()
    }
}
