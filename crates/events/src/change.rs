use chrono::{DateTime, Utc};

use stash_core::{ProductId, StashId};

use crate::Event;

/// A committed change to the persisted stash.
///
/// Published for writes from any source: this process, another process sharing
/// the store, or a sync from another device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    StashCreated {
        stash_id: StashId,
        occurred_at: DateTime<Utc>,
    },
    ProductInserted {
        stash_id: StashId,
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ProductUpdated {
        stash_id: StashId,
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ProductDeleted {
        stash_id: StashId,
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
}

impl StoreChange {
    pub fn stash_id(&self) -> StashId {
        match self {
            StoreChange::StashCreated { stash_id, .. }
            | StoreChange::ProductInserted { stash_id, .. }
            | StoreChange::ProductUpdated { stash_id, .. }
            | StoreChange::ProductDeleted { stash_id, .. } => *stash_id,
        }
    }

    /// The product touched by this change, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            StoreChange::StashCreated { .. } => None,
            StoreChange::ProductInserted { product_id, .. }
            | StoreChange::ProductUpdated { product_id, .. }
            | StoreChange::ProductDeleted { product_id, .. } => Some(*product_id),
        }
    }
}

impl Event for StoreChange {
    fn event_type(&self) -> &'static str {
        match self {
            StoreChange::StashCreated { .. } => "stash.created",
            StoreChange::ProductInserted { .. } => "stash.product.inserted",
            StoreChange::ProductUpdated { .. } => "stash.product.updated",
            StoreChange::ProductDeleted { .. } => "stash.product.deleted",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StoreChange::StashCreated { occurred_at, .. }
            | StoreChange::ProductInserted { occurred_at, .. }
            | StoreChange::ProductUpdated { occurred_at, .. }
            | StoreChange::ProductDeleted { occurred_at, .. } => *occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_cover_every_variant() {
        let stash_id = StashId::new();
        let product_id = ProductId::new();
        let now = Utc::now();

        let created = StoreChange::StashCreated { stash_id, occurred_at: now };
        assert_eq!(created.stash_id(), stash_id);
        assert_eq!(created.product_id(), None);
        assert_eq!(created.event_type(), "stash.created");

        let deleted = StoreChange::ProductDeleted { stash_id, product_id, occurred_at: now };
        assert_eq!(deleted.product_id(), Some(product_id));
        assert_eq!(deleted.occurred_at(), now);
        assert_eq!(deleted.event_type(), "stash.product.deleted");
    }
}
