//! `stash-app` — the category-partitioned, searchable product stash.
//!
//! [`ProductStash`] keeps the in-memory product list in step with a
//! [`StashStore`], derives the five per-category lists (optionally narrowed by a
//! search query) and pushes a fresh [`StashSnapshot`] to every registered
//! observer after each change.

pub mod config;
pub mod observer;
pub mod product_stash;
pub mod snapshot;
pub mod store;

pub use config::{StashConfig, UnknownCategoryPolicy};
pub use observer::{ObserverId, StashObserver};
pub use product_stash::ProductStash;
pub use snapshot::{CategorySection, StashSnapshot};
pub use store::{InMemoryStashStore, StashStore, StoreError};
