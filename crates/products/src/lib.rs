//! Products domain module.
//!
//! The product model, its fixed category set, and the persisted stash record.
//! Deterministic domain logic only (no IO, no storage, no presentation).

pub mod category;
pub mod product;
pub mod stash;

pub use category::{Category, SECTION_TITLES};
pub use product::{DEFAULT_SHELF_LIFE_MONTHS, Product, ProductRecord, default_expiration};
pub use stash::Stash;
