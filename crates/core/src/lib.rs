//! `stash-core` — building blocks shared by the stash crates.
//!
//! Pure domain primitives: identifiers and the error model.
//! Nothing in here knows about storage or presentation.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ProductId, StashId};
