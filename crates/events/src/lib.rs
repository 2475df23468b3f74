//! Data-change notifications emitted by the persistence layer.
//!
//! Whoever owns durable storage publishes a [`StoreChange`] after every committed
//! write; views subscribe and refresh themselves when something arrives.

pub mod change;
pub mod event;
pub mod feed;
pub mod in_memory_feed;

pub use change::StoreChange;
pub use event::Event;
pub use feed::{ChangeFeed, Subscription};
pub use in_memory_feed::{InMemoryChangeFeed, InMemoryFeedError};
