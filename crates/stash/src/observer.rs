//! Observer registration for snapshot notifications.

use crate::snapshot::StashSnapshot;

/// Receives the refreshed per-category view after every change.
///
/// Implemented for any `FnMut(&StashSnapshot)`.
pub trait StashObserver {
    fn on_change(&mut self, snapshot: &StashSnapshot);
}

impl<F> StashObserver for F
where
    F: FnMut(&StashSnapshot),
{
    fn on_change(&mut self, snapshot: &StashSnapshot) {
        self(snapshot)
    }
}

/// Handle returned by registration, used to unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Registered observers, notified in registration order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn StashObserver>)>,
}

impl Observers {
    pub(crate) fn register(&mut self, observer: Box<dyn StashObserver>) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, snapshot: &StashSnapshot) {
        for (_, observer) in &mut self.entries {
            observer.on_change(snapshot);
        }
    }
}

impl core::fmt::Debug for Observers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("registered", &self.entries.len())
            .finish()
    }
}
