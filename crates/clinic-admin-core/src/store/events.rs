//! Change notifications for store consumers.

use std::fmt;

use serde::Serialize;

use super::{Collection, Snapshot};

/// What happened to a record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
}

/// Published after a collection has been replaced.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoreChange {
    pub collection: Collection,
    pub kind: ChangeKind,
    /// Id of the affected record
    pub id: String,
    /// Store version after the change
    pub version: u64,
}

/// Handle returned by [`ClinicStore::subscribe`](super::ClinicStore::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receives the change and the collections as published by it.
type Callback = Box<dyn Fn(&StoreChange, &Snapshot) + Send>;

/// Registered callbacks, notified in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&self, change: &StoreChange, snapshot: &Snapshot) {
        for (_, callback) in &self.entries {
            callback(change, snapshot);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
