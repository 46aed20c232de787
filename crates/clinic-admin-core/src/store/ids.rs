//! Identifier generation for stored records.

use serde::{Deserialize, Serialize};

use super::Collection;

/// How fresh identifiers are produced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Per-collection counter ("1", "2", ...), strictly increasing
    #[default]
    Sequential,
    /// Random v4 UUIDs
    Uuid,
}

/// Issues identifiers that are unique among current and past ids of a collection.
///
/// The sequential counters only move forward, so an id handed out once is never
/// handed out again even after the record is deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: [u64; 3],
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            next: [1; 3],
        }
    }

    /// Record an id that entered the collection from outside (seed or import),
    /// so the counter never issues it again.
    pub fn observe(&mut self, collection: Collection, id: &str) {
        if let Ok(n) = id.parse::<u64>() {
            let slot = &mut self.next[collection.index()];
            if n >= *slot {
                *slot = n.saturating_add(1);
            }
        }
    }

    /// Produce a fresh id for `collection`.
    pub fn next_id(&mut self, collection: Collection) -> String {
        match self.strategy {
            IdStrategy::Sequential => {
                let slot = &mut self.next[collection.index()];
                let id = *slot;
                *slot += 1;
                id.to_string()
            }
            IdStrategy::Uuid => uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_per_collection() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        assert_eq!(ids.next_id(Collection::Doctors), "1");
        assert_eq!(ids.next_id(Collection::Doctors), "2");
        assert_eq!(ids.next_id(Collection::Patients), "1");
    }

    #[test]
    fn test_observe_skips_past_existing_ids() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        ids.observe(Collection::Appointments, "7");
        ids.observe(Collection::Appointments, "3");
        ids.observe(Collection::Appointments, "not-a-number");
        assert_eq!(ids.next_id(Collection::Appointments), "8");
    }

    #[test]
    fn test_uuid_ids() {
        let mut ids = IdGenerator::new(IdStrategy::Uuid);
        let a = ids.next_id(Collection::Patients);
        let b = ids.next_id(Collection::Patients);
        assert_eq!(a.len(), 36); // UUID format
        assert_ne!(a, b);
    }
}
