//! Best-score bridge between a session and its store
//!
//! Read once when a run starts, written once when a run ends with a new
//! record. Storage problems never reach gameplay: reads degrade to zero and
//! failed writes are only logged.

use crate::persistence::ScoreStore;

/// Best score plus the store it lives in
#[derive(Debug)]
pub struct BestScore<S: ScoreStore> {
    store: S,
    best: u32,
}

impl<S: ScoreStore> BestScore<S> {
    /// Wrap a store and read the current best
    pub fn new(store: S) -> Self {
        let mut bridge = Self { store, best: 0 };
        bridge.refresh();
        bridge
    }

    /// Re-read the stored best (zero if unset or unreadable)
    pub fn refresh(&mut self) -> u32 {
        self.best = match self.store.load_best() {
            Ok(Some(best)) => best,
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read best score, treating as unset: {}", e);
                0
            }
        };
        self.best
    }

    /// Current best score
    pub fn value(&self) -> u32 {
        self.best
    }

    /// Check if a finished run beats the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true when it set a new best.
    /// The store is only written for a strictly greater score.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        if let Err(e) = self.store.save_best(score) {
            log::warn!("Could not save best score {}: {}", score, e);
        }
        log::info!("New best score: {}", score);
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    /// Store whose reads and writes always fail
    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load_best(&self) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn save_best(&mut self, _score: u32) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".into()))
        }
    }

    #[test]
    fn test_reads_existing_best() {
        let best = BestScore::new(MemoryStore::with_best(12));
        assert_eq!(best.value(), 12);
    }

    #[test]
    fn test_lower_or_equal_score_leaves_store_alone() {
        let mut best = BestScore::new(MemoryStore::with_best(10));
        assert!(!best.record(3));
        assert!(!best.record(10));
        assert_eq!(best.value(), 10);
        assert_eq!(best.store().writes(), 0);
    }

    #[test]
    fn test_higher_score_written_once() {
        let mut best = BestScore::new(MemoryStore::with_best(10));
        assert!(best.record(11));
        assert!(!best.record(11));
        assert_eq!(best.value(), 11);
        assert_eq!(best.store().writes(), 1);
        assert_eq!(best.store().load_best(), Ok(Some(11)));
    }

    #[test]
    fn test_zero_score_never_written_to_empty_store() {
        let mut best = BestScore::new(MemoryStore::new());
        assert!(!best.record(0));
        assert_eq!(best.store().writes(), 0);
    }

    #[test]
    fn test_broken_store_degrades() {
        let mut best = BestScore::new(BrokenStore);
        assert_eq!(best.value(), 0);
        // Write failure is swallowed; the in-memory record still updates
        assert!(best.record(4));
        assert_eq!(best.value(), 4);
        assert_eq!(best.refresh(), 0);
    }
}
