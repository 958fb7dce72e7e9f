//! Best-score persistence
//!
//! The persisted layout is a single plain-text integer under one key. The
//! browser keeps it in LocalStorage; native builds and tests use memory.

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Default storage key (shared with earlier versions of the site)
pub const BEST_SCORE_KEY: &str = "highScore";

/// Storage failures. Never fatal: callers log and fall back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("stored best score is corrupt: {0:?}")]
    Corrupt(String),
}

/// Key-value home of the best score
pub trait ScoreStore {
    /// Stored best score, `None` if nothing was saved yet
    fn load_best(&self) -> Result<Option<u32>, StoreError>;
    fn save_best(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Parse the plain-text value. Older saves may hold a float (`"12.0"`),
/// which is truncated.
pub fn parse_best(text: &str) -> Result<u32, StoreError> {
    let text = text.trim();
    if let Ok(score) = text.parse::<u32>() {
        return Ok(score);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value.min(u32::MAX as f64) as u32),
        _ => Err(StoreError::Corrupt(text.to_string())),
    }
}

/// In-memory store (native builds, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self {
            best: Some(best),
            writes: 0,
        }
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.best)
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = Some(score);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best() {
        assert_eq!(parse_best("42"), Ok(42));
        assert_eq!(parse_best(" 7\n"), Ok(7));
        assert_eq!(parse_best("12.0"), Ok(12));
        assert_eq!(parse_best("3.9"), Ok(3));
        assert!(matches!(parse_best("abc"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_best("-4"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_best("NaN"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_best(""), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_best(), Ok(None));
        store.save_best(9).unwrap();
        assert_eq!(store.load_best(), Ok(Some(9)));
        assert_eq!(store.writes(), 1);
    }
}
