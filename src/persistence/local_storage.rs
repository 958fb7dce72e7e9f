//! LocalStorage-backed best score (WASM only)

use super::{BEST_SCORE_KEY, ScoreStore, StoreError, parse_best};

/// Best score under one LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(BEST_SCORE_KEY)
    }
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best(&self) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        let text = storage
            .get_item(&self.key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))?;
        text.as_deref().map(parse_best).transpose()
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &score.to_string())
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}
