//! High score tracking and storage
//!
//! Only a single scalar is kept: the best score ever reached. It is stored
//! under the `highScore` key in LocalStorage on the web and in a small JSON
//! file in the user's data directory on native.

use serde::{Deserialize, Serialize};

use crate::platform::ScoreStore;

/// Storage key for the persisted value
pub const STORAGE_KEY: &str = "highScore";

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a score. Returns true when it beats the previous best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

/// On-disk form of the high score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct StoredHighScore {
    #[serde(rename = "highScore")]
    high_score: u64,
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u64,
    /// Number of writes, for asserting write-on-improvement
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_value(value: u64) -> Self {
        Self { value, writes: 0 }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> u64 {
        self.value
    }

    fn save_high_score(&mut self, score: u64) {
        self.value = score;
        self.writes += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use super::StoredHighScore;
    use crate::platform::ScoreStore;

    /// JSON file store
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `<data dir>/brick-breaker/highscore.json`
        pub fn default_location() -> Option<Self> {
            dirs::data_local_dir().map(|dir| Self::new(dir.join("brick-breaker").join("highscore.json")))
        }

        pub fn path(&self) -> &PathBuf {
            &self.path
        }
    }

    impl ScoreStore for FileStore {
        fn load_high_score(&mut self) -> u64 {
            if !self.path.exists() {
                log::info!("No high score file at {:?}, starting from 0", self.path);
                return 0;
            }

            match fs::read_to_string(&self.path) {
                Ok(contents) => match serde_json::from_str::<StoredHighScore>(&contents) {
                    Ok(stored) => {
                        log::info!("Loaded high score {} from {:?}", stored.high_score, self.path);
                        stored.high_score
                    }
                    Err(e) => {
                        log::warn!("Failed to parse high score: {}", e);
                        0
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read high score file: {}", e);
                    0
                }
            }
        }

        fn save_high_score(&mut self, score: u64) {
            if let Some(parent) = self.path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    log::warn!("Failed to create high score directory: {}", e);
                    return;
                }
            }

            let stored = StoredHighScore { high_score: score };
            match serde_json::to_string_pretty(&stored) {
                Ok(json) => {
                    if let Err(e) = fs::write(&self.path, json) {
                        log::warn!("Failed to write high score: {}", e);
                    }
                }
                Err(e) => log::warn!("Failed to serialize high score: {}", e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::STORAGE_KEY;
    use crate::platform::ScoreStore;

    /// Browser LocalStorage store
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl ScoreStore for LocalStorageStore {
        fn load_high_score(&mut self) -> u64 {
            Self::storage()
                .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0)
        }

        fn save_high_score(&mut self, score: u64) {
            let Some(storage) = Self::storage() else {
                log::warn!("LocalStorage unavailable, high score not saved");
                return;
            };
            if storage.set_item(STORAGE_KEY, &score.to_string()).is_err() {
                log::warn!("Failed to save high score");
            }
        }
    }
}
