// store.rs
use bevy::log::{debug, warn};
#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const BEST_TIME_KEY: &str = "campus-map-quiz-best-ms";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

// String key/value pairs that survive restarts
pub trait ScalarStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// One file per key under `dir`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl ScalarStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!("Could not read {}: {err}", path.display());
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StoreError::Write { path, source })
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

#[cfg(test)]
impl ScalarStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// Decimal milliseconds under BEST_TIME_KEY
#[derive(Debug, Clone)]
pub struct BestTime<S> {
    store: S,
}

impl<S: ScalarStore> BestTime<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // Anything but a positive integer reads as no best time
    pub fn get_best(&self) -> Option<u64> {
        let raw = self.store.get(BEST_TIME_KEY)?;
        match raw.trim().parse::<u64>() {
            Ok(0) => None,
            Ok(ms) => Some(ms),
            Err(_) => {
                debug!("Ignoring unreadable best time {raw:?}");
                None
            }
        }
    }

    pub fn get_best_duration(&self) -> Option<Duration> {
        self.get_best().map(Duration::from_millis)
    }

    pub fn set_best(&mut self, ms: u64) -> Result<(), StoreError> {
        self.store.set(BEST_TIME_KEY, &ms.to_string())
    }
}
