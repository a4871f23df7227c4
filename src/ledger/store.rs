//! Storage port for persistent player statistics
//!
//! The ledger's logic is storage-agnostic: it talks to a small
//! typed key/value trait. Production persists a JSON document to a
//! file; tests use the in-memory store.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

/// Underlying persistence failed. Never fatal to the tick loop: the
/// ledger logs it and keeps the in-memory value as the source of truth.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Typed get/set/flush by key. Writes are buffered until `flush`; the
/// ledger calls `flush` after every mutation, making the pair
/// write-through.
pub trait StatStore {
    fn get_u64(&self, key: &str) -> Option<u64>;
    fn get_f32(&self, key: &str) -> Option<f32>;
    fn set_u64(&mut self, key: &str, value: u64) -> Result<(), StorageError>;
    fn set_f32(&mut self, key: &str, value: f32) -> Result<(), StorageError>;
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// Volatile store for tests and tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatStore for MemoryStore {
    fn get_u64(&self, key: &str) -> Option<u64> {
        self.doc.get(key).and_then(Value::as_u64)
    }

    fn get_f32(&self, key: &str) -> Option<f32> {
        self.doc.get(key).and_then(Value::as_f64).map(|v| v as f32)
    }

    fn set_u64(&mut self, key: &str, value: u64) -> Result<(), StorageError> {
        let _ = self.doc.insert(key.to_string(), value.into());
        Ok(())
    }

    fn set_f32(&mut self, key: &str, value: f32) -> Result<(), StorageError> {
        let _ = self.doc.insert(key.to_string(), f64::from(value).into());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// A JSON document on disk, one key per statistic.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl JsonFileStore {
    /// Open (or create on first flush) the document at `path`. A
    /// missing or unreadable file starts fresh rather than failing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Map<String, Value>>(&json) {
                Ok(doc) => {
                    log::info!("loaded player data from {}", path.display());
                    doc
                }
                Err(err) => {
                    log::warn!(
                        "player data at {} is corrupt ({err}), starting fresh",
                        path.display()
                    );
                    Map::new()
                }
            },
            Err(_) => {
                log::info!("no player data at {}, starting fresh", path.display());
                Map::new()
            }
        };
        Self { path, doc }
    }
}

impl StatStore for JsonFileStore {
    fn get_u64(&self, key: &str) -> Option<u64> {
        self.doc.get(key).and_then(Value::as_u64)
    }

    fn get_f32(&self, key: &str) -> Option<f32> {
        self.doc.get(key).and_then(Value::as_f64).map(|v| v as f32)
    }

    fn set_u64(&mut self, key: &str, value: u64) -> Result<(), StorageError> {
        let _ = self.doc.insert(key.to_string(), value.into());
        Ok(())
    }

    fn set_f32(&mut self, key: &str, value: f32) -> Result<(), StorageError> {
        let _ = self.doc.insert(key.to_string(), f64::from(value).into());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&Value::Object(self.doc.clone()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
