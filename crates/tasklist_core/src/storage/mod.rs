//! Blob persistence for task list snapshots.
//!
//! A store holds a single serialized snapshot under one logical key. It knows
//! nothing about tasks; encoding lives in [`json_store`].

use crate::error::AppError;

pub mod json_store;

pub use json_store::{JsonFileStore, decode_snapshot, encode_snapshot};

pub trait SnapshotStore {
    /// Returns the stored blob, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, AppError>;

    /// Replaces the stored blob in full.
    fn save(&mut self, blob: &str) -> Result<(), AppError>;
}

/// In-process store. Useful for embedding the state core without touching disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blob: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            writes: 0,
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of `save` calls observed since construction.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, AppError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), AppError> {
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }
}
