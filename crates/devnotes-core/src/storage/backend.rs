//! Key-value backend abstraction
//!
//! A backend stores named string slots. It is the durable storage the
//! `StoreAdapter` sits on; the repository never talks to it directly.

use std::collections::HashMap;

use crate::storage::error::{StorageError, StorageResult};

/// Durable key-value storage of string slots
pub trait KeyValueBackend {
    /// Read a slot, `None` if it has never been written
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a slot, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a slot; removing an absent slot is not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// In-memory backend
///
/// Nothing survives the process. Can be switched to a failing mode to
/// simulate a full or disabled store.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
    failing: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with one slot
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self {
            slots,
            failing: false,
        }
    }

    /// Make every subsequent read and write fail
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Raw slot contents, bypassing the failure mode
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    fn check(&self) -> StorageResult<()> {
        if self.failing {
            Err(StorageError::Unavailable("memory backend is failing".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.check()?;
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.check()?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.check()?;
        self.slots.remove(key);
        Ok(())
    }
}
