//! Typed, fail-soft access to key-value slots
//!
//! `load` and `save` never return errors. A slot that is missing, blank or
//! unparseable reads as the caller's default; a write that fails is logged
//! and reported as `SaveOutcome::Failed`, and the caller's in-memory value
//! stays authoritative for the rest of the session.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Backend, Config};
use crate::storage::backend::KeyValueBackend;
use crate::storage::error::StorageResult;
use crate::storage::persistence::FileBackend;
use crate::storage::sqlite::SqliteBackend;

/// Slot holding the snippet collection
pub const SNIPPETS_KEY: &str = "devnotes-snippets";

/// Slot holding the dark-mode flag
pub const DARK_MODE_KEY: &str = "devnotes-dark-mode";

/// Result of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveOutcome {
    /// Nothing has been saved yet
    #[default]
    Idle,
    /// The value reached durable storage
    Persisted,
    /// The write failed; the value will not survive a restart
    Failed,
}

impl SaveOutcome {
    pub fn is_failed(self) -> bool {
        self == SaveOutcome::Failed
    }
}

impl KeyValueBackend for Box<dyn KeyValueBackend> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Typed get/set over a key-value backend
pub struct StoreAdapter<B = Box<dyn KeyValueBackend>> {
    backend: B,
}

impl StoreAdapter {
    /// Open the backend selected by the configuration
    ///
    /// If the SQLite database cannot be opened the adapter falls back to the
    /// file backend in the same data directory.
    pub fn open(config: &Config) -> Self {
        let backend: Box<dyn KeyValueBackend> = match config.backend {
            Backend::File => Box::new(FileBackend::new(config.data_dir.clone())),
            Backend::Sqlite => match SqliteBackend::open(&config.sqlite_path()) {
                Ok(db) => Box::new(db),
                Err(e) => {
                    warn!(
                        "Could not open {:?} ({}), falling back to file storage",
                        config.sqlite_path(),
                        e
                    );
                    Box::new(FileBackend::new(config.data_dir.clone()))
                }
            },
        };
        Self { backend }
    }
}

impl<B: KeyValueBackend> StoreAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Read and parse a slot, falling back to `default`
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Slot {} is empty, using default", key);
                return default;
            }
            Err(e) => {
                warn!("Failed to read slot {}: {}", key, e);
                return default;
            }
        };

        if raw.trim().is_empty() {
            return default;
        }

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Slot {} holds invalid data ({}), using default", key, e);
                default
            }
        }
    }

    /// Serialize and write a slot; failures are logged, never raised
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> SaveOutcome {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize slot {}: {}", key, e);
                return SaveOutcome::Failed;
            }
        };

        match self.backend.write(key, &raw) {
            Ok(()) => SaveOutcome::Persisted,
            Err(e) => {
                match e.recovery_suggestion() {
                    Some(hint) => warn!("Failed to write slot {}: {}. {}", key, e, hint),
                    None => warn!("Failed to write slot {}: {}", key, e),
                }
                SaveOutcome::Failed
            }
        }
    }

    /// Whether a slot currently holds a non-blank value
    pub fn has(&self, key: &str) -> bool {
        matches!(self.backend.read(key), Ok(Some(raw)) if !raw.trim().is_empty())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
