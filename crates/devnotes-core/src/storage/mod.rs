//! Storage layer
//!
//! Durable key-value slots and the typed adapter on top of them.
//!
//! ## Architecture
//!
//! - **Backends**: one file per slot, a SQLite table, or memory (tests)
//! - **StoreAdapter**: JSON (de)serialization with fail-soft semantics
//!
//! Every save rewrites a whole slot; there is no incremental log.

pub mod adapter;
pub mod backend;
pub mod error;
pub mod persistence;
pub mod schema;
pub mod sqlite;

pub use adapter::{SaveOutcome, StoreAdapter, DARK_MODE_KEY, SNIPPETS_KEY};
pub use backend::{KeyValueBackend, MemoryBackend};
pub use error::{StorageError, StorageResult};
pub use persistence::FileBackend;
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
pub use sqlite::SqliteBackend;
