//! DevNotes Core Library
//!
//! This crate provides the core functionality for DevNotes, a personal
//! code-snippet manager: storing snippets, filtering them, and moving them
//! in and out as portable JSON documents.
//!
//! # Architecture
//!
//! - **Storage**: named key-value slots (files or SQLite) behind a fail-soft
//!   typed adapter
//! - **Repository**: the in-memory collection, rewritten to its slot after
//!   every change
//!
//! All queries are served from the in-memory collection.
//!
//! # Quick Start
//!
//! ```text
//! let mut repo = SnippetRepository::open(&Config::load()?);
//!
//! // Add a snippet
//! let draft = SnippetDraft::new("Fetch", "await fetch(url)").with_tags(["api"]);
//! repo.create(draft)?;
//!
//! // Query snippets
//! let hits = repo.filter(&SearchFilters::new().with_tags(["api"]));
//! ```
//!
//! # Modules
//!
//! - `repository`: Snippet collection (main entry point)
//! - `models`: Snippet, draft, category and filter types
//! - `query`: Filtering
//! - `codec`: Import/export documents
//! - `catalog`: Category registry, language list, sample snippets
//! - `storage`: Key-value backends and the store adapter
//! - `preferences`: Dark-mode flag
//! - `config`: Application configuration

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod preferences;
pub mod query;
pub mod repository;
pub mod storage;

pub use config::{Backend, Config};
pub use error::{CodecError, RepositoryError, ValidationError};
pub use models::{Category, SearchFilters, Snippet, SnippetDraft};
pub use preferences::Preferences;
pub use repository::{ImportSummary, SnippetRepository};
pub use storage::{SaveOutcome, StorageError, StoreAdapter};
