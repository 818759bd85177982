//! Data models for DevNotes
//!
//! Defines the core data structures: Snippet, SnippetDraft, Category and
//! SearchFilters. Snippets serialize with camelCase keys and ISO-8601
//! timestamps, which is the layout of both the persisted slot and the
//! export document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Default language for a draft built from scratch
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// A stored piece of code with its metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Opaque unique identifier, immutable after creation
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional description (empty when unset)
    #[serde(default)]
    pub description: String,
    /// The code itself
    pub code: String,
    /// Language tag (informational)
    pub language: String,
    /// Category name (informational)
    #[serde(default)]
    pub category: String,
    /// Distinct tags in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
    /// When this snippet was created
    pub created_at: DateTime<Utc>,
    /// When this snippet was last updated
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    /// Build a new snippet from a validated draft
    ///
    /// Assigns a fresh random id and sets both timestamps to now.
    pub fn from_draft(draft: SnippetDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        let now = Utc::now();
        let draft = draft.normalized();
        Ok(Self {
            id: generate_id(),
            title: draft.title,
            description: draft.description,
            code: draft.code,
            language: draft.language,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace every editable field with the draft's values
    ///
    /// `id` and `created_at` are kept; `updated_at` is refreshed. The
    /// snippet is left untouched if the draft is invalid.
    pub fn apply(&mut self, draft: SnippetDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        let draft = draft.normalized();
        self.title = draft.title;
        self.description = draft.description;
        self.code = draft.code;
        self.language = draft.language;
        self.category = draft.category;
        self.tags = draft.tags;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Check whether the snippet carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Short form of the id for listings
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// Editable fields of a snippet, as entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetDraft {
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl Default for SnippetDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            code: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            category: crate::catalog::default_category().name.to_string(),
            tags: Vec::new(),
        }
    }
}

impl SnippetDraft {
    /// Create a draft with a title and code, other fields defaulted
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    /// Start a draft from an existing snippet (for editing)
    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self {
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            code: snippet.code.clone(),
            language: snippet.language.clone(),
            category: snippet.category.clone(),
            tags: snippet.tags.clone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Vec::new();
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Add a tag as typed by the user
    ///
    /// The tag is trimmed and lowercased; empty or already-present tags
    /// are ignored.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into().trim().to_lowercase();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Remove a tag
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Check that the required fields are present
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.code.trim().is_empty() {
            return Err(ValidationError::MissingCode);
        }
        Ok(())
    }

    /// Trim title and description and drop duplicate tags
    fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tags: dedup_tags(self.tags),
            ..self
        }
    }
}

/// A static category from the registry
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Display hint (hex colour)
    pub color: &'static str,
}

/// Active filter constraints, combined with logical AND
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    /// Free text, matched case-insensitively against title, description and code
    #[serde(default)]
    pub query: String,
    /// Exact category name, empty for any
    #[serde(default)]
    pub category: String,
    /// Exact language tag, empty for any
    #[serde(default)]
    pub language: String,
    /// Tags that must all be present
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Require a tag (no-op if already required)
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Stop requiring a tag
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Clear category, language and tags; the query is kept
    pub fn clear(&mut self) {
        self.category.clear();
        self.language.clear();
        self.tags.clear();
    }

    /// True when a category, language or tag constraint is set
    pub fn has_active_filters(&self) -> bool {
        !self.category.is_empty() || !self.language.is_empty() || !self.tags.is_empty()
    }

    /// True when no constraint at all is set, query included
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && !self.has_active_filters()
    }
}

/// Generate a fresh, collision-resistant snippet id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Drop empty and repeated tags, keeping first occurrences in order
pub(crate) fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
