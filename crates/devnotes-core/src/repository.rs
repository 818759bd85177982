//! Snippet repository
//!
//! The `SnippetRepository` owns the in-memory collection and mirrors it to
//! the `devnotes-snippets` slot through a `StoreAdapter`. It is the main
//! entry point of the library.
//!
//! ## Lifecycle
//!
//! Constructed once at startup from an adapter (or from `Config`), used for
//! the whole session, dropped at exit. On first run, when the slot has never
//! been written, the collection starts from the built-in sample set.
//!
//! ## Usage
//!
//! ```ignore
//! let mut repo = SnippetRepository::open(&Config::load()?);
//!
//! let snippet = repo.create(SnippetDraft::new("Hello", "println!(\"hi\");"))?;
//! let hits = repo.filter(&SearchFilters::new().with_query("hello"));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, info};

use crate::catalog::sample_snippets;
use crate::config::Config;
use crate::error::RepositoryError;
use crate::models::{SearchFilters, Snippet, SnippetDraft};
use crate::query;
use crate::storage::{KeyValueBackend, SaveOutcome, StoreAdapter, SNIPPETS_KEY};

/// Result of merging an imported document into the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records added to the collection
    pub admitted: usize,
    /// Records dropped because their id was already present
    pub skipped: usize,
}

/// Ordered snippet collection backed by durable storage
pub struct SnippetRepository<B = Box<dyn KeyValueBackend>> {
    adapter: StoreAdapter<B>,
    snippets: Vec<Snippet>,
    last_save: SaveOutcome,
}

impl SnippetRepository {
    /// Open the repository using the configured backend
    pub fn open(config: &Config) -> Self {
        let adapter = StoreAdapter::open(config);
        if config.seed_samples {
            Self::new(adapter)
        } else {
            Self::without_samples(adapter)
        }
    }
}

impl<B: KeyValueBackend> SnippetRepository<B> {
    /// Load the collection, seeding the sample set on first run
    pub fn new(adapter: StoreAdapter<B>) -> Self {
        let snippets = if adapter.has(SNIPPETS_KEY) {
            adapter.load(SNIPPETS_KEY, sample_snippets())
        } else {
            debug!("No stored snippets, starting from samples");
            sample_snippets()
        };
        Self::with_snippets(adapter, snippets)
    }

    /// Load the collection, starting empty on first run
    pub fn without_samples(adapter: StoreAdapter<B>) -> Self {
        let snippets = adapter.load(SNIPPETS_KEY, Vec::new());
        Self::with_snippets(adapter, snippets)
    }

    fn with_snippets(adapter: StoreAdapter<B>, snippets: Vec<Snippet>) -> Self {
        debug!("Loaded {} snippet(s)", snippets.len());
        Self {
            adapter,
            snippets,
            last_save: SaveOutcome::Idle,
        }
    }

    // ==================== Mutations ====================

    /// Create a snippet from a draft and put it first in the collection
    pub fn create(&mut self, draft: SnippetDraft) -> Result<Snippet, RepositoryError> {
        let snippet = Snippet::from_draft(draft)?;
        self.snippets.insert(0, snippet.clone());
        self.persist();
        Ok(snippet)
    }

    /// Replace the editable fields of an existing snippet
    pub fn update(&mut self, id: &str, draft: SnippetDraft) -> Result<Snippet, RepositoryError> {
        let snippet = self
            .snippets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;

        snippet.apply(draft)?;
        let updated = snippet.clone();
        self.persist();
        Ok(updated)
    }

    /// Remove a snippet; returns whether anything was removed
    ///
    /// Deleting an unknown id is not an error.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.snippets.len();
        self.snippets.retain(|s| s.id != id);
        let removed = self.snippets.len() != before;
        self.persist();
        removed
    }

    /// Admit imported snippets whose ids are not already present
    ///
    /// Admitted records go in front of the existing ones, in document order.
    /// Ids repeated within the batch are admitted once.
    pub fn merge_imported(&mut self, imported: Vec<Snippet>) -> ImportSummary {
        let total = imported.len();
        let mut seen: HashSet<String> = self.snippets.iter().map(|s| s.id.clone()).collect();

        let fresh: Vec<Snippet> = imported
            .into_iter()
            .filter(|s| seen.insert(s.id.clone()))
            .collect();

        let summary = ImportSummary {
            admitted: fresh.len(),
            skipped: total - fresh.len(),
        };

        if summary.admitted > 0 {
            let mut merged = fresh;
            merged.append(&mut self.snippets);
            self.snippets = merged;
            self.persist();
        }

        info!(
            "Import merged: {} admitted, {} skipped",
            summary.admitted, summary.skipped
        );
        summary
    }

    // ==================== Queries ====================

    /// The whole collection, newest first
    pub fn all(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Get a snippet by exact id
    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    /// Find a snippet by exact id or unique id prefix
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&Snippet, RepositoryError> {
        if let Some(snippet) = self.get(id_or_prefix) {
            return Ok(snippet);
        }

        let matches: Vec<&Snippet> = self
            .snippets
            .iter()
            .filter(|s| !id_or_prefix.is_empty() && s.id.starts_with(id_or_prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(RepositoryError::NotFound {
                id: id_or_prefix.to_string(),
            }),
            [only] => Ok(*only),
            many => Err(RepositoryError::Ambiguous {
                prefix: id_or_prefix.to_string(),
                candidates: many.iter().map(|s| s.id.clone()).collect(),
            }),
        }
    }

    /// Snippets matching the filters, in collection order
    pub fn filter(&self, filters: &SearchFilters) -> Vec<&Snippet> {
        query::filter(&self.snippets, filters)
    }

    /// Every tag in use with the number of snippets carrying it, by name
    pub fn tags_with_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for snippet in &self.snippets {
            for tag in &snippet.tags {
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect()
    }

    /// Distinct languages used by stored snippets, sorted
    pub fn languages_in_use(&self) -> Vec<String> {
        self.snippets
            .iter()
            .map(|s| s.language.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Outcome of the most recent write
    ///
    /// `Failed` means the in-memory collection is ahead of storage and the
    /// latest changes will not survive a restart.
    pub fn last_save(&self) -> SaveOutcome {
        self.last_save
    }

    pub fn adapter(&self) -> &StoreAdapter<B> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut StoreAdapter<B> {
        &mut self.adapter
    }

    /// Rewrite the whole collection to storage
    fn persist(&mut self) {
        self.last_save = self.adapter.save(SNIPPETS_KEY, &self.snippets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::config::Backend;
    use crate::storage::MemoryBackend;
    use tempfile::TempDir;

    fn empty_repo() -> SnippetRepository<MemoryBackend> {
        SnippetRepository::without_samples(StoreAdapter::new(MemoryBackend::new()))
    }

    fn stored(repo: &SnippetRepository<MemoryBackend>) -> Vec<Snippet> {
        let raw = repo.adapter().backend().raw(SNIPPETS_KEY).unwrap();
        serde_json::from_str(raw).unwrap()
    }

    fn test_config(temp_dir: &TempDir, backend: Backend) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            backend,
            log_file: None,
            seed_samples: true,
        }
    }

    #[test]
    fn test_first_run_seeds_samples() {
        let repo = SnippetRepository::new(StoreAdapter::new(MemoryBackend::new()));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.all()[0].title, "Fetch Wrapper");
        // Nothing written until the first mutation
        assert_eq!(repo.last_save(), SaveOutcome::Idle);
    }

    #[test]
    fn test_stored_empty_collection_stays_empty() {
        let backend = MemoryBackend::with_slot(SNIPPETS_KEY, "[]");
        let repo = SnippetRepository::new(StoreAdapter::new(backend));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_corrupt_slot_falls_back_to_samples() {
        let backend = MemoryBackend::with_slot(SNIPPETS_KEY, "{{{");
        let repo = SnippetRepository::new(StoreAdapter::new(backend));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_create_prepends_and_persists() {
        let mut repo = empty_repo();
        let first = repo.create(SnippetDraft::new("First", "1")).unwrap();
        let second = repo.create(SnippetDraft::new("Second", "2")).unwrap();

        assert_eq!(repo.all()[0].id, second.id);
        assert_eq!(repo.all()[1].id, first.id);
        assert_eq!(repo.last_save(), SaveOutcome::Persisted);
        assert_eq!(stored(&repo), repo.all());
    }

    #[test]
    fn test_create_rejects_blank_title_or_code() {
        let mut repo = empty_repo();
        repo.create(SnippetDraft::new("Keep", "keep()")).unwrap();
        let before = repo.all().to_vec();

        let err = repo.create(SnippetDraft::new("", "code")).unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));

        let err = repo.create(SnippetDraft::new("Title", "  ")).unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));

        assert_eq!(repo.all(), before.as_slice());
        assert_eq!(stored(&repo), before);
    }

    #[test]
    fn test_update_refreshes_updated_at_only() {
        let mut repo = empty_repo();
        let original = repo
            .create(SnippetDraft::new("Old", "old()").with_tags(["a"]))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));

        let updated = repo
            .update(
                &original.id,
                SnippetDraft::new("New", "new()").with_category("Backend"),
            )
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.category, "Backend");
        assert!(updated.tags.is_empty());
        assert_eq!(repo.get(&original.id), Some(&updated));
        assert_eq!(stored(&repo)[0], updated);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut repo = empty_repo();
        let older = repo.create(SnippetDraft::new("Older", "1")).unwrap();
        repo.create(SnippetDraft::new("Newer", "2")).unwrap();

        repo.update(&older.id, SnippetDraft::new("Older edited", "1"))
            .unwrap();
        assert_eq!(repo.all()[1].title, "Older edited");
    }

    #[test]
    fn test_update_missing_id() {
        let mut repo = empty_repo();
        repo.create(SnippetDraft::new("A", "a")).unwrap();
        let before = repo.all().to_vec();

        let err = repo
            .update("nope", SnippetDraft::new("B", "b"))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert_eq!(repo.all(), before.as_slice());
    }

    #[test]
    fn test_update_invalid_draft_leaves_collection() {
        let mut repo = empty_repo();
        let s = repo.create(SnippetDraft::new("A", "a")).unwrap();

        assert!(repo.update(&s.id, SnippetDraft::new("A", "")).is_err());
        assert_eq!(repo.get(&s.id), Some(&s));
    }

    #[test]
    fn test_delete() {
        let mut repo = empty_repo();
        let a = repo.create(SnippetDraft::new("A", "a")).unwrap();
        let b = repo.create(SnippetDraft::new("B", "b")).unwrap();

        assert!(repo.delete(&a.id));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.all()[0].id, b.id);
        assert_eq!(stored(&repo).len(), 1);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut repo = empty_repo();
        repo.create(SnippetDraft::new("A", "a")).unwrap();
        let before = repo.all().to_vec();

        assert!(!repo.delete("does-not-exist"));
        assert!(!repo.delete("does-not-exist"));
        assert_eq!(repo.all(), before.as_slice());
    }

    #[test]
    fn test_failed_save_keeps_memory_authoritative() {
        let mut repo = empty_repo();
        repo.adapter_mut().backend_mut().set_failing(true);

        let s = repo.create(SnippetDraft::new("A", "a")).unwrap();

        assert!(repo.last_save().is_failed());
        assert_eq!(repo.get(&s.id).map(|x| x.title.as_str()), Some("A"));
        assert!(repo.adapter().backend().raw(SNIPPETS_KEY).is_none());

        repo.adapter_mut().backend_mut().set_failing(false);
        repo.delete("unknown");
        assert_eq!(repo.last_save(), SaveOutcome::Persisted);
        assert_eq!(stored(&repo).len(), 1);
    }

    #[test]
    fn test_resolve_by_prefix() {
        let mut repo = empty_repo();
        let s = repo.create(SnippetDraft::new("A", "a")).unwrap();

        assert_eq!(repo.resolve(&s.id).unwrap().id, s.id);
        assert_eq!(repo.resolve(&s.id[..6]).unwrap().id, s.id);
        assert!(matches!(
            repo.resolve("zzzz-not-there"),
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(repo.resolve("").is_err());
    }

    #[test]
    fn test_resolve_ambiguous() {
        let backend = MemoryBackend::with_slot(
            SNIPPETS_KEY,
            codec::export(&sample_snippets()).unwrap(),
        );
        let mut repo = SnippetRepository::new(StoreAdapter::new(backend));
        let mut extra = sample_snippets().remove(0);
        extra.id = "10".to_string();
        repo.merge_imported(vec![extra]);

        // "1" is an exact id, so it wins over the "10" prefix match
        assert_eq!(repo.resolve("1").unwrap().id, "1");

        let mut other = sample_snippets().remove(0);
        other.id = "abc1".to_string();
        let mut another = other.clone();
        another.id = "abc2".to_string();
        repo.merge_imported(vec![other, another]);

        match repo.resolve("abc") {
            Err(RepositoryError::Ambiguous { candidates, .. }) => {
                assert_eq!(candidates.len(), 2)
            }
            other => panic!("expected ambiguity, got {:?}", other.map(|s| s.id.clone())),
        }
    }

    #[test]
    fn test_filter_delegates_to_query() {
        let repo = SnippetRepository::new(StoreAdapter::new(MemoryBackend::new()));
        let hits = repo.filter(&SearchFilters::new().with_tags(["react"]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn test_merge_into_empty_reproduces_export() {
        let source = SnippetRepository::new(StoreAdapter::new(MemoryBackend::new()));
        let document = codec::export(source.all()).unwrap();

        let mut target = empty_repo();
        let summary = target.merge_imported(codec::import(&document).unwrap());

        assert_eq!(summary, ImportSummary { admitted: 2, skipped: 0 });
        assert_eq!(target.all(), source.all());
    }

    #[test]
    fn test_reimport_same_document_is_noop() {
        let mut repo = SnippetRepository::new(StoreAdapter::new(MemoryBackend::new()));
        let document = codec::export(repo.all()).unwrap();

        let summary = repo.merge_imported(codec::import(&document).unwrap());

        assert_eq!(summary, ImportSummary { admitted: 0, skipped: 2 });
        assert_eq!(repo.len(), 2);
        // Nothing changed, nothing written
        assert_eq!(repo.last_save(), SaveOutcome::Idle);
    }

    #[test]
    fn test_merge_skips_existing_and_prepends_new() {
        let mut repo = empty_repo();
        let existing = repo.create(SnippetDraft::new("Existing", "e")).unwrap();

        let mut dup = existing.clone();
        dup.title = "Imposter".to_string();
        let mut fresh_a = sample_snippets().remove(0);
        fresh_a.id = "a".to_string();
        let mut fresh_b = sample_snippets().remove(1);
        fresh_b.id = "b".to_string();
        let repeat_b = fresh_b.clone();

        let summary = repo.merge_imported(vec![fresh_a, dup, fresh_b, repeat_b]);

        assert_eq!(summary, ImportSummary { admitted: 2, skipped: 2 });
        let ids: Vec<&str> = repo.all().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", existing.id.as_str()]);
        assert_eq!(repo.get(&existing.id).unwrap().title, "Existing");
        assert_eq!(stored(&repo).len(), 3);
    }

    #[test]
    fn test_tags_with_counts() {
        let repo = SnippetRepository::new(StoreAdapter::new(MemoryBackend::new()));
        let tags = repo.tags_with_counts();

        assert_eq!(tags[0], ("api".to_string(), 1));
        assert_eq!(tags[1], ("async".to_string(), 2));
        let names: Vec<&str> = tags.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(names, vec!["api", "async", "fetch", "hooks", "react"]);
    }

    #[test]
    fn test_languages_in_use() {
        let repo = SnippetRepository::new(StoreAdapter::new(MemoryBackend::new()));
        assert_eq!(repo.languages_in_use(), vec!["javascript", "tsx"]);
    }

    #[test]
    fn test_data_persists_across_reopens_file_backend() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir, Backend::File);

        let id = {
            let mut repo = SnippetRepository::open(&config);
            repo.create(SnippetDraft::new("Persistent", "keep()"))
                .unwrap()
                .id
        };

        let repo = SnippetRepository::open(&config);
        assert_eq!(repo.len(), 3);
        assert_eq!(repo.all()[0].id, id);
        assert_eq!(repo.all()[0].title, "Persistent");
    }

    #[test]
    fn test_data_persists_across_reopens_sqlite_backend() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir, Backend::Sqlite);

        {
            let mut repo = SnippetRepository::open(&config);
            repo.delete("1");
            repo.delete("2");
        }

        // An emptied collection stays empty instead of reseeding
        let repo = SnippetRepository::open(&config);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_open_without_samples() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir, Backend::File);
        config.seed_samples = false;

        let repo = SnippetRepository::open(&config);
        assert!(repo.is_empty());
    }
}
