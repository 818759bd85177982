//! Snippet filtering
//!
//! A linear predicate scan over the collection. Input order is preserved,
//! so results come out newest-created first just like the collection.

use crate::models::{SearchFilters, Snippet};

/// Return the snippets matching every constraint in `filters`
pub fn filter<'a>(snippets: &'a [Snippet], filters: &SearchFilters) -> Vec<&'a Snippet> {
    let query = filters.query.to_lowercase();
    snippets
        .iter()
        .filter(|s| matches_lowered(s, filters, &query))
        .collect()
}

/// Check a single snippet against the filters
pub fn matches(snippet: &Snippet, filters: &SearchFilters) -> bool {
    matches_lowered(snippet, filters, &filters.query.to_lowercase())
}

fn matches_lowered(snippet: &Snippet, filters: &SearchFilters, query: &str) -> bool {
    matches_query(snippet, query)
        && (filters.category.is_empty() || snippet.category == filters.category)
        && (filters.language.is_empty() || snippet.language == filters.language)
        && filters.tags.iter().all(|tag| snippet.has_tag(tag))
}

// `query` must already be lowercased
fn matches_query(snippet: &Snippet, query: &str) -> bool {
    query.is_empty()
        || snippet.title.to_lowercase().contains(query)
        || snippet.description.to_lowercase().contains(query)
        || snippet.code.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_snippets;
    use crate::models::SnippetDraft;

    fn snippet(title: &str, code: &str, tags: &[&str]) -> Snippet {
        Snippet::from_draft(SnippetDraft::new(title, code).with_tags(tags.iter().copied()))
            .unwrap()
    }

    fn ids(result: &[&Snippet]) -> Vec<String> {
        result.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_empty_filters_is_identity() {
        let samples = sample_snippets();
        let result = filter(&samples, &SearchFilters::default());
        assert_eq!(result.len(), samples.len());
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn test_query_matches_code_only() {
        let samples = sample_snippets();
        // "setLoading" appears only in the hook's code
        let result = filter(&samples, &SearchFilters::new().with_query("SETLOADING"));
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_query_matches_title_and_description() {
        let samples = sample_snippets();

        let by_title = filter(&samples, &SearchFilters::new().with_query("custom HOOK"));
        assert_eq!(ids(&by_title), vec!["2"]);

        let by_desc = filter(&samples, &SearchFilters::new().with_query("error handling"));
        assert_eq!(ids(&by_desc), vec!["1"]);

        let none = filter(&samples, &SearchFilters::new().with_query("kubernetes"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_fetch_matches_in_code() {
        let s = snippet("Request helper", "await fetch('/api')", &[]);
        assert!(matches(&s, &SearchFilters::new().with_query("fetch")));
    }

    #[test]
    fn test_category_is_exact_and_case_sensitive() {
        let samples = sample_snippets();

        let utils = filter(&samples, &SearchFilters::new().with_category("Utils"));
        assert_eq!(ids(&utils), vec!["1"]);

        let lower = filter(&samples, &SearchFilters::new().with_category("utils"));
        assert!(lower.is_empty());
    }

    #[test]
    fn test_language_is_exact() {
        let samples = sample_snippets();
        let tsx = filter(&samples, &SearchFilters::new().with_language("tsx"));
        assert_eq!(ids(&tsx), vec!["2"]);

        let ts = filter(&samples, &SearchFilters::new().with_language("ts"));
        assert!(ts.is_empty());
    }

    #[test]
    fn test_single_tag() {
        let s = snippet("T", "c", &["rust", "cli"]);
        assert!(matches(&s, &SearchFilters::new().with_tags(["rust"])));
        assert!(!matches(&s, &SearchFilters::new().with_tags(["go"])));
    }

    #[test]
    fn test_tags_are_conjunctive() {
        let s = snippet("T", "c", &["a", "b"]);
        assert!(matches(&s, &SearchFilters::new().with_tags(["a", "b"])));
        assert!(matches(&s, &SearchFilters::new().with_tags(["b", "a"])));
        assert!(!matches(&s, &SearchFilters::new().with_tags(["a", "c"])));
    }

    #[test]
    fn test_shared_tag_matches_both_samples() {
        let samples = sample_snippets();
        let result = filter(&samples, &SearchFilters::new().with_tags(["async"]));
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn test_all_predicates_combine() {
        let samples = sample_snippets();
        let filters = SearchFilters::new()
            .with_query("use")
            .with_category("Frontend")
            .with_language("tsx")
            .with_tags(["react", "async"]);
        assert_eq!(ids(&filter(&samples, &filters)), vec!["2"]);

        let mismatched = filters.with_language("javascript");
        assert!(filter(&samples, &mismatched).is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let a = snippet("alpha", "x", &["t"]);
        let b = snippet("beta", "x", &[]);
        let c = snippet("gamma", "x", &["t"]);
        let all = vec![c.clone(), b, a.clone()];

        let result = filter(&all, &SearchFilters::new().with_tags(["t"]));
        assert_eq!(ids(&result), vec![c.id, a.id]);
    }
}
