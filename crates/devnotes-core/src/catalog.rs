//! Static registries: categories, recognized languages and the first-run
//! sample snippets.

use chrono::{TimeZone, Utc};

use crate::models::{Category, Snippet};

/// Category used for imported records that carry none
pub const IMPORT_CATEGORY: &str = "General";

/// The fixed category registry
pub const CATEGORIES: &[Category] = &[
    Category {
        id: "1",
        name: "Frontend",
        color: "#3B82F6",
    },
    Category {
        id: "2",
        name: "Backend",
        color: "#8B5CF6",
    },
    Category {
        id: "3",
        name: "Database",
        color: "#F59E0B",
    },
    Category {
        id: "4",
        name: "Utils",
        color: "#10B981",
    },
    Category {
        id: "5",
        name: "API",
        color: "#EF4444",
    },
    Category {
        id: "6",
        name: "CSS",
        color: "#EC4899",
    },
    Category {
        id: "7",
        name: "DevOps",
        color: "#6366F1",
    },
];

/// Languages offered for selection. Not enforced on stored snippets.
pub const LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "jsx",
    "tsx",
    "html",
    "css",
    "scss",
    "python",
    "java",
    "csharp",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "sql",
    "json",
    "yaml",
    "xml",
    "bash",
    "powershell",
    "dockerfile",
];

/// First category in the registry, preselected for new drafts
pub fn default_category() -> &'static Category {
    &CATEGORIES[0]
}

/// Look up a registry category by name
pub fn category_by_name(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

/// Whether a language is in the selection list
pub fn is_known_language(language: &str) -> bool {
    LANGUAGES.contains(&language)
}

const FETCH_WRAPPER: &str = r#"async function fetchWrapper(url, options = {}) {
  const config = {
    headers: {
      'Content-Type': 'application/json',
      ...options.headers,
    },
    ...options,
  };

  try {
    const response = await fetch(url, config);

    if (!response.ok) {
      throw new Error(`HTTP error! status: ${response.status}`);
    }

    return await response.json();
  } catch (error) {
    console.error('Fetch error:', error);
    throw error;
  }
}"#;

const USE_ASYNC_HOOK: &str = r#"import { useState, useEffect } from 'react';

export function useAsync(asyncFunction, dependencies = []) {
  const [data, setData] = useState(null);
  const [loading, setLoading] = useState(true);
  const [error, setError] = useState(null);

  useEffect(() => {
    let isMounted = true;

    setLoading(true);
    setError(null);

    asyncFunction()
      .then(result => {
        if (isMounted) {
          setData(result);
          setLoading(false);
        }
      })
      .catch(err => {
        if (isMounted) {
          setError(err);
          setLoading(false);
        }
      });

    return () => {
      isMounted = false;
    };
  }, dependencies);

  return { data, loading, error };
}"#;

/// Snippets shown on first run, before anything has been saved
pub fn sample_snippets() -> Vec<Snippet> {
    let jan_15 = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    let jan_10 = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

    vec![
        Snippet {
            id: "1".to_string(),
            title: "Fetch Wrapper".to_string(),
            description: "Reusable fetch wrapper with error handling".to_string(),
            code: FETCH_WRAPPER.to_string(),
            language: "javascript".to_string(),
            category: "Utils".to_string(),
            tags: vec!["api".into(), "fetch".into(), "async".into()],
            created_at: jan_15,
            updated_at: jan_15,
        },
        Snippet {
            id: "2".to_string(),
            title: "React Custom Hook".to_string(),
            description: "Custom hook for managing async state".to_string(),
            code: USE_ASYNC_HOOK.to_string(),
            language: "tsx".to_string(),
            category: "Frontend".to_string(),
            tags: vec!["react".into(), "hooks".into(), "async".into()],
            created_at: jan_10,
            updated_at: jan_10,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        let api = category_by_name("API").unwrap();
        assert_eq!(api.color, "#EF4444");
        assert!(category_by_name("api").is_none());
        assert!(category_by_name("General").is_none());
    }

    #[test]
    fn test_default_category() {
        assert_eq!(default_category().name, "Frontend");
    }

    #[test]
    fn test_known_languages() {
        assert!(is_known_language("rust"));
        assert!(is_known_language("dockerfile"));
        assert!(!is_known_language("cobol"));
    }

    #[test]
    fn test_sample_snippets() {
        let samples = sample_snippets();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].id, "1");
        assert!(samples[0].code.contains("fetch(url, config)"));
        assert!(samples[1].has_tag("react"));
        // Newest first
        assert!(samples[0].created_at > samples[1].created_at);
    }
}
