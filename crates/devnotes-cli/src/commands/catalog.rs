//! Category and language listings

use anyhow::Result;

use devnotes_core::catalog::{CATEGORIES, LANGUAGES};
use devnotes_core::{Category, Snippet, SnippetRepository};

use crate::output::Output;

/// List the category registry with how many snippets use each
pub fn categories(repo: &SnippetRepository, output: &Output) -> Result<()> {
    output.print_categories(&category_counts(repo.all()));
    Ok(())
}

/// List the selectable languages, marking those in use
pub fn languages(repo: &SnippetRepository, output: &Output) -> Result<()> {
    output.print_languages(LANGUAGES, &repo.languages_in_use());
    Ok(())
}

fn category_counts(snippets: &[Snippet]) -> Vec<(Category, usize)> {
    CATEGORIES
        .iter()
        .map(|category| {
            let count = snippets
                .iter()
                .filter(|s| s.category == category.name)
                .count();
            (*category, count)
        })
        .collect()
}
