//! Tag command handlers

use anyhow::Result;

use devnotes_core::SnippetRepository;

use crate::output::Output;

/// List all tags with usage counts
pub fn list(repo: &SnippetRepository, output: &Output) -> Result<()> {
    let tags = repo.tags_with_counts();
    output.print_tags(&tags);
    Ok(())
}
