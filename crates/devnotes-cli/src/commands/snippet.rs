//! Snippet command handlers

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use devnotes_core::catalog::is_known_language;
use devnotes_core::{RepositoryError, SearchFilters, Snippet, SnippetDraft, SnippetRepository};

use crate::editor::{confirm, edit_code, stdin_is_tty};
use crate::output::Output;

/// Fields for a new snippet
#[derive(Args, Debug)]
pub struct SnippetArgs {
    /// Snippet title
    #[arg(short = 'T', long)]
    pub title: String,
    /// Code (reads stdin when piped, otherwise opens the editor)
    #[arg(long, conflicts_with = "code_file")]
    pub code: Option<String>,
    /// Read the code from a file
    #[arg(short = 'f', long, value_name = "PATH")]
    pub code_file: Option<PathBuf>,
    /// Short description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Language (see `devnotes languages`)
    #[arg(short, long)]
    pub language: Option<String>,
    /// Category (see `devnotes categories`)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Tags to add
    #[arg(short, long)]
    pub tag: Vec<String>,
}

/// Field changes for an existing snippet
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// New title
    #[arg(short = 'T', long)]
    pub title: Option<String>,
    /// New description ("" to clear)
    #[arg(short, long)]
    pub description: Option<String>,
    /// New code
    #[arg(long, conflicts_with_all = ["code_file", "editor"])]
    pub code: Option<String>,
    /// Read the new code from a file
    #[arg(short = 'f', long, value_name = "PATH", conflicts_with = "editor")]
    pub code_file: Option<PathBuf>,
    /// Edit the code in $EDITOR
    #[arg(short, long)]
    pub editor: bool,
    /// New language
    #[arg(short, long)]
    pub language: Option<String>,
    /// New category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Replace all tags
    #[arg(short, long)]
    pub tag: Vec<String>,
    /// Add a tag
    #[arg(long)]
    pub add_tag: Vec<String>,
    /// Remove a tag
    #[arg(long)]
    pub remove_tag: Vec<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.code.is_none()
            && self.code_file.is_none()
            && !self.editor
            && self.language.is_none()
            && self.category.is_none()
            && self.tag.is_empty()
            && self.add_tag.is_empty()
            && self.remove_tag.is_empty()
    }

    /// Apply the requested changes on top of `draft`
    fn apply_to(self, mut draft: SnippetDraft) -> Result<SnippetDraft> {
        if self.editor {
            let language = self.language.as_deref().unwrap_or(&draft.language);
            draft.code = edit_code(&draft.code, language)?;
        } else if let Some(code) = self.code {
            draft.code = code;
        } else if let Some(path) = self.code_file {
            draft.code = read_code_file(&path)?;
        }

        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(language) = self.language {
            draft.language = language;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if !self.tag.is_empty() {
            draft = draft.with_tags(self.tag);
        }
        for tag in self.add_tag {
            draft.add_tag(tag);
        }
        for tag in &self.remove_tag {
            remove_tag_ignoring_case(&mut draft, tag);
        }

        Ok(draft)
    }
}

/// Create a new snippet
pub fn add(repo: &mut SnippetRepository, args: SnippetArgs, output: &Output) -> Result<()> {
    let mut draft = SnippetDraft::default().with_tags(args.tag);
    if let Some(language) = args.language {
        draft.language = language;
    }
    if let Some(category) = args.category {
        draft.category = category;
    }
    draft.title = args.title;
    draft.description = args.description.unwrap_or_default();
    draft.code = match (args.code, args.code_file) {
        (Some(code), _) => code,
        (None, Some(path)) => read_code_file(&path)?,
        (None, None) if !stdin_is_tty() => read_stdin()?,
        (None, None) => edit_code("", &draft.language)?,
    };

    warn_if_unknown_language(&draft.language, output);
    let snippet = repo.create(draft).context("Failed to create snippet")?;
    output.warn_if_unsaved(repo.last_save());

    output.success(&format!("Created snippet: {}", snippet.id));
    output.print_snippet(&snippet);

    Ok(())
}

/// List snippets matching the given filters
pub fn list(
    repo: &SnippetRepository,
    query: Option<String>,
    category: Option<String>,
    language: Option<String>,
    tags: Vec<String>,
    output: &Output,
) -> Result<()> {
    let filters = build_filters(query, category, language, tags);
    let snippets = repo.filter(&filters);

    output.print_snippets(&snippets, !filters.is_empty());
    Ok(())
}

/// Show a single snippet, or only its code when `code_only` is set
pub fn show(repo: &SnippetRepository, id: &str, code_only: bool, output: &Output) -> Result<()> {
    let snippet = resolve(repo, id)?;
    if code_only {
        output.print_code(snippet)?;
    } else {
        output.print_snippet(snippet);
    }
    Ok(())
}

/// Edit a snippet; fields not given on the command line are kept
pub fn edit(
    repo: &mut SnippetRepository,
    id: &str,
    changes: EditArgs,
    output: &Output,
) -> Result<()> {
    if changes.is_empty() {
        bail!("Nothing to change. Pass at least one field (see `devnotes edit --help`).");
    }

    let current = resolve(repo, id)?;
    let snippet_id = current.id.clone();
    let draft = changes.apply_to(SnippetDraft::from_snippet(current))?;
    warn_if_unknown_language(&draft.language, output);

    let updated = repo
        .update(&snippet_id, draft)
        .context("Failed to update snippet")?;
    output.warn_if_unsaved(repo.last_save());

    output.success("Snippet updated");
    output.print_snippet(&updated);

    Ok(())
}

/// Delete a snippet
pub fn delete(repo: &mut SnippetRepository, id: &str, yes: bool, output: &Output) -> Result<()> {
    let snippet = resolve(repo, id)?;
    let snippet_id = snippet.id.clone();

    if output.should_prompt() && !yes {
        println!("Delete snippet: {} - {}", snippet.short_id(), snippet.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    repo.delete(&snippet_id);
    output.warn_if_unsaved(repo.last_save());

    output.success(&format!("Deleted snippet: {}", snippet_id));

    Ok(())
}

fn build_filters(
    query: Option<String>,
    category: Option<String>,
    language: Option<String>,
    tags: Vec<String>,
) -> SearchFilters {
    let mut filters = SearchFilters::new().with_tags(tags);
    if let Some(query) = query {
        filters = filters.with_query(query);
    }
    if let Some(category) = category {
        filters = filters.with_category(category);
    }
    if let Some(language) = language {
        filters = filters.with_language(language);
    }
    filters
}

/// Look up a snippet by id or prefix, listing candidates when ambiguous
fn resolve<'a>(repo: &'a SnippetRepository, id: &str) -> Result<&'a Snippet> {
    match repo.resolve(id) {
        Ok(snippet) => Ok(snippet),
        Err(RepositoryError::Ambiguous { prefix, candidates }) => {
            eprintln!("Multiple snippets match '{}':", prefix);
            for candidate in &candidates {
                if let Some(s) = repo.get(candidate) {
                    eprintln!("  {} - {}", s.id, s.title);
                }
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
        Err(e) => Err(e.into()),
    }
}

/// Drop a tag regardless of case; imported tags keep their original case
fn remove_tag_ignoring_case(draft: &mut SnippetDraft, tag: &str) {
    let wanted = tag.trim().to_lowercase();
    let matching: Vec<String> = draft
        .tags
        .iter()
        .filter(|t| t.to_lowercase() == wanted)
        .cloned()
        .collect();
    for existing in matching {
        draft.remove_tag(&existing);
    }
}

fn unknown_language_note(language: &str) -> Option<String> {
    if is_known_language(language) {
        None
    } else {
        Some(format!(
            "Note: '{}' is not a known language (see `devnotes languages`)",
            language
        ))
    }
}

fn warn_if_unknown_language(language: &str, output: &Output) {
    if output.is_quiet() {
        return;
    }
    if let Some(note) = unknown_language_note(language) {
        eprintln!("{}", note);
    }
}

fn read_code_file(path: &PathBuf) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read code from {:?}", path))
}

fn read_stdin() -> Result<String> {
    let mut code = String::new();
    std::io::stdin()
        .read_to_string(&mut code)
        .context("Failed to read code from stdin")?;
    Ok(code)
}
