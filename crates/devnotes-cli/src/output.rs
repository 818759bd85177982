//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::io::{self, Write};

use devnotes_core::catalog::category_by_name;
use devnotes_core::{Category, SaveOutcome, Snippet};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single snippet with its code
    pub fn print_snippet(&self, snippet: &Snippet) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", snippet.id);
                println!("Title:       {}", snippet.title);
                if !snippet.description.is_empty() {
                    println!("Description: {}", snippet.description);
                }
                println!("Language:    {}", snippet.language);
                println!("Category:    {}", category_label(&snippet.category));
                if !snippet.tags.is_empty() {
                    println!("Tags:        {}", format_tags(&snippet.tags));
                }
                println!("Created:     {}", snippet.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:     {}", snippet.updated_at.format("%Y-%m-%d %H:%M"));
                println!();
                println!("── Code ({} line(s)) ──", snippet.code.lines().count());
                println!("{}", snippet.code);
            }
            OutputFormat::Json => print_json(snippet),
            OutputFormat::Quiet => {
                println!("{}", snippet.id);
            }
        }
    }

    /// Print only a snippet's code, byte for byte, in every format
    pub fn print_code(&self, snippet: &Snippet) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_code(&mut handle, snippet)
    }

    /// Print a list of snippets
    ///
    /// `filtered` selects the empty-state message.
    pub fn print_snippets(&self, snippets: &[&Snippet], filtered: bool) {
        match self.format {
            OutputFormat::Human => {
                if snippets.is_empty() {
                    if filtered {
                        println!("No snippets match the current filters.");
                    } else {
                        println!("No snippets yet. Add one with `devnotes add`.");
                    }
                    return;
                }
                for snippet in snippets {
                    println!(
                        "{:<8} | {:<35} | {:<10} | {:<8} | {}",
                        snippet.short_id(),
                        truncate(&snippet.title, 35),
                        truncate(&snippet.language, 10),
                        truncate(&snippet.category, 8),
                        truncate(&format_tags(&snippet.tags), 30)
                    );
                }
                println!("\n{} snippet(s)", snippets.len());
            }
            OutputFormat::Json => print_json(snippets),
            OutputFormat::Quiet => {
                for snippet in snippets {
                    println!("{}", snippet.id);
                }
            }
        }
    }

    /// Print a list of tags
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("#{} ({})", name, count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json_tags);
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print the category registry with usage counts
    pub fn print_categories(&self, categories: &[(Category, usize)]) {
        match self.format {
            OutputFormat::Human => {
                for (category, count) in categories {
                    println!("{:<10} {} ({})", category.name, category.color, count);
                }
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|(c, count)| {
                        serde_json::json!({
                            "id": c.id,
                            "name": c.name,
                            "color": c.color,
                            "count": count
                        })
                    })
                    .collect();
                print_json(&json);
            }
            OutputFormat::Quiet => {
                for (category, _) in categories {
                    println!("{}", category.name);
                }
            }
        }
    }

    /// Print language names, marking the ones in use
    pub fn print_languages(&self, languages: &[&str], in_use: &[String]) {
        match self.format {
            OutputFormat::Human => {
                for lang in languages {
                    let marker = if in_use.iter().any(|l| l == lang) {
                        "*"
                    } else {
                        " "
                    };
                    println!("{} {}", marker, lang);
                }
                println!("\n* = used by at least one snippet");
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "languages": languages,
                "in_use": in_use
            })),
            OutputFormat::Quiet => {
                for lang in languages {
                    println!("{}", lang);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Tell the user when the last change did not reach storage
    pub fn warn_if_unsaved(&self, outcome: SaveOutcome) {
        if outcome.is_failed() && !self.is_quiet() {
            eprintln!("⚠ Could not write to storage; changes may not survive reload.");
        }
    }
}

fn write_code<W: Write>(out: &mut W, snippet: &Snippet) -> io::Result<()> {
    out.write_all(snippet.code.as_bytes())?;
    out.flush()
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format JSON output: {}", e),
    }
}

/// Category name, with its registry colour when known
fn category_label(name: &str) -> String {
    match category_by_name(name) {
        Some(category) => format!("{} ({})", category.name, category.color),
        None => name.to_string(),
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
