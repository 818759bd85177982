//! Status command handler

use std::path::PathBuf;

use anyhow::Result;

use devnotes_core::{Config, Preferences, SnippetRepository};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(
    repo: &SnippetRepository,
    prefs: &Preferences,
    config: &Config,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let tags = repo.tags_with_counts();
    let languages = repo.languages_in_use();
    let theme = if prefs.is_dark() { "dark" } else { "light" };
    let config_file = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "backend": config.backend,
                    "config_file": config_file,
                    "theme": theme,
                    "counts": {
                        "snippets": repo.len(),
                        "tags": tags.len(),
                        "languages": languages.len()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", repo.len());
        }
        OutputFormat::Human => {
            println!("DevNotes Status");
            println!("===============");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Backend:  {}", config.backend);
            println!("  Config:   {}", config_file.display());
            println!();
            println!("Contents:");
            println!("  Snippets:  {}", repo.len());
            println!("  Tags:      {}", tags.len());
            println!("  Languages: {}", languages.len());
            println!();
            println!("Theme: {}", theme);
        }
    }

    Ok(())
}
