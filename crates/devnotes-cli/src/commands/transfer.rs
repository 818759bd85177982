//! Export and import command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use devnotes_core::{codec, ImportSummary, SnippetRepository};

use crate::output::Output;

/// Write the whole collection as a JSON document
///
/// Without a path the document goes to a dated file in the current
/// directory; "-" writes to stdout.
pub async fn export(
    repo: &SnippetRepository,
    path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let document = codec::export(repo.all()).context("Failed to export snippets")?;

    let path =
        path.unwrap_or_else(|| PathBuf::from(codec::export_file_name(Utc::now().date_naive())));
    if is_stdout(&path) {
        println!("{}", document);
        return Ok(());
    }

    tokio::fs::write(&path, document)
        .await
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    output.success(&format!(
        "Exported {} snippet(s) to {}",
        repo.len(),
        path.display()
    ));
    Ok(())
}

/// Read a JSON document and merge the snippets whose ids are new
pub async fn import(repo: &mut SnippetRepository, path: PathBuf, output: &Output) -> Result<()> {
    let document = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read import file: {:?}", path))?;

    let imported = codec::import(&document)
        .with_context(|| format!("Failed to import {:?}", path))?;

    let summary = repo.merge_imported(imported);
    output.warn_if_unsaved(repo.last_save());

    if output.is_json() {
        println!(
            "{}",
            serde_json::json!({"admitted": summary.admitted, "skipped": summary.skipped})
        );
    } else if summary.admitted > 0 {
        output.success(&import_message(summary));
    } else {
        output.message(&import_message(summary));
    }
    Ok(())
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn import_message(summary: ImportSummary) -> String {
    if summary.admitted == 0 {
        "No new snippets to import".to_string()
    } else {
        format!("Imported {} new snippet(s)!", summary.admitted)
    }
}
