//! DevNotes CLI
//!
//! Command-line interface for DevNotes - a personal code-snippet manager.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use devnotes_core::{Config, Preferences, SnippetRepository};

mod commands;
mod editor;
mod logging;
mod output;

use commands::snippet::{EditArgs, SnippetArgs};
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "devnotes")]
#[command(about = "DevNotes - Save, search and share code snippets")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use an alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new snippet
    #[command(alias = "create")]
    Add {
        #[command(flatten)]
        snippet: SnippetArgs,
    },
    /// List snippets, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Text to look for in title, description or code
        #[arg(short = 's', long = "query")]
        query: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only this language
        #[arg(short, long)]
        language: Option<String>,
        /// Require a tag (repeatable; all must match)
        #[arg(short, long)]
        tag: Vec<String>,
    },
    /// Show a snippet with its code
    Show {
        /// Snippet ID (full or prefix)
        id: String,
        /// Print only the code, unchanged (e.g. to pipe into a clipboard tool)
        #[arg(long, visible_alias = "copy")]
        code: bool,
    },
    /// Edit a snippet (unspecified fields are kept)
    Edit {
        /// Snippet ID (full or prefix)
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete a snippet
    #[command(alias = "rm")]
    Delete {
        /// Snippet ID (full or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Export all snippets to a JSON file
    Export {
        /// Output file ("-" for stdout); defaults to a dated file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import snippets from a JSON file
    Import {
        /// File produced by `devnotes export`
        file: PathBuf,
    },
    /// List all tags
    Tags,
    /// List the categories
    Categories,
    /// List the known languages
    Languages,
    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (storage location, counts)
    Status,
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeCommands {
    /// Show the current theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Use the dark theme
    Dark,
    /// Use the light theme
    Light,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, backend, log_file, seed_samples)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work on the file itself, without opening storage
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    match cli.command {
        Commands::Theme { command } => {
            let mut prefs = Preferences::open(&config);
            return match command.unwrap_or(ThemeCommands::Show) {
                ThemeCommands::Show => commands::theme::show(&prefs, &output),
                ThemeCommands::Toggle => commands::theme::toggle(&mut prefs, &output),
                ThemeCommands::Dark => commands::theme::set(&mut prefs, true, &output),
                ThemeCommands::Light => commands::theme::set(&mut prefs, false, &output),
            };
        }
        Commands::Status => {
            let repo = SnippetRepository::open(&config);
            let prefs = Preferences::open(&config);
            return commands::status::show(&repo, &prefs, &config, config_path, &output);
        }
        _ => {}
    }

    let mut repo = SnippetRepository::open(&config);

    match cli.command {
        Commands::Add { snippet } => commands::snippet::add(&mut repo, snippet, &output),
        Commands::List {
            query,
            category,
            language,
            tag,
        } => commands::snippet::list(&repo, query, category, language, tag, &output),
        Commands::Show { id, code } => commands::snippet::show(&repo, &id, code, &output),
        Commands::Edit { id, changes } => {
            commands::snippet::edit(&mut repo, &id, changes, &output)
        }
        Commands::Delete { id, yes } => commands::snippet::delete(&mut repo, &id, yes, &output),
        Commands::Export { output: path } => {
            commands::transfer::export(&repo, path, &output).await
        }
        Commands::Import { file } => {
            commands::transfer::import(&mut repo, file, &output).await
        }
        Commands::Tags => commands::tag::list(&repo, &output),
        Commands::Categories => commands::catalog::categories(&repo, &output),
        Commands::Languages => commands::catalog::languages(&repo, &output),
        Commands::Theme { .. } => unreachable!(),  // Handled above
        Commands::Status => unreachable!(),        // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}
