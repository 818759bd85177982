//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use devnotes_core::{Backend, Config};

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "backend": config.backend,
                    "log_file": config.log_file,
                    "seed_samples": config.seed_samples
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:     {}", config.data_dir.display());
            println!("  backend:      {}", config.backend);
            println!(
                "  log_file:     {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  seed_samples: {}", config.seed_samples);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "backend" => {
            config.backend = value.parse::<Backend>()?;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "seed_samples" => {
            config.seed_samples = value
                .parse()
                .context("Invalid value for seed_samples. Use 'true' or 'false'.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, backend, log_file, seed_samples",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "backend", "sqlite").unwrap();
        assert_eq!(config.backend, Backend::Sqlite);

        apply(&mut config, "seed_samples", "false").unwrap();
        assert!(!config.seed_samples);

        apply(&mut config, "log_file", "/tmp/devnotes.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/devnotes.log")));

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply(&mut config, "backend", "postgres").is_err());
        assert!(apply(&mut config, "seed_samples", "maybe").is_err());
        assert!(apply(&mut config, "sync_url", "x").is_err());
    }

    #[test]
    fn test_set_writes_to_cli_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let data_dir = temp.path().join("data");
        std::fs::write(&path, format!("data_dir = {:?}\n", data_dir.display().to_string()))
            .unwrap();
        let output = Output::new(OutputFormat::Quiet);

        set(
            "backend".to_string(),
            "sqlite".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let saved = Config::load_from_path(&path).unwrap();
        assert_eq!(saved.backend, Backend::Sqlite);
        assert_eq!(saved.data_dir, data_dir);
    }
}
