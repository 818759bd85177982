//! Theme command handlers

use anyhow::Result;

use devnotes_core::{Preferences, SaveOutcome};

use crate::output::{Output, OutputFormat};

/// Show the current theme
pub fn show(prefs: &Preferences, output: &Output) -> Result<()> {
    print_theme(prefs.is_dark(), output);
    Ok(())
}

/// Switch between dark and light
pub fn toggle(prefs: &mut Preferences, output: &Output) -> Result<()> {
    let (dark, outcome) = prefs.toggle();
    report(dark, outcome, output);
    Ok(())
}

/// Select a theme explicitly
pub fn set(prefs: &mut Preferences, dark: bool, output: &Output) -> Result<()> {
    let outcome = prefs.set_dark(dark);
    report(dark, outcome, output);
    Ok(())
}

fn report(dark: bool, outcome: SaveOutcome, output: &Output) {
    output.warn_if_unsaved(outcome);
    if output.is_json() {
        print_theme(dark, output);
    } else {
        output.success(&format!("Theme set to {}", theme_name(dark)));
    }
}

fn print_theme(dark: bool, output: &Output) {
    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({"theme": theme_name(dark), "dark_mode": dark})
            );
        }
        OutputFormat::Quiet | OutputFormat::Human => println!("{}", theme_name(dark)),
    }
}

fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}
