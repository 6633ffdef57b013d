//! Config command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use todo_md_core::Config;

use crate::output::{Output, OutputFormat};

/// Values given to `todo config`
#[derive(Debug, Default, Clone)]
pub struct ConfigUpdate {
    pub editor: Option<String>,
    pub file: Option<PathBuf>,
    pub viewer: Option<String>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.editor.is_none() && self.file.is_none() && self.viewer.is_none()
    }
}

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let effective_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    match output.format {
        OutputFormat::Json => {
            output.print_json(&serde_json::json!({
                "config_file": effective_path,
                "editor": config.editor,
                "file": config.file,
                "todo_file": config.todo_file_path(None),
                "viewer": config.viewer,
                "log_file": config.log_file
            }));
        }
        OutputFormat::Quiet => {
            println!("{}", config.todo_file_path(None).display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  editor:   {}", config.editor.as_deref().unwrap_or("(not set)"));
            println!("  file:     {}", display_path(config.file.as_deref()));
            println!("  viewer:   {}", config.viewer.as_deref().unwrap_or("(not set)"));
            println!("  log_file: {}", display_path(config.log_file.as_deref()));
            println!();
            println!("Todo file:   {}", config.todo_file_path(None).display());
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Store the given values, leaving the others as they are
///
/// An empty value (or "none") unsets a key. `TODO_MD_*` variables of the
/// current session are not written back.
pub fn set(update: ConfigUpdate, config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    let mut config = Config::load_file_only(&save_path).context("Failed to load configuration")?;

    if let Some(editor) = update.editor {
        config.editor = non_empty(editor);
    }
    if let Some(viewer) = update.viewer {
        config.viewer = non_empty(viewer);
    }
    if let Some(file) = update.file {
        config.file = match non_empty(file.to_string_lossy().into_owned()) {
            Some(_) => Some(absolute(&file)?),
            None => None,
        };
    }

    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Configuration saved to {}", save_path.display()));

    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Relative todo paths are stored against the current directory
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd.join(path))
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}
