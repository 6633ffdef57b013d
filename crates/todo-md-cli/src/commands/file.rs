//! Whole-file command handlers

use std::path::Path;

use anyhow::{Context, Result};

use todo_md_core::Store;

use crate::editor;
use crate::output::Output;

/// Open the todo file in an editor
///
/// The file is reparsed afterwards so hand-edit problems show up right away.
pub fn edit(path: &Path, editor: Option<&str>, output: &Output) -> Result<()> {
    editor::edit_file(path, editor)?;

    let store = Store::open(path).context("Failed to reload todo file after editing")?;
    for warning in store.warnings() {
        output.warning(&warning.to_string());
    }
    Ok(())
}

/// Rewrite the todo file in canonical form
pub fn save(store: &Store, output: &Output) -> Result<()> {
    store.save().context("Failed to save todo file")?;
    output.success(&format!("Saved {}", store.path().display()));
    Ok(())
}
