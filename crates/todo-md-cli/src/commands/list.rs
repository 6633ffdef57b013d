//! List command handlers

use anyhow::{Context, Result};

use todo_md_core::{Interact, Store};

use crate::output::Output;

/// Create an empty Todo list
pub fn add(store: &mut Store, name: &str, ui: &mut dyn Interact, output: &Output) -> Result<()> {
    if store.document_mut().add_list(name, false, ui)? {
        store.save().context("Failed to save todo file")?;
        output.success(&format!("Added list '{}'", name.trim()));
    }
    Ok(())
}

/// Move a whole list from Todo to Done
pub fn done(store: &mut Store, name: &str, force: bool, output: &Output) -> Result<()> {
    let count = store.document_mut().done_list(name, force)?;

    store.save().context("Failed to save todo file")?;
    output.success(&format!(
        "Moved list '{}' to Done ({} task(s))",
        name.trim(),
        count
    ));
    Ok(())
}

/// Move a whole list from Done back to Todo
pub fn restore(store: &mut Store, name: &str, force: bool, output: &Output) -> Result<()> {
    let count = store.document_mut().restore_list(name, force)?;

    store.save().context("Failed to save todo file")?;
    output.success(&format!(
        "Restored list '{}' to Todo ({} task(s))",
        name.trim(),
        count
    ));
    Ok(())
}

/// Drop everything in the Done section
pub fn clear_done(
    store: &mut Store,
    force: bool,
    ui: &mut dyn Interact,
    output: &Output,
) -> Result<()> {
    if !store.document_mut().clear_done(force, ui) {
        output.message("Nothing deleted.");
        return Ok(());
    }

    store.save().context("Failed to save todo file")?;
    output.success("Cleared the Done section");
    Ok(())
}
