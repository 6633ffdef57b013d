//! Task command handlers

use anyhow::{Context, Result};

use todo_md_core::{Interact, Store};

use crate::output::Output;

/// Append a task to a Todo list
pub fn add(
    store: &mut Store,
    list: &str,
    task: &str,
    ui: &mut dyn Interact,
    output: &Output,
) -> Result<()> {
    let Some(name) = store.document_mut().add_task(list, task, ui)? else {
        output.message("Aborted, nothing changed.");
        return Ok(());
    };

    store.save().context("Failed to save todo file")?;
    output.success(&format!("Added task '{}' to list '{}'", task.trim(), name));
    Ok(())
}

/// Move a task from Todo to Done
pub fn done(store: &mut Store, list: &str, number: usize, output: &Output) -> Result<()> {
    let task = store.document_mut().done_task(list, number)?;

    store.save().context("Failed to save todo file")?;
    output.success(&format!("Done: '{}' from list '{}'", task, list.trim()));
    Ok(())
}

/// Move a task from Done back to Todo
pub fn restore(store: &mut Store, list: &str, number: usize, output: &Output) -> Result<()> {
    let task = store.document_mut().restore_task(list, number)?;

    store.save().context("Failed to save todo file")?;
    output.success(&format!("Restored: '{}' to list '{}'", task, list.trim()));
    Ok(())
}

/// Move a task to a new position within its Todo list
pub fn order(
    store: &mut Store,
    list: &str,
    old: usize,
    new: usize,
    ui: &mut dyn Interact,
    output: &Output,
) -> Result<()> {
    let Some((name, task)) = store.document_mut().order_task(list, old, new, ui)? else {
        output.message("Aborted, nothing changed.");
        return Ok(());
    };

    if old != new {
        store.save().context("Failed to save todo file")?;
    }
    output.success(&format!(
        "Moved '{}' in list '{}' from {} to {}",
        task, name, old, new
    ));
    Ok(())
}
