//! View command handler

use anyhow::Result;
use serde_json::{json, Value};

use todo_md_core::render::{render_all, render_list, render_section};
use todo_md_core::{Document, DocumentError, Section};

use crate::editor;
use crate::output::{Output, OutputFormat};

/// What to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    /// Both sections
    All,
    /// One section
    Section(Section),
    /// One list, looked up in Todo first, then Done
    List(String),
}

/// Show lists as text (through the viewer if one is set) or as JSON
pub fn show(
    doc: &Document,
    target: &ViewTarget,
    viewer: Option<&str>,
    output: &Output,
) -> Result<()> {
    match output.format {
        OutputFormat::Json => output.print_json(&to_json(doc, target)?),
        OutputFormat::Quiet => output.print_text(&render(doc, target)?),
        OutputFormat::Human => {
            let text = render(doc, target)?;
            match viewer.filter(|v| !v.trim().is_empty()) {
                Some(viewer) => page(&text, viewer, output),
                None => output.print_text(&text),
            }
        }
    }
    Ok(())
}

/// Hand the text to the viewer, printing it ourselves if that fails to start
fn page(text: &str, viewer: &str, output: &Output) {
    match editor::view_text(text, viewer) {
        Ok(()) => {}
        Err(e) if e.is_launch_failure() => {
            output.warning(&format!("{}. Printing to stdout instead.", e));
            output.print_text(text);
        }
        Err(e) => output.warning(&e.to_string()),
    }
}

fn render(doc: &Document, target: &ViewTarget) -> Result<String, DocumentError> {
    Ok(match target {
        ViewTarget::All => render_all(doc),
        ViewTarget::Section(section) => render_section(*section, doc.section(*section)),
        ViewTarget::List(name) => {
            let (section, tasks) = find_list(doc, name)?;
            render_list(section, name.trim(), tasks)
        }
    })
}

fn to_json(doc: &Document, target: &ViewTarget) -> Result<Value, DocumentError> {
    Ok(match target {
        ViewTarget::All => json!({
            "todo": doc.todo,
            "done": doc.done,
        }),
        ViewTarget::Section(section) => json!({
            "section": section,
            "lists": doc.section(*section),
        }),
        ViewTarget::List(name) => {
            let (section, tasks) = find_list(doc, name)?;
            json!({
                "section": section,
                "name": name.trim(),
                "tasks": tasks,
            })
        }
    })
}

fn find_list<'a>(doc: &'a Document, name: &str) -> Result<(Section, &'a [String]), DocumentError> {
    let name = name.trim();
    [Section::Todo, Section::Done]
        .into_iter()
        .find_map(|section| doc.list(section, name).map(|tasks| (section, tasks)))
        .ok_or_else(|| DocumentError::ListNotFoundAnywhere {
            name: name.to_string(),
        })
}
