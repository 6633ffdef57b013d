//! Document mutations
//!
//! Every operation either applies completely or returns an error with the
//! document untouched. Positions are 1-based at this boundary.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::interact::Interact;
use crate::models::{Document, Section};
use crate::resolve::{resolve_list_name, Resolution};

/// Which position argument was out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The task being moved or reordered
    Task,
    /// The target position of a reorder
    NewPosition,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Task => f.write_str("task number"),
            Bound::NewPosition => f.write_str("new task number"),
        }
    }
}

/// Errors that can occur during document operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("No list named '{name}' in the {section} section")]
    ListNotFound { name: String, section: Section },

    #[error("No list named '{name}' in either the Todo or the Done section")]
    ListNotFoundAnywhere { name: String },

    #[error("Invalid {bound} {position} in list '{list}' (list has {len} task(s))")]
    TaskOutOfRange {
        list: String,
        position: usize,
        len: usize,
        bound: Bound,
    },

    #[error("List name '{query}' is ambiguous, it matches: {}", .candidates.join(", "))]
    AmbiguousName {
        query: String,
        candidates: Vec<String>,
    },

    #[error("List '{name}' already exists in the {section} section")]
    ListExists { name: String, section: Section },

    #[error("Invalid list name {0:?}: must be non-empty and on a single line")]
    InvalidName(String),

    #[error("Invalid task {0:?}: must be non-empty and on a single line")]
    InvalidTask(String),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

impl Document {
    /// Create an empty list in Todo unless it already exists
    ///
    /// Returns whether a list was created. An existing list is never touched;
    /// unless `quiet`, the no-op is reported through `ui`.
    pub fn add_list(
        &mut self,
        name: &str,
        quiet: bool,
        ui: &mut dyn Interact,
    ) -> DocumentResult<bool> {
        let name = clean_name(name)?;

        if self.todo.contains_key(name) {
            if !quiet {
                ui.notice(&format!("List '{}' already exists. No new list created.", name));
            }
            return Ok(false);
        }

        self.todo.insert(name.to_string(), Vec::new());
        debug!(list = name, "added list");
        Ok(true)
    }

    /// Append a task to a Todo list, resolving the list name first
    ///
    /// Returns the name of the list the task went to, or `None` when the
    /// user aborted name resolution.
    pub fn add_task(
        &mut self,
        list_name: &str,
        task: &str,
        ui: &mut dyn Interact,
    ) -> DocumentResult<Option<String>> {
        let list_name = clean_name(list_name)?;
        let task = clean_task(task)?;

        let name = match resolve_list_name(&self.todo, list_name, true, ui)? {
            Resolution::Existing(name) | Resolution::New(name) => name,
            Resolution::Aborted => return Ok(None),
        };

        self.add_list(&name, true, ui)?;
        self.todo
            .entry(name.clone())
            .or_default()
            .push(task.to_string());
        debug!(list = %name, task, "added task");
        Ok(Some(name))
    }

    /// Move the task at `old_position` to `new_position` within a Todo list
    ///
    /// The list must already exist. Returns the resolved list name and the
    /// moved task, or `None` when the user aborted.
    pub fn order_task(
        &mut self,
        list_name: &str,
        old_position: usize,
        new_position: usize,
        ui: &mut dyn Interact,
    ) -> DocumentResult<Option<(String, String)>> {
        let name = match resolve_list_name(&self.todo, list_name.trim(), false, ui)? {
            Resolution::Existing(name) => name,
            Resolution::New(_) | Resolution::Aborted => return Ok(None),
        };

        let tasks = self
            .todo
            .get_mut(&name)
            .ok_or_else(|| DocumentError::ListNotFound {
                name: name.clone(),
                section: Section::Todo,
            })?;

        check_position(&name, old_position, tasks.len(), Bound::Task)?;
        check_position(&name, new_position, tasks.len(), Bound::NewPosition)?;

        let task = tasks.remove(old_position - 1);
        tasks.insert(new_position - 1, task.clone());
        debug!(list = %name, old_position, new_position, "reordered task");
        Ok(Some((name, task)))
    }

    /// Move a task from Todo to the end of the Done list of the same name
    pub fn done_task(&mut self, list_name: &str, task_number: usize) -> DocumentResult<String> {
        self.move_task(Section::Todo, list_name, task_number)
    }

    /// Move a task from Done back to the end of the Todo list of the same name
    pub fn restore_task(&mut self, list_name: &str, task_number: usize) -> DocumentResult<String> {
        self.move_task(Section::Done, list_name, task_number)
    }

    /// Move a whole list from Todo to Done
    ///
    /// Fails with `ListExists` if Done already has a list of that name,
    /// unless `overwrite` is set, in which case the Done entry is replaced.
    /// Returns the number of tasks moved.
    pub fn done_list(&mut self, list_name: &str, overwrite: bool) -> DocumentResult<usize> {
        self.move_list(Section::Todo, list_name, overwrite)
    }

    /// Move a whole list from Done back to Todo (see `done_list`)
    pub fn restore_list(&mut self, list_name: &str, overwrite: bool) -> DocumentResult<usize> {
        self.move_list(Section::Done, list_name, overwrite)
    }

    /// Remove every list from Done
    ///
    /// Without `force` the user has to confirm. Returns whether anything was
    /// cleared.
    pub fn clear_done(&mut self, force: bool, ui: &mut dyn Interact) -> bool {
        if !force && !ui.confirm("Are you sure to delete all the done tasks and done lists?") {
            return false;
        }

        debug!(lists = self.done.len(), "cleared done section");
        self.done.clear();
        true
    }

    fn move_task(
        &mut self,
        from: Section,
        list_name: &str,
        task_number: usize,
    ) -> DocumentResult<String> {
        let list_name = list_name.trim();
        let source = self
            .section_mut(from)
            .get_mut(list_name)
            .ok_or_else(|| DocumentError::ListNotFound {
                name: list_name.to_string(),
                section: from,
            })?;

        check_position(list_name, task_number, source.len(), Bound::Task)?;
        let task = source.remove(task_number - 1);

        self.section_mut(from.other())
            .entry(list_name.to_string())
            .or_default()
            .push(task.clone());
        debug!(list = list_name, task = %task, from = %from, "moved task");
        Ok(task)
    }

    fn move_list(
        &mut self,
        from: Section,
        list_name: &str,
        overwrite: bool,
    ) -> DocumentResult<usize> {
        let list_name = list_name.trim();
        let to = from.other();

        if !self.section(from).contains_key(list_name) {
            return Err(DocumentError::ListNotFound {
                name: list_name.to_string(),
                section: from,
            });
        }
        if !overwrite && self.section(to).contains_key(list_name) {
            return Err(DocumentError::ListExists {
                name: list_name.to_string(),
                section: to,
            });
        }

        let tasks = self
            .section_mut(from)
            .shift_remove(list_name)
            .unwrap_or_default();
        let count = tasks.len();
        self.section_mut(to).insert(list_name.to_string(), tasks);
        debug!(list = list_name, from = %from, count, "moved list");
        Ok(count)
    }
}

fn check_position(list: &str, position: usize, len: usize, bound: Bound) -> DocumentResult<()> {
    if (1..=len).contains(&position) {
        Ok(())
    } else {
        Err(DocumentError::TaskOutOfRange {
            list: list.to_string(),
            position,
            len,
            bound,
        })
    }
}

/// Trim a list name and reject what the file format cannot hold
fn clean_name(name: &str) -> DocumentResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
        return Err(DocumentError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

fn clean_task(task: &str) -> DocumentResult<&str> {
    let trimmed = task.trim();
    if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
        return Err(DocumentError::InvalidTask(task.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::{AssumeYes, Scripted};

    fn tasks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn work_doc() -> Document {
        let mut doc = Document::new();
        doc.todo.insert("Work".to_string(), tasks(&["A", "B", "C"]));
        doc
    }

    #[test]
    fn test_add_list_creates_once() {
        let mut doc = Document::new();
        let mut ui = Scripted::new();

        assert!(doc.add_list("Work", false, &mut ui).unwrap());
        doc.todo.get_mut("Work").unwrap().push("keep me".to_string());

        assert!(!doc.add_list("Work", false, &mut ui).unwrap());
        assert_eq!(doc.todo["Work"], tasks(&["keep me"]));
        assert_eq!(ui.transcript.len(), 1);
        assert!(ui.transcript[0].contains("already exists"));
    }

    #[test]
    fn test_add_list_quiet_is_silent() {
        let mut doc = work_doc();
        let mut ui = Scripted::new();

        assert!(!doc.add_list("Work", true, &mut ui).unwrap());
        assert!(ui.transcript.is_empty());
    }

    #[test]
    fn test_add_list_rejects_blank_names() {
        let mut doc = Document::new();

        assert!(matches!(
            doc.add_list("   ", false, &mut AssumeYes),
            Err(DocumentError::InvalidName(_))
        ));
        assert!(matches!(
            doc.add_list("two\nlines", false, &mut AssumeYes),
            Err(DocumentError::InvalidName(_))
        ));
        assert!(doc.todo.is_empty());
    }

    #[test]
    fn test_add_task_to_existing_list() {
        let mut doc = work_doc();
        let mut ui = Scripted::new();

        let list = doc.add_task("Work", "D", &mut ui).unwrap();

        assert_eq!(list.as_deref(), Some("Work"));
        assert_eq!(doc.todo["Work"], tasks(&["A", "B", "C", "D"]));
        assert!(ui.transcript.is_empty());
    }

    #[test]
    fn test_add_task_to_new_list_after_confirmation() {
        let mut doc = crate::codec::parse("# Todo\n\n# Done\n").document;
        let mut ui = Scripted::new().confirm_with(true);

        let list = doc.add_task("NewList", "x", &mut ui).unwrap();

        assert_eq!(list.as_deref(), Some("NewList"));
        assert_eq!(doc.todo.len(), 1);
        assert_eq!(doc.todo["NewList"], tasks(&["x"]));
        assert!(doc.done.is_empty());
    }

    #[test]
    fn test_add_task_declined_changes_nothing() {
        let mut doc = work_doc();
        let before = doc.clone();
        let mut ui = Scripted::new().confirm_with(false);

        assert_eq!(doc.add_task("Garden", "Weed", &mut ui).unwrap(), None);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_task_through_suggestion() {
        let mut doc = work_doc();
        let mut ui = Scripted::new().choose_with("1");

        let list = doc.add_task("wor", "D", &mut ui).unwrap();

        assert_eq!(list.as_deref(), Some("Work"));
        assert_eq!(doc.todo["Work"].last().unwrap(), "D");
        assert!(!doc.todo.contains_key("wor"));
    }

    #[test]
    fn test_add_task_new_list_despite_suggestion() {
        let mut doc = work_doc();
        let mut ui = Scripted::new().choose_with("0");

        doc.add_task("wor", "D", &mut ui).unwrap();

        assert_eq!(doc.todo["wor"], tasks(&["D"]));
        assert_eq!(doc.todo["Work"], tasks(&["A", "B", "C"]));
    }

    #[test]
    fn test_add_task_rejects_empty_task() {
        let mut doc = work_doc();
        let before = doc.clone();

        let err = doc.add_task("Work", "  ", &mut AssumeYes).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidTask(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_add_task_allows_duplicates() {
        let mut doc = work_doc();
        doc.add_task("Work", "A", &mut AssumeYes).unwrap();
        assert_eq!(doc.todo["Work"], tasks(&["A", "B", "C", "A"]));
    }

    #[test]
    fn test_order_then_done_scenario() {
        let mut doc = work_doc();
        let mut ui = Scripted::new();

        let (list, task) = doc.order_task("Work", 3, 1, &mut ui).unwrap().unwrap();
        assert_eq!(list, "Work");
        assert_eq!(task, "C");
        assert_eq!(doc.todo["Work"], tasks(&["C", "A", "B"]));

        let done = doc.done_task("Work", 2).unwrap();
        assert_eq!(done, "A");
        assert_eq!(doc.done["Work"], tasks(&["A"]));
        assert_eq!(doc.todo["Work"], tasks(&["C", "B"]));
    }

    #[test]
    fn test_order_task_moves_down() {
        let mut doc = work_doc();
        doc.order_task("Work", 1, 3, &mut AssumeYes).unwrap();
        assert_eq!(doc.todo["Work"], tasks(&["B", "C", "A"]));
    }

    #[test]
    fn test_order_bounds_report_offending_argument() {
        let mut doc = work_doc();
        let before = doc.clone();

        let err = doc.order_task("Work", 0, 1, &mut AssumeYes).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::TaskOutOfRange {
                bound: Bound::Task,
                position: 0,
                ..
            }
        ));

        let err = doc.order_task("Work", 4, 1, &mut AssumeYes).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::TaskOutOfRange {
                bound: Bound::Task,
                position: 4,
                ..
            }
        ));

        let err = doc.order_task("Work", 1, 4, &mut AssumeYes).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::TaskOutOfRange {
                bound: Bound::NewPosition,
                position: 4,
                len: 3,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Invalid new task number 4 in list 'Work' (list has 3 task(s))"
        );

        assert_eq!(doc, before);
    }

    #[test]
    fn test_order_never_creates_list() {
        let mut doc = work_doc();
        let before = doc.clone();

        let err = doc.order_task("Garden", 1, 1, &mut AssumeYes).unwrap_err();
        assert!(matches!(err, DocumentError::ListNotFound { .. }));

        let mut ui = Scripted::new().choose_with("0");
        assert_eq!(doc.order_task("wor", 1, 2, &mut ui).unwrap(), None);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_done_task_errors_leave_document_unchanged() {
        let mut doc = work_doc();
        let before = doc.clone();

        let err = doc.done_task("Garden", 1).unwrap_err();
        assert_eq!(
            err,
            DocumentError::ListNotFound {
                name: "Garden".to_string(),
                section: Section::Todo
            }
        );

        let err = doc.done_task("Work", 5).unwrap_err();
        assert_eq!(err.to_string(), "Invalid task number 5 in list 'Work' (list has 3 task(s))");

        assert_eq!(doc, before);
    }

    #[test]
    fn test_done_then_restore_appends_to_end() {
        let mut doc = work_doc();

        doc.done_task("Work", 1).unwrap();
        assert_eq!(doc.todo["Work"], tasks(&["B", "C"]));

        let restored = doc.restore_task("Work", 1).unwrap();
        assert_eq!(restored, "A");
        assert_eq!(doc.todo["Work"], tasks(&["B", "C", "A"]));
        assert!(doc.done["Work"].is_empty());
    }

    #[test]
    fn test_restore_task_creates_todo_list() {
        let mut doc = Document::new();
        doc.done.insert("Home".to_string(), tasks(&["Dishes"]));

        doc.restore_task("Home", 1).unwrap();

        assert_eq!(doc.todo["Home"], tasks(&["Dishes"]));
        assert!(doc.done["Home"].is_empty());
    }

    #[test]
    fn test_done_list_moves_whole_list() {
        let mut doc = work_doc();
        doc.todo.insert("Home".to_string(), tasks(&["Dishes"]));

        assert_eq!(doc.done_list("Work", false).unwrap(), 3);

        assert!(!doc.todo.contains_key("Work"));
        assert_eq!(doc.done["Work"], tasks(&["A", "B", "C"]));
        assert_eq!(doc.todo.keys().collect::<Vec<_>>(), vec!["Home"]);
    }

    #[test]
    fn test_done_list_collision_policy() {
        let mut doc = work_doc();
        doc.done.insert("Work".to_string(), tasks(&["Old"]));
        let before = doc.clone();

        let err = doc.done_list("Work", false).unwrap_err();
        assert_eq!(
            err,
            DocumentError::ListExists {
                name: "Work".to_string(),
                section: Section::Done
            }
        );
        assert_eq!(doc, before);

        doc.done_list("Work", true).unwrap();
        assert_eq!(doc.done["Work"], tasks(&["A", "B", "C"]));
        assert!(!doc.todo.contains_key("Work"));
    }

    #[test]
    fn test_restore_list_missing() {
        let mut doc = work_doc();
        let err = doc.restore_list("Work", false).unwrap_err();
        assert!(matches!(err, DocumentError::ListNotFound { section: Section::Done, .. }));
    }

    #[test]
    fn test_restore_list_keeps_empty_list() {
        let mut doc = Document::new();
        doc.done.insert("Empty".to_string(), Vec::new());

        assert_eq!(doc.restore_list("Empty", false).unwrap(), 0);
        assert!(doc.todo["Empty"].is_empty());
        assert!(doc.done.is_empty());
    }

    #[test]
    fn test_clear_done_needs_confirmation() {
        let mut doc = work_doc();
        doc.done_list("Work", false).unwrap();

        let mut ui = Scripted::new().confirm_with(false);
        assert!(!doc.clear_done(false, &mut ui));
        assert_eq!(doc.done.len(), 1);

        let mut ui = Scripted::new().confirm_with(true);
        assert!(doc.clear_done(false, &mut ui));
        assert!(doc.done.is_empty());
    }

    #[test]
    fn test_clear_done_force_is_idempotent() {
        let mut doc = work_doc();
        doc.done_task("Work", 1).unwrap();
        let mut ui = Scripted::new();

        assert!(doc.clear_done(true, &mut ui));
        assert!(doc.done.is_empty());
        assert!(doc.clear_done(true, &mut ui));
        assert!(doc.done.is_empty());
        assert!(ui.transcript.is_empty());
    }
}
