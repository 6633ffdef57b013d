//! Data models for todo-md
//!
//! Defines the core data structures: sections, task lists and the
//! two-section document. A task is a plain text label; a list is a name
//! mapped to an ordered sequence of tasks.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named lists of tasks, in insertion order
///
/// Insertion order is the order lists are written back to the file.
pub type TaskLists = IndexMap<String, Vec<String>>;

/// One of the two top-level sections of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Pending tasks
    Todo,
    /// Completed tasks
    Done,
}

impl Section {
    /// Header text as it appears after `# ` in the file
    pub fn header(self) -> &'static str {
        match self {
            Section::Todo => "Todo",
            Section::Done => "Done",
        }
    }

    /// Recognize a section header (case-sensitive)
    pub fn from_header(name: &str) -> Option<Self> {
        match name {
            "Todo" => Some(Section::Todo),
            "Done" => Some(Section::Done),
            _ => None,
        }
    }

    /// The section tasks move to when done or restored
    pub fn other(self) -> Self {
        match self {
            Section::Todo => Section::Done,
            Section::Done => Section::Todo,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Where to look a list name up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Todo,
    Done,
    Any,
}

/// The whole todo file in memory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Active lists
    pub todo: TaskLists,
    /// Completed lists
    pub done: TaskLists,
}

impl Document {
    /// Create an empty document (both sections empty)
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists of a section
    pub fn section(&self, section: Section) -> &TaskLists {
        match section {
            Section::Todo => &self.todo,
            Section::Done => &self.done,
        }
    }

    /// Mutable lists of a section
    pub fn section_mut(&mut self, section: Section) -> &mut TaskLists {
        match section {
            Section::Todo => &mut self.todo,
            Section::Done => &mut self.done,
        }
    }

    /// Tasks of a single list, if it exists in the section
    pub fn list(&self, section: Section, name: &str) -> Option<&[String]> {
        self.section(section).get(name).map(Vec::as_slice)
    }

    /// Does `name` exist in the given scope
    pub fn has_list(&self, name: &str, scope: Scope) -> bool {
        match scope {
            Scope::Todo => self.todo.contains_key(name),
            Scope::Done => self.done.contains_key(name),
            Scope::Any => self.todo.contains_key(name) || self.done.contains_key(name),
        }
    }
}
