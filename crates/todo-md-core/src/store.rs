//! File-backed document
//!
//! The `Store` pairs the in-memory `Document` with the file it came from.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open(path)?;
//!
//! // Mutate in memory
//! store.document_mut().done_task("Work", 2)?;
//!
//! // Rewrite the whole file
//! store.save()?;
//! ```
//!
//! One process handles one command. Two processes writing the same file
//! are not coordinated: the last one to save wins.

use std::path::{Path, PathBuf};

use crate::codec::ParseWarning;
use crate::models::Document;
use crate::storage::{StorageResult, TodoFile};

/// The todo file loaded into memory
pub struct Store {
    /// Parsed content
    doc: Document,
    /// File the content came from and is saved to
    file: TodoFile,
    /// Lines skipped while parsing
    warnings: Vec<ParseWarning>,
}

impl Store {
    /// Load an existing todo file
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let file = TodoFile::new(path);
        let parsed = file.load()?;

        Ok(Self {
            doc: parsed.document,
            file,
            warnings: parsed.warnings,
        })
    }

    /// Load the todo file, creating an empty one first if it is missing
    pub fn open_or_create(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let file = TodoFile::new(path);
        if !file.exists() {
            file.create()?;
        }
        Self::open(file.path().to_path_buf())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the document
    ///
    /// After modifying, call `save()` to persist changes.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Problems found while parsing the file
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Rewrite the file from the current document
    pub fn save(&self) -> StorageResult<()> {
        self.file.save(&self.doc)
    }
}
