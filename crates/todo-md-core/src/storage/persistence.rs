//! Todo file persistence
//!
//! Handles loading the todo file from disk and writing it back.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Default location: `~/TODO.md` (configurable via `Config`)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::codec::{self, Parsed, SKELETON};
use crate::models::Document;
use crate::storage::error::{StorageError, StorageResult};

/// The todo file on disk
#[derive(Debug, Clone)]
pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    /// Create a handle for the file at `path` (nothing is read yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the todo file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the file
    ///
    /// A missing file is `StorageError::NotFound`; content that is not UTF-8
    /// is `StorageError::InvalidFormat`. Structural problems inside the text
    /// are only warnings on the returned `Parsed`.
    pub fn load(&self) -> StorageResult<Parsed> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::from_read(e, self.path.clone()))?;

        let parsed = codec::parse(&text);
        debug!(
            path = %self.path.display(),
            todo_lists = parsed.document.todo.len(),
            done_lists = parsed.document.done.len(),
            warnings = parsed.warnings.len(),
            "loaded todo file"
        );
        Ok(parsed)
    }

    /// Create the file with empty Todo and Done sections
    pub fn create(&self) -> StorageResult<()> {
        atomic_write(&self.path, SKELETON.as_bytes())?;
        debug!(path = %self.path.display(), "created todo file");
        Ok(())
    }

    /// Rewrite the whole file from `doc`
    pub fn save(&self, doc: &Document) -> StorageResult<()> {
        atomic_write(&self.path, codec::serialize(doc).as_bytes())?;
        debug!(path = %self.path.display(), "saved todo file");
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a uniquely named temporary file next to the target
/// 2. Sync the file to disk and copy the target's permissions
/// 3. Rename the temp file over the target
///
/// A symlinked todo file is written through: the link's target is replaced
/// and the link itself stays. Concurrent writers never share a temp file.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
        path: parent.to_path_buf(),
        source,
    })?;

    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    // Same directory, so the rename stays on one filesystem
    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;
    let temp_path = temp.path().to_path_buf();

    temp.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    }

    temp.persist(&target)
        .map_err(|e| StorageError::AtomicWriteFailed {
            from: temp_path,
            to: target,
            source: e.error,
        })?;

    Ok(())
}
