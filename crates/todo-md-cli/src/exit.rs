//! Process exit codes
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | success, or the user declined a prompt |
//! | 1 | unexpected error |
//! | 2 | bad usage (reported by clap) |
//! | 3 | list not found |
//! | 4 | task number out of range |
//! | 5 | ambiguous list name |
//! | 6 | invalid input or list already exists |
//! | 7 | todo file or config unavailable |
//! | 8 | editor or viewer failed |

use todo_md_core::{ConfigError, DocumentError, StorageError};

use crate::editor::ToolError;

pub const UNEXPECTED: u8 = 1;
pub const NOT_FOUND: u8 = 3;
pub const OUT_OF_RANGE: u8 = 4;
pub const AMBIGUOUS: u8 = 5;
pub const INVALID_INPUT: u8 = 6;
pub const STORAGE: u8 = 7;
pub const TOOL: u8 = 8;

/// Map an error to its exit code by the first typed cause in the chain
pub fn code_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<DocumentError>() {
            return match e {
                DocumentError::ListNotFound { .. }
                | DocumentError::ListNotFoundAnywhere { .. } => NOT_FOUND,
                DocumentError::TaskOutOfRange { .. } => OUT_OF_RANGE,
                DocumentError::AmbiguousName { .. } => AMBIGUOUS,
                DocumentError::ListExists { .. }
                | DocumentError::InvalidName(_)
                | DocumentError::InvalidTask(_) => INVALID_INPUT,
            };
        }
        if cause.is::<StorageError>() || cause.is::<ConfigError>() {
            return STORAGE;
        }
        if cause.is::<ToolError>() {
            return TOOL;
        }
    }
    UNEXPECTED
}
