//! Storage layer
//!
//! Handles reading and writing the todo file. The file is always rewritten
//! in full; a write never leaves a mix of old and new content behind.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::TodoFile;
