//! todo-md Core Library
//!
//! This crate provides the core functionality for todo-md, a command-line
//! todo list manager that keeps its state in a single markdown-like text file.
//!
//! # Architecture
//!
//! - **Document**: two sections (Todo, Done), each an ordered map of named
//!   lists of tasks. All mutation rules live here.
//! - **Codec**: parses the text file into a `Document` and serializes it back.
//!
//! Every command loads the whole file, applies one mutation in memory and
//! rewrites the whole file.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open_or_create(path)?;
//!
//! // Add a task, resolving the list name through the interaction port
//! store.document_mut().add_task("Work", "Write report", &mut ui)?;
//! store.save()?;
//! ```
//!
//! # Modules
//!
//! - `store`: file-backed document (main entry point)
//! - `models`: sections and the document structure
//! - `document`: mutation operations and their errors
//! - `interact`: the prompt/notice port injected into mutations
//! - `resolve`: list name resolution (exact, fuzzy, confirm-create)
//! - `codec`: text format parsing and serialization
//! - `render`: plain-text display blocks
//! - `storage`: file persistence
//! - `config`: application configuration

pub mod codec;
pub mod config;
pub mod document;
pub mod interact;
pub mod models;
pub mod render;
pub mod resolve;
pub mod storage;
pub mod store;

pub use codec::{ParseWarning, Parsed, WarningKind};
pub use config::{Config, ConfigError, ConfigFormat};
pub use document::{Bound, DocumentError};
pub use interact::{AssumeYes, Choice, Interact};
pub use models::{Document, Scope, Section, TaskLists};
pub use resolve::Resolution;
pub use storage::{StorageError, TodoFile};
pub use store::Store;
