//! Command handlers
//!
//! Each handler gets the loaded store, applies at most one mutation and
//! saves only when the document changed.

pub mod config;
pub mod file;
pub mod list;
pub mod task;
pub mod view;
