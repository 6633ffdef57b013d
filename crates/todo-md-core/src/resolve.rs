//! List name resolution
//!
//! A list name typed on the command line is resolved in two tiers:
//!
//! 1. An exact match in the Todo section wins immediately.
//! 2. Otherwise every Todo list whose name contains the query
//!    (case-insensitive) is offered. The user picks one, asks for a new
//!    list under the typed name, or aborts.
//!
//! With no similar names at all, creating the list needs an explicit yes.

use tracing::debug;

use crate::document::DocumentError;
use crate::interact::{Choice, Interact};
use crate::models::{Section, TaskLists};

/// Outcome of resolving a typed list name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An existing list, possibly picked from the suggestions
    Existing(String),
    /// A list that does not exist yet and may be created
    New(String),
    /// The user declined; nothing may change
    Aborted,
}

/// Names containing `query` (case-insensitive), in list order
pub fn match_list_names(lists: &TaskLists, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    lists
        .keys()
        .filter(|name| name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Resolve `query` against `lists`
///
/// `allow_new` is false for operations that need an existing list. When
/// similar names exist but `ui` cannot ask anyone, the name is reported as
/// ambiguous instead of guessed.
pub fn resolve_list_name(
    lists: &TaskLists,
    query: &str,
    allow_new: bool,
    ui: &mut dyn Interact,
) -> Result<Resolution, DocumentError> {
    if lists.contains_key(query) {
        return Ok(Resolution::Existing(query.to_string()));
    }

    let candidates = match_list_names(lists, query);
    debug!(query, candidates = candidates.len(), "no exact list match");

    if !candidates.is_empty() {
        if !ui.is_interactive() {
            return Err(DocumentError::AmbiguousName {
                query: query.to_string(),
                candidates,
            });
        }

        return Ok(match ui.choose(query, &candidates, allow_new) {
            Choice::New if allow_new => Resolution::New(query.to_string()),
            Choice::Existing(index) => match candidates.get(index) {
                Some(name) => Resolution::Existing(name.clone()),
                None => Resolution::Aborted,
            },
            _ => Resolution::Aborted,
        });
    }

    if !allow_new {
        return Err(DocumentError::ListNotFound {
            name: query.to_string(),
            section: Section::Todo,
        });
    }

    if ui.confirm(&format!("Create a new list named '{}'?", query)) {
        Ok(Resolution::New(query.to_string()))
    } else {
        Ok(Resolution::Aborted)
    }
}
