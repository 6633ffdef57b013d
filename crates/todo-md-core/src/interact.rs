//! Interaction port
//!
//! Mutations that need a decision from the user (confirming a new list,
//! picking one of several similar list names, clearing the Done section)
//! ask through an `Interact` implementation supplied by the caller. The
//! document never reads stdin or writes to a terminal itself.

use std::collections::VecDeque;

/// Answer to a "which list did you mean" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Create a new list under the name that was typed
    New,
    /// Use the candidate at this 0-based index
    Existing(usize),
    /// Leave everything unchanged
    Abort,
}

impl Choice {
    /// Interpret a typed selection
    ///
    /// `0` requests a new list (only when `allow_new`), `1..=count` picks a
    /// candidate. Anything else, including empty input, aborts.
    pub fn parse(input: &str, count: usize, allow_new: bool) -> Self {
        match input.trim().parse::<usize>() {
            Ok(0) if allow_new => Choice::New,
            Ok(n) if (1..=count).contains(&n) => Choice::Existing(n - 1),
            _ => Choice::Abort,
        }
    }
}

/// Decisions and notices the document model needs from its caller
pub trait Interact {
    /// Ask a yes/no question. Any failure to get an answer is a "no".
    fn confirm(&mut self, message: &str) -> bool;

    /// Offer `candidates` (numbered from 1) for a `query` that matched no
    /// list exactly.
    fn choose(&mut self, query: &str, candidates: &[String], allow_new: bool) -> Choice;

    /// Informational message, e.g. a no-op notice
    fn notice(&mut self, _message: &str) {}

    /// Whether `choose` can actually reach a person
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Answers yes to every confirmation; cannot pick between candidates
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Interact for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }

    fn choose(&mut self, _query: &str, _candidates: &[String], _allow_new: bool) -> Choice {
        Choice::Abort
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Replays prepared answers in order and records every message it was shown
///
/// Runs out to "no" / `Abort`.
#[derive(Debug, Default)]
pub struct Scripted {
    confirms: VecDeque<bool>,
    choices: VecDeque<String>,
    /// Confirmation prompts, notices and offered candidates, in order
    pub transcript: Vec<String>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next `confirm`
    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    /// Queue raw typed input for the next `choose`
    pub fn choose_with(mut self, input: impl Into<String>) -> Self {
        self.choices.push_back(input.into());
        self
    }
}

impl Interact for Scripted {
    fn confirm(&mut self, message: &str) -> bool {
        self.transcript.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn choose(&mut self, query: &str, candidates: &[String], allow_new: bool) -> Choice {
        self.transcript.push(format!("choose {}: {}", query, candidates.join(", ")));
        match self.choices.pop_front() {
            Some(input) => Choice::parse(&input, candidates.len(), allow_new),
            None => Choice::Abort,
        }
    }

    fn notice(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }
}
