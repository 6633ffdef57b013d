//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! Data goes to stdout; warnings, errors and prompts go to stderr.

use serde_json::Value;

use todo_md_core::StorageError;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print rendered lists
    pub fn print_text(&self, text: &str) {
        print!("{}", text);
    }

    /// Print a JSON value (pretty)
    pub fn print_json(&self, value: &Value) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to encode JSON output: {}", e),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning (stderr, suppressed in quiet mode)
    pub fn warning(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("⚠ {}", msg),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"status": "warning", "message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an error with its cause chain and, for storage problems, a hint
    pub fn error(&self, err: &anyhow::Error, code: u8) {
        let hint = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<StorageError>())
            .and_then(StorageError::recovery_suggestion);

        match self.format {
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "status": "error",
                        "code": code,
                        "message": format!("{:#}", err),
                        "hint": hint,
                    })
                );
            }
            OutputFormat::Human | OutputFormat::Quiet => {
                eprintln!("Error: {:#}", err);
                if let Some(hint) = hint {
                    eprintln!("Hint: {}", hint);
                }
            }
        }
    }
}
