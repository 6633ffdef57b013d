//! External tools
//!
//! Opens the todo file in the user's editor and pipes rendered lists
//! through a viewer such as `bat` or `less`.

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Failure to run an external program
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(
        "No editor found. Set one with `todo config --editor <EDITOR>` or the $EDITOR variable."
    )]
    NoEditor,

    #[error("Empty {kind} command")]
    EmptyCommand { kind: &'static str },

    #[error("Failed to run {kind} '{command}': {source}")]
    Launch {
        kind: &'static str,
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{kind} '{command}' exited with {status}")]
    Failed {
        kind: &'static str,
        command: String,
        status: ExitStatus,
    },
}

impl ToolError {
    /// The program never started, as opposed to starting and failing
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, ToolError::Launch { .. } | ToolError::EmptyCommand { .. })
    }
}

/// Open the todo file in an editor and wait for it to exit
///
/// The editor is the first of: `editor` (from --editor or config),
/// $EDITOR, $VISUAL, or a common editor found in PATH.
pub fn edit_file(path: &Path, editor: Option<&str>) -> Result<(), ToolError> {
    let editor = match editor.filter(|e| !e.trim().is_empty()) {
        Some(editor) => editor.to_string(),
        None => find_editor()?,
    };
    let (program, args) = split_command(&editor, "editor")?;

    tracing::debug!(editor = %editor, path = %path.display(), "opening editor");

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .map_err(|source| ToolError::Launch {
            kind: "editor",
            command: editor.clone(),
            source,
        })?;

    if !status.success() {
        return Err(ToolError::Failed {
            kind: "editor",
            command: editor,
            status,
        });
    }

    Ok(())
}

/// Pipe `text` into a viewer command
///
/// `bat`/`batcat` are told the input is markdown and `less` keeps colors.
pub fn view_text(text: &str, viewer: &str) -> Result<(), ToolError> {
    let (program, mut args) = split_command(viewer, "viewer")?;
    args.extend(viewer_args(program));

    tracing::debug!(viewer = %viewer, "piping to viewer");

    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::Launch {
            kind: "viewer",
            command: viewer.to_string(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // The pager may quit before reading everything
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            if e.kind() != io::ErrorKind::BrokenPipe {
                tracing::warn!(error = %e, "failed writing to viewer");
            }
        }
    }

    let status = child.wait().map_err(|source| ToolError::Launch {
        kind: "viewer",
        command: viewer.to_string(),
        source,
    })?;

    if !status.success() {
        return Err(ToolError::Failed {
            kind: "viewer",
            command: viewer.to_string(),
            status,
        });
    }

    Ok(())
}

/// Extra arguments for well-known viewers
fn viewer_args(program: &str) -> Vec<&'static str> {
    let name = Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program);

    match name {
        "bat" | "batcat" => vec!["--language=markdown"],
        "less" => vec!["-R"],
        _ => Vec::new(),
    }
}

/// Split "code --wait" into program and arguments
fn split_command<'a>(
    command: &'a str,
    kind: &'static str,
) -> Result<(&'a str, Vec<&'a str>), ToolError> {
    let mut parts = command.split_whitespace();
    let program = parts.next().ok_or(ToolError::EmptyCommand { kind })?;
    Ok((program, parts.collect()))
}

/// Find the user's preferred editor
fn find_editor() -> Result<String, ToolError> {
    // Check environment variables
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(visual) = env::var("VISUAL") {
        if !visual.is_empty() {
            return Ok(visual);
        }
    }

    // Try common editors
    let common_editors = ["nano", "vim", "vi", "emacs", "code", "notepad"];

    common_editors
        .into_iter()
        .find(|editor| command_exists(editor))
        .map(str::to_string)
        .ok_or(ToolError::NoEditor)
}

/// Check if a command exists in PATH
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
