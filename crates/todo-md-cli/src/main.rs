//! todo-md CLI
//!
//! Command-line interface for todo-md - todo lists kept in a markdown file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use todo_md_core::{Config, Interact, Section, Store};

mod commands;
mod editor;
mod exit;
mod output;
mod prompt;

use commands::config::ConfigUpdate;
use commands::view::ViewTarget;
use output::{Output, OutputFormat};
use prompt::TerminalPrompt;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "A command-line todo list manager")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the todo file (default: from config, else ~/TODO.md)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// View todo lists and tasks
    View {
        /// Show only todo items
        #[arg(long, conflicts_with_all = ["done", "list"])]
        todo: bool,
        /// Show only done items
        #[arg(long, conflicts_with = "list")]
        done: bool,
        /// Show a specific list
        #[arg(short, long, value_name = "LIST")]
        list: Option<String>,
    },
    /// Add a new task to a list
    Add {
        /// Name of the list
        list: String,
        /// Task description
        task: String,
    },
    /// Add a new list
    AddList {
        /// Name of the new list
        list: String,
    },
    /// Mark a task as done
    Done {
        /// Name of the list
        list: String,
        /// Task number to mark as done
        number: usize,
    },
    /// Mark an entire list as done
    DoneList {
        /// Name of the list
        list: String,
        /// Replace a done list of the same name
        #[arg(short, long)]
        force: bool,
    },
    /// Restore a done task back to todo
    Restore {
        /// Name of the list
        list: String,
        /// Task number to restore
        number: usize,
    },
    /// Restore an entire done list back to todo
    RestoreList {
        /// Name of the list
        list: String,
        /// Replace a todo list of the same name
        #[arg(short, long)]
        force: bool,
    },
    /// Reorder tasks within a list
    Order {
        /// Name of the list
        list: String,
        /// Current position of the task
        old: usize,
        /// New position for the task
        new: usize,
    },
    /// Clear all done tasks and lists
    ClearDone {
        /// Clear without confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Edit the todo file with the configured editor
    Edit {
        /// Editor to use for editing the todo file
        #[arg(short, long)]
        editor: Option<String>,
    },
    /// Rewrite the todo file in canonical form
    Save,
    /// Show or set configuration
    Config {
        /// Set default editor
        #[arg(long)]
        editor: Option<String>,
        /// Set default todo file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Set default viewer for output
        #[arg(long)]
        viewer: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    match run(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit::code_for(&err);
            tracing::debug!(code, error = %format!("{:#}", err), "command failed");
            output.error(&err, code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    // Commands that don't need the todo file
    if let Some(Commands::Config {
        editor,
        file,
        viewer,
    }) = cli.command
    {
        let update = ConfigUpdate {
            editor,
            file,
            viewer,
        };
        return if update.is_empty() {
            commands::config::show(cli.config.as_ref(), output)
        } else {
            commands::config::set(update, cli.config.as_ref(), output)
        };
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    init_logging(&config);

    let path = config.todo_file_path(cli.file.as_deref());
    let mut ui = TerminalPrompt::new(output, cli.yes);

    let Some(mut store) = open_store(&path, &mut ui, output)? else {
        return Ok(());
    };
    for warning in store.warnings() {
        output.warning(&warning.to_string());
    }

    tracing::debug!(path = %path.display(), "todo file loaded");

    let command = cli.command.unwrap_or(Commands::View {
        todo: true,
        done: false,
        list: None,
    });

    match command {
        Commands::View { todo, done, list } => {
            let target = match (todo, done, list) {
                (_, _, Some(name)) => ViewTarget::List(name),
                (true, _, _) => ViewTarget::Section(Section::Todo),
                (_, true, _) => ViewTarget::Section(Section::Done),
                _ => ViewTarget::All,
            };
            commands::view::show(store.document(), &target, config.viewer.as_deref(), output)
        }
        Commands::Add { list, task } => {
            commands::task::add(&mut store, &list, &task, &mut ui, output)
        }
        Commands::AddList { list } => commands::list::add(&mut store, &list, &mut ui, output),
        Commands::Done { list, number } => commands::task::done(&mut store, &list, number, output),
        Commands::DoneList { list, force } => {
            commands::list::done(&mut store, &list, force, output)
        }
        Commands::Restore { list, number } => {
            commands::task::restore(&mut store, &list, number, output)
        }
        Commands::RestoreList { list, force } => {
            commands::list::restore(&mut store, &list, force, output)
        }
        Commands::Order { list, old, new } => {
            commands::task::order(&mut store, &list, old, new, &mut ui, output)
        }
        Commands::ClearDone { force } => {
            commands::list::clear_done(&mut store, force, &mut ui, output)
        }
        Commands::Edit { editor } => {
            let editor = editor.or(config.editor);
            commands::file::edit(store.path(), editor.as_deref(), output)
        }
        Commands::Save => commands::file::save(&store, output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Load the todo file, offering to create it when it is missing
///
/// Returns `None` when the user declines.
fn open_store(path: &Path, ui: &mut dyn Interact, output: &Output) -> Result<Option<Store>> {
    if !path.exists() {
        let question = format!(
            "Todo file {} does not exist. Create a new todo file?",
            path.display()
        );
        if !ui.confirm(&question) {
            output.message("No todo file created.");
            return Ok(None);
        }

        let store = Store::open_or_create(path).context("Failed to create todo file")?;
        output.success(&format!("Created {}", path.display()));
        return Ok(Some(store));
    }

    let store = Store::open(path).context("Failed to open todo file")?;
    Ok(Some(store))
}

/// Initialize logging when TODO_MD_LOG is set
///
/// Logs go to `log_file` from config if set, otherwise to stderr.
fn init_logging(config: &Config) {
    // Only log if TODO_MD_LOG is set
    let Ok(log_level) = std::env::var("TODO_MD_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "todo_md_core={},todo_md_cli={}",
        log_level, log_level
    ));

    let Some(log_path) = &config.log_file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    // Create log file
    let log_file = match File::create(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();
}
