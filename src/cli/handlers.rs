use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::{TaskListJson, format_task_line, task_to_json};
use crate::io::journal;
use crate::io::workspace::{TICK_DIR, Workspace, WorkspaceError};
use crate::model::filter::TaskFilter;
use crate::ops::action::Action;
use crate::ops::store::TaskStore;
use crate::ops::{intent, reorder};

const CONFIG_TOML_TEMPLATE: &str = r##"# tick workspace configuration

[ui]
# Show the key-hint strip at the bottom of the TUI.
# show_key_hints = true

# --- UI Colors ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# red = "#FF4444"
# green = "#44FF88"
# yellow = "#FFD700"
"##;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let start = start_dir(cli.dir.as_deref())?;

    match cli.command {
        None => {
            // No subcommand is handled in main.rs (TUI launch).
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, &start),

            Commands::List(args) => cmd_list(args, json, &start),
            Commands::Add(args) => cmd_add(args, &start),
            Commands::Toggle(args) => cmd_toggle(args, &start),
            Commands::Edit(args) => cmd_edit(args, &start),
            Commands::Rm(args) => cmd_rm(args, &start),
            Commands::Mv(args) => cmd_mv(args, &start),
            Commands::Journal(args) => cmd_journal(args, json, &start),
        },
    }
}

/// Resolve the directory commands run against: `-C` override or cwd.
pub fn start_dir(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(d) => {
            fs::canonicalize(d).map_err(|e| format!("cannot resolve -C path '{}': {}", d, e).into())
        }
        None => Ok(std::env::current_dir()?),
    }
}

/// Discover the workspace and restore the store from persisted state.
/// This runs to completion before any output is produced.
fn open_store(start: &Path) -> Result<(Workspace, TaskStore), WorkspaceError> {
    let workspace = Workspace::discover(start)?;
    let store = TaskStore::restore(workspace.bridge());
    Ok((workspace, store))
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

pub fn cmd_init(args: InitArgs, start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let dir = start.join(TICK_DIR);

    if dir.is_dir() && !args.force {
        return Err("tick workspace already exists in ./.tick/ (use --force to reset)".into());
    }

    fs::create_dir_all(&dir)?;
    fs::write(dir.join("config.toml"), CONFIG_TOML_TEMPLATE)?;

    if args.force {
        // A reset drops any persisted collection along with the old config.
        let workspace = Workspace::load(start)?;
        workspace.bridge().clear()?;
    }

    println!("Initialized tick workspace in {}", dir.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    json: bool,
    start: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, store) = open_store(start)?;

    let filter = match args.filter.as_deref() {
        None => TaskFilter::All,
        Some(name) => TaskFilter::parse(name)
            .ok_or_else(|| format!("unknown filter \"{}\" (all, completed, uncompleted)", name))?,
    };

    let visible: Vec<_> = store.tasks().iter().filter(|t| filter.matches(t)).collect();

    if json {
        let out = TaskListJson {
            tasks: visible.iter().map(|t| task_to_json(t)).collect(),
            total: store.len(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for task in &visible {
        println!("{}", format_task_line(task));
    }
    if filter == TaskFilter::All {
        println!("{} task(s)", store.len());
    } else {
        println!("{} of {} task(s)", visible.len(), store.len());
    }
    Ok(())
}

fn cmd_journal(
    args: JournalArgs,
    json: bool,
    start: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::discover(start)?;
    let entries = journal::read_journal_entries(&workspace.dir, Some(args.limit));

    if json {
        let values: Vec<_> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("journal is empty");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{}  {}: {}",
            entry
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            entry.category,
            entry.description
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut store) = open_store(start)?;

    let task = intent::prepare_add(store.tasks(), &args.description)?;
    let id = task.id;
    let description = task.description.clone();
    store.dispatch(Action::Add(task))?;

    println!("added {}  {}", id, description);
    Ok(())
}

fn cmd_toggle(args: IdArg, start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut store) = open_store(start)?;

    // Absent ids are not errors; the transition would be a no-op anyway.
    if store.get(args.id).is_none() {
        eprintln!("no task with id {}", args.id);
        return Ok(());
    }

    store.dispatch(Action::Toggle(args.id))?;
    if let Some(task) = store.get(args.id) {
        let state = if task.completed { "completed" } else { "uncompleted" };
        println!("{}  {} ({})", task.id, task.description, state);
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut store) = open_store(start)?;

    if store.get(args.id).is_none() {
        eprintln!("no task with id {}", args.id);
        return Ok(());
    }

    let description = intent::prepare_edit(store.tasks(), args.id, &args.description)?;
    store.dispatch(Action::UpdateDescription {
        id: args.id,
        description: description.clone(),
    })?;

    println!("{}  {}", args.id, description);
    Ok(())
}

fn cmd_rm(args: IdArg, start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut store) = open_store(start)?;

    let Some(task) = store.get(args.id) else {
        eprintln!("no task with id {}", args.id);
        return Ok(());
    };
    let description = task.description.clone();

    store.dispatch(Action::Delete(args.id))?;
    println!("deleted {}  {}", args.id, description);
    Ok(())
}

fn cmd_mv(args: MvArgs, start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut store) = open_store(start)?;

    let position = if args.top {
        0
    } else {
        args.position
            .ok_or("specify a position or --top")?
    };

    // CLI reordering always operates on the full, unfiltered sequence.
    let Some(sequence) = reorder::move_in_sequence(store.tasks(), args.id, position) else {
        eprintln!("no task with id {}", args.id);
        return Ok(());
    };

    store.dispatch(Action::Reorder(sequence))?;
    println!("moved {} to position {}", args.id, position);
    Ok(())
}
