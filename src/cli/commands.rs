use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tk", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - your todo list is one file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a tick workspace in the current directory
    Init(InitArgs),
    /// List tasks
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Toggle a task's completed flag
    Toggle(IdArg),
    /// Change a task's description
    Edit(EditArgs),
    /// Delete a task
    Rm(IdArg),
    /// Move a task to a new position
    Mv(MvArgs),
    /// View the error-capture journal
    Journal(JournalArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Reinitialize even if .tick/ already exists (clears the task list)
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show only some tasks (all, completed, uncompleted)
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    pub description: String,
}

#[derive(Args)]
pub struct IdArg {
    /// Task id
    pub id: u64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: u64,
    /// New description
    pub description: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id
    pub id: u64,
    /// Target position (0-indexed, clamped to the end)
    pub position: Option<usize>,
    /// Move to the top of the list
    #[arg(long)]
    pub top: bool,
}

#[derive(Args)]
pub struct JournalArgs {
    /// Maximum number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
}
