//! Command-line interface for taskdesk
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::DataRoot;

mod category;
mod init;
mod stats;
mod task;
mod user;

/// taskdesk - multi-user task tracking
///
/// A CLI over a shared task store with per-user ownership, categories,
/// filtered listings, and completion statistics.
#[derive(Parser, Debug)]
#[command(name = "taskdesk")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the data root (defaults to current directory)
    #[arg(long, global = true, env = "TASKDESK_ROOT")]
    pub root: Option<PathBuf>,

    /// User id to act as
    #[arg(long, global = true, env = "TASKDESK_USER")]
    pub user: Option<u64>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Category management
    #[command(subcommand)]
    Category(CategoryCommands),

    /// User lookup
    #[command(subcommand)]
    User(UserCommands),

    /// Completion statistics
    #[command(subcommand)]
    Stats(StatsCommands),

    /// Initialize a data root with seed data
    Init,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List your tasks with filters, search, sorting, and pagination
    List {
        /// Filter by completion state
        #[arg(long)]
        completed: Option<bool>,

        /// Filter by priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Filter by owner id (only your own tasks are visible anyway)
        #[arg(long)]
        user_id: Option<u64>,

        /// Filter by category id
        #[arg(long)]
        category_id: Option<u64>,

        /// Case-insensitive title/description search; " OR " separates
        /// alternative terms
        #[arg(long)]
        search: Option<String>,

        /// Sort key: title, priority, or none
        #[arg(long)]
        sort: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u64>,

        /// Items per page
        #[arg(long)]
        page_size: Option<u64>,
    },

    /// Show one of your tasks
    Get {
        /// Task id
        id: u64,
    },

    /// Create a task
    New {
        /// Task title
        title: String,

        /// Category the task belongs to
        #[arg(long)]
        category_id: u64,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Priority: low, medium, high (default medium)
        #[arg(long)]
        priority: Option<String>,

        /// Mark the task completed at creation
        #[arg(long)]
        completed: bool,
    },

    /// Replace every mutable field of a task
    Replace {
        /// Task id
        id: u64,

        /// Task title
        title: String,

        /// Category the task belongs to
        #[arg(long)]
        category_id: u64,

        /// Priority: low, medium, high
        #[arg(long)]
        priority: String,

        /// Free-form description (cleared when omitted)
        #[arg(long)]
        description: Option<String>,

        /// Completion state
        #[arg(long)]
        completed: bool,
    },

    /// Update individual fields of a task
    Patch {
        /// Task id
        id: u64,

        /// Field to change, as key=value (repeatable)
        #[arg(long = "set", required = true)]
        set: Vec<String>,
    },

    /// Delete one of your tasks
    Delete {
        /// Task id
        id: u64,
    },
}

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Show a category
    Get {
        /// Category id
        id: u64,
    },

    /// Create a category
    New {
        /// Category name
        name: String,
    },

    /// Delete a category (fails while tasks reference it)
    Delete {
        /// Category id
        id: u64,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List all users
    List,

    /// Show a user
    Get {
        /// User id
        id: u64,
    },
}

/// Stats subcommands
#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Completion summary for your own tasks
    Summary,

    /// Per-user productivity report (admin only)
    Productivity,
}

/// Shared per-invocation context: where the data lives and who is acting.
pub(crate) struct Context {
    pub root: DataRoot,
    pub config: Config,
    pub user: Option<u64>,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    fn new(root: Option<PathBuf>, user: Option<u64>, json: bool, quiet: bool) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let root = DataRoot::new(root);
        let config = root.config();
        Ok(Self {
            root,
            config,
            user,
            json,
            quiet,
        })
    }

    /// The acting user: `--user` flag or env, then the configured default.
    pub fn user_id(&self) -> Result<u64> {
        self.user
            .or(self.config.default_user_id)
            .ok_or(Error::MissingUser)
    }

    pub fn output(&self) -> crate::output::OutputOptions {
        crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = Context::new(self.root, self.user, self.json, self.quiet)?;
        match self.command {
            Commands::Init => init::run(&ctx),
            Commands::Task(cmd) => match cmd {
                TaskCommands::List {
                    completed,
                    priority,
                    user_id,
                    category_id,
                    search,
                    sort,
                    page,
                    page_size,
                } => task::run_list(
                    &ctx,
                    crate::query::TaskQuery {
                        completed,
                        priority,
                        user_id,
                        category_id,
                        search,
                        sort,
                        page,
                        page_size,
                    },
                ),
                TaskCommands::Get { id } => task::run_get(&ctx, id),
                TaskCommands::New {
                    title,
                    category_id,
                    description,
                    priority,
                    completed,
                } => task::run_new(
                    &ctx,
                    crate::mutation::NewTask {
                        title,
                        description,
                        priority,
                        completed: completed.then_some(true),
                        category_id,
                    },
                ),
                TaskCommands::Replace {
                    id,
                    title,
                    category_id,
                    priority,
                    description,
                    completed,
                } => task::run_replace(
                    &ctx,
                    id,
                    crate::mutation::ReplaceTask {
                        title,
                        description,
                        priority,
                        completed,
                        category_id,
                    },
                ),
                TaskCommands::Patch { id, set } => task::run_patch(&ctx, id, &set),
                TaskCommands::Delete { id } => task::run_delete(&ctx, id),
            },
            Commands::Category(cmd) => match cmd {
                CategoryCommands::List => category::run_list(&ctx),
                CategoryCommands::Get { id } => category::run_get(&ctx, id),
                CategoryCommands::New { name } => category::run_new(&ctx, &name),
                CategoryCommands::Delete { id } => category::run_delete(&ctx, id),
            },
            Commands::User(cmd) => match cmd {
                UserCommands::List => user::run_list(&ctx),
                UserCommands::Get { id } => user::run_get(&ctx, id),
            },
            Commands::Stats(cmd) => match cmd {
                StatsCommands::Summary => stats::run_summary(&ctx),
                StatsCommands::Productivity => stats::run_productivity(&ctx),
            },
        }
    }
}
