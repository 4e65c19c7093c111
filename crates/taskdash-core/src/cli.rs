use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use taskdash_model::{DateMode, Status, StatusFilter, TaskId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskdash",
    version,
    about = "Task dashboard: create, edit, filter and track tasks",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "rcfile", global = true)]
    pub rcfile: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show tasks matching the given filters.
    List(ListArgs),
    /// Append a new task.
    Add(AddArgs),
    /// Change fields of an existing task.
    Edit(EditArgs),
    /// Remove a task.
    Delete {
        id: TaskId,
        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Flip a task between done and todo.
    Toggle { id: TaskId },
    /// Show every field of one task.
    Info { id: TaskId },
    /// Print or change the stored color theme.
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },
    /// Print the stored task list as JSON.
    Export,
}

impl Default for Command {
    fn default() -> Self {
        Self::List(ListArgs::default())
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Case-insensitive text matched against title and description.
    #[arg(short = 's', long = "search", default_value = "")]
    pub search: String,

    /// any, todo, in-progress or done.
    #[arg(long = "status")]
    pub status: Option<StatusFilter>,

    /// YYYY-MM-DD, today, tomorrow or yesterday.
    #[arg(long = "due")]
    pub due: Option<String>,

    /// exact, before or after; defaults to the `default.mode` setting.
    #[arg(long = "mode")]
    pub mode: Option<DateMode>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    pub title: String,

    #[arg(short = 'd', long = "description", default_value = "")]
    pub description: String,

    #[arg(long = "due")]
    pub due: Option<String>,

    #[arg(long = "status", default_value = "todo")]
    pub status: Status,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: TaskId,

    #[arg(long = "title")]
    pub title: Option<String>,

    #[arg(short = 'd', long = "description")]
    pub description: Option<String>,

    #[arg(long = "due", conflicts_with = "clear_due")]
    pub due: Option<String>,

    #[arg(long = "clear-due")]
    pub clear_due: bool,

    #[arg(long = "status")]
    pub status: Option<Status>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use taskdash_model::{DateMode, Status, StatusFilter};

    use super::{Command, GlobalCli};

    #[test]
    fn no_subcommand_means_list() {
        let cli = GlobalCli::parse_from(["taskdash", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
    }

    #[test]
    fn list_flags_parse_into_model_types() {
        let cli = GlobalCli::parse_from([
            "taskdash",
            "list",
            "--status",
            "in-progress",
            "--due",
            "2026-02-01",
            "--mode",
            "after",
            "--rc",
            "color=off",
        ]);
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.status, Some(StatusFilter::InProgress));
        assert_eq!(args.mode, Some(DateMode::OnOrAfter));
        assert_eq!(args.due.as_deref(), Some("2026-02-01"));
        assert_eq!(cli.rc_overrides[0].key, "color");
    }

    #[test]
    fn add_defaults_to_todo() {
        let cli = GlobalCli::parse_from(["taskdash", "add", "Ship it"]);
        let Some(Command::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.title, "Ship it");
        assert_eq!(args.status, Status::Todo);
    }

    #[test]
    fn due_and_clear_due_conflict() {
        assert!(
            GlobalCli::try_parse_from(["taskdash", "edit", "1", "--due", "today", "--clear-due"])
                .is_err()
        );
    }
}
