//! Terminal front end for the todo board.
//!
//! # Responsibility
//! - Map subcommands onto `TodoStore` operations.
//! - Print the three status columns after every command.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use todoboard_core::db::open_db;
use todoboard_core::{
    board, init_logging, local_today, parse_calendar_date, KeyValueSlots, SlotTodoPersistence,
    SqliteSlotRepository, TodoConfig, TodoStore,
};

#[derive(Debug, Parser)]
#[command(name = "todoboard", version, about = "Todo list with Proposed / In Progress / Completed columns")]
struct Cli {
    /// SQLite file holding the todo slot.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Slot key the list is stored under.
    #[arg(long, global = true)]
    key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the board.
    List,
    /// Add a proposed task.
    Add {
        task: String,
        /// Due date (YYYY-MM-DD); defaults to today.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Replace a task's text and date; progress resets to Proposed.
    Edit {
        index: usize,
        task: String,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Remove a task.
    Delete { index: usize },
    /// Flip the completed checkbox.
    Toggle { index: usize },
    /// Move a task to `Proposed`, `In Progress` or `Completed`.
    Status { index: usize, status: String },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Toggle { .. } => "toggle",
            Self::Status { .. } => "status",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> TodoConfig {
    let mut config = TodoConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(key) = &cli.key {
        config.slot_key = key.clone();
    }
    config
}

fn run(command: Command, config: &TodoConfig) -> Result<(), Box<dyn Error>> {
    info!("event=cli_command module=cli status=start command={}", command.name());
    let conn = open_db(&config.db_path)?;
    let slots = SqliteSlotRepository::try_new(&conn)?;
    let mut store = TodoStore::open(SlotTodoPersistence::with_key(
        slots,
        config.slot_key.as_str(),
    ))?;

    match command {
        Command::List => {}
        Command::Add { task, date } => {
            store.add(task, date.unwrap_or_else(local_today))?;
        }
        Command::Edit { index, task, date } => {
            let date = match date {
                Some(date) => date,
                None => store.get(index).map(|item| item.date).unwrap_or_else(local_today),
            };
            store.edit(index, task, date)?;
        }
        Command::Delete { index } => {
            store.delete(index)?;
        }
        Command::Toggle { index } => store.toggle_complete(index)?,
        Command::Status { index, status } => store.set_status_label(index, &status)?,
    }

    print_board(&store);
    Ok(())
}

fn print_board<S: KeyValueSlots>(store: &TodoStore<SlotTodoPersistence<S>>) {
    for column in board(store) {
        println!("{} ({})", column.title(), column.cards.len());
        for card in &column.cards {
            let check = if card.completed { "x" } else { " " };
            println!(
                "  [{}] [{}] {}  ({})",
                card.index, check, card.task, card.due_label
            );
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(value).ok_or_else(|| format!("invalid date `{value}`; use YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_task_and_date() {
        let cli = Cli::try_parse_from(["todoboard", "add", "Buy milk", "--date", "2024-05-01"])
            .unwrap();
        match cli.command {
            Command::Add { task, date } => {
                assert_eq!(task, "Buy milk");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_rejects_malformed_date() {
        assert!(Cli::try_parse_from(["todoboard", "add", "x", "--date", "May 1"]).is_err());
    }

    #[test]
    fn global_db_flag_follows_subcommand() {
        let cli =
            Cli::try_parse_from(["todoboard", "status", "0", "In Progress", "--db", "/tmp/b.db"])
                .unwrap();
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/b.db")));
        assert!(matches!(cli.command, Command::Status { index: 0, .. }));
    }
}
