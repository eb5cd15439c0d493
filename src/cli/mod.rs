//! CLI interface for the todo list.

pub mod output;
pub mod shell;

use crate::core::config::{Backend, Config, DEFAULT_DB_PATH};
use crate::core::controller::App;
use crate::core::error::Result;
use crate::core::handle::StoreHandle;
use crate::core::item::{Item, Partition};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::BufReader;

/// todo - minimal to-do list
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "A minimal to-do list backed by a local SQLite store", long_about = None)]
struct Cli {
    /// Database file
    #[arg(long, global = true, env = "TODO_DB", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Storage backend
    #[arg(long, global = true, env = "TODO_BACKEND", value_enum, default_value_t = Backend::Sqlite)]
    backend: Backend,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the items table if it does not exist
    Init,

    /// Add a new todo item
    Add {
        /// Item text; empty text is ignored
        text: String,
    },

    /// List items
    List {
        /// Only the todo list
        #[arg(long, conflicts_with = "done")]
        todo: bool,
        /// Only the completed list
        #[arg(long)]
        done: bool,
        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a todo item as done; ids outside the todo list are ignored
    Done {
        /// Item ID
        id: i64,
    },

    /// Delete a completed item; ids outside the done list are ignored
    Delete {
        /// Item ID
        id: i64,
    },

    /// Interactive two-list shell
    Shell,
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config {
        db_path: cli.db,
        backend: cli.backend,
    };

    let store = StoreHandle::spawn(config.open_store()?)?;
    let mut app = App::new(store.clone());

    let result = execute(cli.command, &config, &mut app).await;
    let closed = store.close().await;
    result.and(closed)
}

async fn execute(command: Command, config: &Config, app: &mut App) -> Result<()> {
    match command {
        Command::Init => {
            if config.persists() {
                println!("Initialized todo database at {}", config.db_path.display());
            } else {
                println!("{}", shell::UNSUPPORTED_MESSAGE);
            }
        }

        Command::Add { text } => {
            if !config.persists() {
                eprintln!("{}", shell::UNSUPPORTED_MESSAGE);
            }
            app.set_text(text);
            if let Some(id) = app.submit().await? {
                println!("Added #{}", id);
            }
        }

        Command::List { todo, done, json } => {
            app.sync().await;
            let app = &*app;
            let partitions: Vec<Partition> = match (todo, done) {
                (true, _) => vec![Partition::Todo],
                (_, true) => vec![Partition::Done],
                _ => Partition::ALL.to_vec(),
            };

            if json {
                let items: Vec<&Item> = partitions
                    .iter()
                    .flat_map(|&p| app.list(p).items().unwrap_or_default())
                    .collect();
                println!("{}", output::format_json(&items)?);
            } else {
                let views: Vec<_> = partitions
                    .iter()
                    .filter_map(|&p| app.list(p).render())
                    .collect();
                print!("{}", output::format_views(&views));
            }
        }

        Command::Done { id } => {
            if app.tap_todo(id).await? {
                println!("Completed #{}", id);
            }
        }

        Command::Delete { id } => {
            if app.tap_done(id).await? {
                println!("Deleted #{}", id);
            }
        }

        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            shell::run_shell(app, config.persists(), stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
