//! `todo`: terminal front end for the todo service.
//!
//! Every mutating command is followed by an explicit reload, then the list
//! is printed.

mod display;

use clap::{ArgAction, Parser, Subcommand};
use todo_core::{Api, Settings, Status, Store, TodoId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Todo list client")]
struct Args {
    /// Backend base URL; overrides API_BASE_URL and todo.toml
    #[arg(long)]
    base_url: Option<String>,

    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show todos
    List {
        /// Only show todos with this status (done, not-done)
        #[arg(long)]
        filter: Option<Status>,
    },
    /// Create a todo
    Add { text: Option<String> },
    /// Mark a todo as done
    Done { id: String },
    /// Mark a todo as not done
    Undone { id: String },
    /// Replace a todo's text
    Edit { id: String, text: Option<String> },
    /// Delete a todo
    Rm { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = match args.base_url {
        Some(url) => Settings::with_base_url(&url),
        None => Settings::load()?,
    };
    tracing::debug!(base_url = %settings.api_base_url, "using backend");

    let store = Store::new(Api::from_settings(&settings));

    match args.command {
        Command::List { filter } => store.set_filter(filter),
        Command::Add { text } => store.create_new(text.as_deref()).await,
        Command::Done { id } => store.update_status(&TodoId::from(id), Status::Done).await,
        Command::Undone { id } => {
            store
                .update_status(&TodoId::from(id), Status::NotDone)
                .await
        }
        Command::Edit { id, text } => {
            store
                .update_text(&TodoId::from(id), text.as_deref())
                .await
        }
        Command::Rm { id } => store.remove_todo(&TodoId::from(id)).await,
    }

    store.reload_todos().await;
    print!("{}", display::render(&store.todos(), store.filter()));
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let mut filter = EnvFilter::from_default_env();

    // Only apply defaults if RUST_LOG is not set
    if std::env::var("RUST_LOG").is_err() {
        let level = match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        if let Ok(directive) = level.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
