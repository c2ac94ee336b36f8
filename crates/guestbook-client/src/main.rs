//! Guestbook CLI - sign and browse a guestbook node from the terminal.

use anyhow::bail;
use clap::{Parser, Subcommand};
use guestbook_client::render::{render_list, render_view, SUCCESS_MESSAGE};
use guestbook_client::{ClientConfig, Guestbook, GuestbookClient};
use guestbook_types::EntryId;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DELETE_NOT_PERFORMED: &str = "Delete was not performed";

/// Guestbook - sign and browse a guestbook
#[derive(Parser, Debug)]
#[command(name = "guestbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Node URL (defaults to the saved configuration)
    #[arg(long, env = "GUESTBOOK_URL")]
    url: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List entries, newest first
    List,

    /// Sign the guestbook
    Sign {
        /// Your name
        #[arg(short, long)]
        name: String,
        /// Your message
        #[arg(short, long)]
        message: String,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or update saved settings
    Config {
        /// Node URL to save
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("guestbook={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::load();
    let url = cli.url.unwrap_or_else(|| config.node_url.clone());
    let guestbook = Guestbook::new(GuestbookClient::new(url)?);

    match cli.command {
        Commands::List => {
            guestbook.mount().await;
            print_view(&guestbook)
        }
        Commands::Sign { name, message } => {
            guestbook.set_name(name);
            guestbook.set_message(message);
            if !guestbook.submit().await {
                bail!(failure_message(
                    guestbook.snapshot().error,
                    "Name and message are required"
                ));
            }

            // Posted; a failed re-fetch is only a warning.
            println!("{SUCCESS_MESSAGE}");
            let state = guestbook.snapshot();
            match &state.error {
                Some(error) => eprintln!("Warning: could not refresh entries: {error}"),
                None => print!("{}", render_list(&state)),
            }
            Ok(())
        }
        Commands::Delete { id, yes } => {
            guestbook.mount().await;
            let id = resolve_id(&guestbook, &id);

            guestbook.request_delete(id.clone());
            if !yes && !confirm(&format!("Delete entry #{id}?"))? {
                guestbook.cancel_delete();
                println!("Cancelled");
                return Ok(());
            }

            if guestbook.confirm_delete(&id).await {
                println!("Deleted entry #{id}");
                print_view(&guestbook)
            } else {
                bail!(failure_message(
                    guestbook.snapshot().error,
                    DELETE_NOT_PERFORMED
                ))
            }
        }
        Commands::Config { url } => {
            if let Some(url) = url {
                config.node_url = url;
                let path = config.save()?;
                println!("Saved {}", path.display());
            }
            println!("node_url = {}", config.node_url);
            Ok(())
        }
    }
}

/// Picks the message to report for a failed action.
fn failure_message(error: Option<String>, fallback: &str) -> String {
    error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Resolves a typed id against the cached list so it is sent in the same
/// JSON kind the node handed out.
fn resolve_id(guestbook: &Guestbook, raw: &str) -> EntryId {
    if let Some(entry) = guestbook.snapshot().find_entry(raw) {
        return entry.id.clone();
    }
    raw.parse::<i64>()
        .map(EntryId::Int)
        .unwrap_or_else(|_| EntryId::from(raw))
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_view(guestbook: &Guestbook) -> anyhow::Result<()> {
    let state = guestbook.snapshot();
    if let Some(error) = &state.error {
        bail!(error.clone());
    }
    print!("{}", render_view(&state, Instant::now()));
    Ok(())
}
