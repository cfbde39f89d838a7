mod check;
mod export;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use picfeed_store::config::Settings;
use picfeed_store::Database;

use export::ExportTable;

/// Picfeed database utility
///
/// Bootstraps the schema and demo rows. Can also inspect an existing
/// database or export the public projection of a table as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "picfeed-admin")]
#[command(about = "Manage Picfeed SQLite databases", long_about = None)]
struct Args {
    /// Path to the SQLite database file (overrides settings.toml)
    #[arg(short, long, env = "DATABASE_PATH")]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create any missing tables, indexes and triggers
    Init {
        /// Also load the demo rows
        #[arg(long)]
        seed: bool,
    },
    /// Create the schema if needed and load the demo rows
    Seed,
    /// Validate the schema and report row counts
    Check,
    /// Print the serialized form of every row in a table
    Export {
        #[arg(value_enum)]
        table: ExportTable,
    },
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Open an existing database; refuses to create a new file.
fn open_existing(path: &str) -> Result<Database> {
    if path.trim() != ":memory:" && !std::path::Path::new(path).exists() {
        anyhow::bail!("Database file not found: {}", path);
    }
    Database::new(path).context("Failed to open database connection")
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    let settings = Settings::new().context("Failed to load settings")?;
    init_tracing(&settings.log.filter);

    let path = args.database.unwrap_or(settings.database.path);
    tracing::info!("Using database {}", path);

    match args.command {
        Command::Init { seed } => {
            let db = Database::new(&path).context("Failed to create database")?;
            db.initialize()?;
            if seed || settings.database.seed_demo_data {
                db.seed_demo_data()?;
            }
            println!("Schema ready at {}", path);
        }
        Command::Seed => {
            let db = Database::new(&path).context("Failed to create database")?;
            db.initialize()?;
            db.seed_demo_data()?;
            println!("Demo data loaded into {}", path);
        }
        Command::Check => {
            let db = open_existing(&path)?;
            let report = check::check_database(&db)?;
            check::display_report(&report);
        }
        Command::Export { table } => {
            let db = open_existing(&path)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            export::export_table(&db, table, &mut out)?;
            out.flush().context("Failed to flush output")?;
        }
    }

    Ok(())
}
