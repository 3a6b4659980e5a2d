//! parcel-tracker - parcel tracking CLI
//!
//! Owns the SQLite connection and injects it into the parcel store.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use parcel_tracker::commands;
use parcel_tracker::db::connection::{default_db_path, open_db, DB_PATH_ENV};
use parcel_tracker::db::schema::ensure_schema;
use parcel_tracker::output::{self, OutputControls};
use parcel_tracker::{ParcelService, ParcelStore};

/// Parcel tracking CLI backed by SQLite.
#[derive(Parser, Debug)]
#[command(name = "parcel-tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the parcel database
    #[arg(long, global = true, env = DB_PATH_ENV)]
    db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Comma-separated field allowlist
    #[arg(long, global = true)]
    fields: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new parcel
    Register {
        /// Owning client id
        #[arg(short, long)]
        client: i64,

        /// Delivery address
        #[arg(short, long)]
        address: String,
    },

    /// Show a single parcel
    Show {
        /// Parcel number
        number: i64,
    },

    /// List parcels of a client
    List {
        /// Owning client id
        #[arg(short, long)]
        client: i64,
    },

    /// Advance a parcel: registered -> sent -> delivered
    Advance {
        /// Parcel number
        number: i64,
    },

    /// Set an arbitrary status
    SetStatus {
        /// Parcel number
        number: i64,

        /// New status
        status: String,
    },

    /// Change the address of a registered parcel
    SetAddress {
        /// Parcel number
        number: i64,

        /// New delivery address
        address: String,
    },

    /// Delete a registered parcel
    Delete {
        /// Parcel number
        number: i64,
    },
}

fn run(command: Command, db_path: &Path, output_controls: &OutputControls) -> anyhow::Result<()> {
    let conn = open_db(db_path)?;
    ensure_schema(&conn).context("Failed to create parcel table")?;

    let service = ParcelService::new(ParcelStore::new(&conn));

    match command {
        Command::Register { client, address } => {
            commands::tracking::register(&service, client, &address, output_controls)
        }
        Command::Show { number } => commands::lookup::show(&service, number, output_controls),
        Command::List { client } => commands::lookup::list(&service, client, output_controls),
        Command::Advance { number } => {
            commands::tracking::advance(&service, number, output_controls)
        }
        Command::SetStatus { number, status } => {
            commands::tracking::set_status(&service, number, &status, output_controls)
        }
        Command::SetAddress { number, address } => {
            commands::tracking::set_address(&service, number, &address, output_controls)
        }
        Command::Delete { number } => commands::tracking::delete(&service, number, output_controls),
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Build output controls from global flags
    let output_controls = OutputControls {
        json: cli.json,
        compact: cli.compact,
        fields: cli.fields.clone(),
    };

    let db_path = cli.db.clone().unwrap_or_else(default_db_path);
    tracing::debug!(path = ?db_path, "using parcel database");

    match run(cli.command, &db_path, &output_controls) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if output_controls.json {
                println!("{}", output::format_error(&format!("{:#}", e)));
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(1)
        }
    }
}
