// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Orbcodec CLI
//!
//! Command-line tool for CORBA object references.
//!
//! ## Usage
//!
//! ```sh
//! # Parse a corbaloc locator
//! orbcodec locator parse corbaloc:iiop:1.2@example.com:2809/NameService
//!
//! # Resolve rir: locators against configured initial references
//! orbcodec --config orb.toml locator resolve corbaloc:rir:/NameService
//!
//! # Stringify a locator as an IOR
//! orbcodec ior encode corbaloc::example.com/Key --type-id IDL:Test:1.0
//!
//! # Decode a stringified IOR
//! orbcodec ior decode IOR:00000000000000010000000000000000
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{IorCmd, LocatorCmd};
use common::{Context, Result};
use orbcodec::OrbError;
use tracing_subscriber::EnvFilter;

/// Orbcodec - CORBA object reference toolkit
///
/// Parse corbaloc locators and encode or decode stringified IORs.
#[derive(Parser, Clone)]
#[command(name = "orbcodec")]
#[command(about = "CORBA CDR and corbaloc toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error); defaults to RUST_LOG or warn
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// corbaloc operations (parse, resolve)
    #[command(subcommand)]
    Locator(LocatorCmd),

    /// Stringified IOR operations (encode, decode)
    #[command(subcommand)]
    Ior(IorCmd),
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let ctx = Context::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Locator(cmd) => cmd.run(&ctx),
        Commands::Ior(cmd) => cmd.run(&ctx),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        if let Some(err) = e.downcast_ref::<OrbError>() {
            for (field, value) in err.log_fields() {
                tracing::debug!(field, value = %value, "error detail");
            }
        }
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
