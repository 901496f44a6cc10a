//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── storage: StorageConfig   # provider, endpoint, encoding, page size
//! └── command: Command         # scan | read
//! ```
//!
//! All options can be provided via CLI arguments or `CAIRN_*` environment
//! variables. Use `--help` to see all available options.

mod storage;

use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
pub use storage::{Provider, StorageConfig, parse_locations};

use crate::TRACING_TARGET_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "cairn")]
#[command(about = "Discover and read migration scripts stored in object storage")]
#[command(version)]
pub struct Cli {
    /// Storage provider and decoding configuration.
    #[clap(flatten)]
    pub storage: StorageConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the resources found under each location.
    Scan(ScanArgs),
    /// Print the decoded content of the resources under each location.
    Read(ReadArgs),
}

/// Arguments of `cairn scan`.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Locations of the form `[scheme:]container/prefix`.
    #[arg(required = true)]
    pub locations: Vec<String>,

    /// Also print the object size reported by the listing.
    #[arg(long, short = 'l')]
    pub long: bool,
}

/// Arguments of `cairn read`.
#[derive(Debug, Clone, Args)]
pub struct ReadArgs {
    /// Locations of the form `[scheme:]container/prefix`.
    #[arg(required = true)]
    pub locations: Vec<String>,

    /// Only read resources with this file name.
    #[arg(long)]
    pub name: Option<String>,

    /// Do not print a header line before each resource.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.storage
            .validate()
            .context("invalid storage configuration")?;
        Ok(())
    }

    /// Logs build information and configuration.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );
        self.storage.log();
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
