//! Logging setup for the `cairn` binary.
//!
//! Resource output goes to stdout, so every log event is written to
//! stderr. Colors are used only when stderr is a terminal.
//!
//! ```bash
//! RUST_LOG=debug cairn scan s3:bucket/migrations
//! RUST_LOG=cairn_resource=debug,cairn_object=trace cairn read bucket/sql
//! ```

use std::io::IsTerminal;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Directives used when `RUST_LOG` is unset or blank.
const DEFAULT_DIRECTIVES: &str = "info";

/// Installs the global subscriber filtered by `RUST_LOG`.
pub(crate) fn init_tracing() -> anyhow::Result<()> {
    let filter = env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())?;
    let stderr = fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr)
        .with(filter)
        .try_init()
        .context("failed to install the tracing subscriber")
}

fn env_filter(directives: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVES);

    EnvFilter::try_new(directives).with_context(|| format!("invalid log directives '{directives}'"))
}
