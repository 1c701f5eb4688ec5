//! # E-Waste Custody Runtime
//!
//! Reads one JSON action per line on stdin and writes one JSON response per
//! line on stdout. Logs go to stderr.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, else `EW_LOG_LEVEL`, else `info`)
//! 2. Load configuration from the environment
//! 3. Validate that a bootstrap admin is set
//! 4. Restore ledgers from the snapshot, if configured
//! 5. Serve until stdin closes or Ctrl+C
//! 6. Save the snapshot, also when serving failed

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use custody_runtime::container::config::{DEFAULT_LOG_LEVEL, ENV_LOG_LEVEL};
use custody_runtime::{load_config, CustodyRuntime};
use shared_types::SystemClock;

fn init_tracing() -> Result<()> {
    let fallback = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = load_config();
    let runtime = CustodyRuntime::new(config, Arc::new(SystemClock))?;

    info!("Custody runtime is ready. Reading actions from stdin.");
    let stdin = BufReader::new(tokio::io::stdin());
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl+C")?;
        info!("Ctrl+C received");
        Ok::<(), anyhow::Error>(())
    };

    runtime.run(stdin, tokio::io::stdout(), interrupt).await
}
