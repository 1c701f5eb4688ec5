//! # Custody Runtime
//!
//! Owns the container, the snapshot lock and the background tasks.
//!
//! ## Startup Sequence
//!
//! 1. Acquire the snapshot lock (when a snapshot path is configured)
//! 2. Restore ledgers from the snapshot, if one exists
//! 3. Wire subsystems in dependency order
//! 4. Start the bus logger
//! 5. Serve requests until EOF or shutdown
//!
//! ## Shutdown Sequence
//!
//! 1. Signal shutdown to background tasks
//! 2. Save the snapshot
//! 3. Release the lock (on drop)

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use ew_01_identity_registry::IdentityRegistryApi;
use shared_bus::EventFilter;
use shared_types::{ErrorKind, TimeSource};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};

use crate::container::{CustodyContainer, RuntimeConfig};
use crate::protocol::{handle_line, Response};
use crate::snapshot::{CustodySnapshot, SnapshotLock};

/// Counters for one `serve` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub handled: u64,
    pub rejected: u64,
}

/// The custody runtime.
pub struct CustodyRuntime {
    container: Arc<CustodyContainer>,
    _lock: Option<SnapshotLock>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl CustodyRuntime {
    /// Validate configuration, restore state and wire subsystems.
    pub fn new(config: RuntimeConfig, clock: Arc<dyn TimeSource>) -> Result<Self> {
        config.validate().context("Invalid runtime configuration")?;

        let (lock, snapshot) = match &config.snapshot_path {
            Some(path) => {
                let lock = SnapshotLock::acquire(path)?;
                let snapshot = CustodySnapshot::load(path)?;
                (Some(lock), snapshot)
            }
            None => {
                info!("No snapshot path configured; state is kept in memory only");
                (None, None)
            }
        };

        let container = CustodyContainer::new(config, clock, snapshot)
            .context("Failed to wire custody subsystems")?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            container: Arc::new(container),
            _lock: lock,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Start background tasks.
    pub fn start(&self) -> JoinHandle<()> {
        info!("===========================================");
        info!("  E-Waste Custody Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("  Admin: {}", self.container.registry.admin());
        info!("===========================================");

        let mut events = self.container.bus.event_stream(EventFilter::all());
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    next = events.next() => match next {
                        Some(message) => info!(
                            event_id = %message.event_id,
                            emitted_by = %message.emitted_by,
                            topic = ?message.event.topic(),
                            "[bus] {}",
                            serde_json::to_string(&message.event).unwrap_or_default()
                        ),
                        None => break,
                    },
                    _ = shutdown.changed() => {
                        info!("[bus] Shutdown signal received");
                        break;
                    }
                }
            }
        })
    }

    /// Read request lines from `reader` and write one response line each.
    ///
    /// A line that is not UTF-8 gets an `invalid_input` reply like any other
    /// malformed request. Returns at EOF, when shutdown is signalled, or when
    /// the reader or writer fails.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<ServeStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut shutdown = self.shutdown_rx.clone();
        let mut stats = ServeStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => {
                    read.context("Failed to read request")?
                }
                _ = shutdown.changed() => break,
            };
            if read == 0 {
                debug!("Request stream closed");
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => handle_line(self.container.orchestrator.as_ref(), line.trim_end()),
                Err(e) => {
                    debug!(error = %e, "Request line is not UTF-8");
                    Response::error(ErrorKind::InvalidInput, format!("Malformed request: {e}"))
                }
            };
            stats.handled += 1;
            if !response.is_ok() {
                stats.rejected += 1;
            }

            writer
                .write_all(response.to_line().as_bytes())
                .await
                .context("Failed to write response")?;
            writer.write_all(b"\n").await.context("Failed to write response")?;
            writer.flush().await.context("Failed to flush response")?;
        }

        info!(handled = stats.handled, rejected = stats.rejected, "Request loop finished");
        Ok(stats)
    }

    /// Start the bus logger, serve until EOF or `interrupt`, then shut down.
    ///
    /// Shutdown always runs, so the snapshot is saved even when serving
    /// failed. The serving error is returned after that.
    pub async fn run<R, W, I>(&self, reader: R, writer: W, interrupt: I) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        I: Future<Output = Result<()>>,
    {
        let bus_logger = self.start();

        let outcome = tokio::select! {
            served = self.serve(reader, writer) => served.map(|_| ()),
            interrupted = interrupt => interrupted,
        };
        if let Err(e) = &outcome {
            error!("Request loop failed: {:#}", e);
        }

        let saved = self.shutdown();
        if let Err(e) = bus_logger.await {
            warn!(error = %e, "Bus logger task did not finish cleanly");
        }
        outcome.and(saved)
    }

    /// Stop background tasks and save the snapshot.
    pub fn shutdown(&self) -> Result<()> {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            // All receivers gone: nothing left to stop.
            debug!("Shutdown signal had no listeners: {}", e);
        }

        match &self.container.config.snapshot_path {
            Some(path) => {
                if let Err(e) = self.container.snapshot().save(path) {
                    error!("Failed to save snapshot: {}", e);
                    return Err(e).context("Snapshot save failed");
                }
            }
            None => warn!("No snapshot path configured; ledger state is discarded"),
        }

        info!("Shutdown complete");
        Ok(())
    }

    /// Get a reference to the subsystem container.
    pub fn container(&self) -> Arc<CustodyContainer> {
        Arc::clone(&self.container)
    }
}
