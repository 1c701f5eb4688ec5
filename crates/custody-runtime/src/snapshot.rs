//! # Ledger Snapshots
//!
//! Whole-ledger JSON snapshots, restored at startup and saved at shutdown.
//!
//! ## File Layout
//!
//! ```text
//! <snapshot_path>        JSON document, one TableSnapshot per table
//! <snapshot_path>.tmp    written first, then renamed over the snapshot
//! <snapshot_path>.lock   held exclusively while a runtime owns the snapshot
//! ```
//!
//! Two runtimes pointed at the same snapshot would overwrite each other's
//! shutdown save, so the second one fails to acquire the lock.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ew_03_shipment_tracker::Shipment;
use ew_04_compliance_engine::{Audit, Certificate, NonComplianceRecord};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use shared_types::{ActorProfile, TableSnapshot, Timestamp, WasteItem};
use thiserror::Error;
use tracing::{debug, info};

/// Snapshot document version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Errors from snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("Snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot file is not a valid document.
    #[error("Snapshot at {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot was written by an incompatible version.
    #[error("Snapshot format {found} is not supported (expected {SNAPSHOT_FORMAT_VERSION})")]
    UnsupportedFormat { found: u32 },

    /// Another runtime holds the snapshot.
    #[error("Snapshot {path} is locked by another runtime")]
    Locked { path: PathBuf },
}

/// Contents of every ledger table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodySnapshot {
    pub format_version: u32,
    pub saved_at: Timestamp,
    #[serde(default)]
    pub actors: TableSnapshot<ActorProfile>,
    #[serde(default)]
    pub waste_items: TableSnapshot<WasteItem>,
    #[serde(default)]
    pub shipments: TableSnapshot<Shipment>,
    #[serde(default)]
    pub audits: TableSnapshot<Audit>,
    #[serde(default)]
    pub non_compliance: TableSnapshot<NonComplianceRecord>,
    #[serde(default)]
    pub certificates: TableSnapshot<Certificate>,
}

impl CustodySnapshot {
    /// Total rows across all tables.
    pub fn row_count(&self) -> usize {
        self.actors.rows.len()
            + self.waste_items.rows.len()
            + self.shipments.rows.len()
            + self.audits.rows.len()
            + self.non_compliance.rows.len()
            + self.certificates.rows.len()
    }

    /// Read a snapshot. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, SnapshotError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot found");
                return Ok(None);
            }
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let snapshot: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            SnapshotError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedFormat {
                found: snapshot.format_version,
            });
        }

        info!(
            path = %path.display(),
            rows = snapshot.row_count(),
            saved_at = snapshot.saved_at,
            "Snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    /// Write the snapshot via a temporary file and an atomic rename.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };
        let tmp_path = sibling(path, "tmp");

        let file = File::create(&tmp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| {
            SnapshotError::Malformed {
                path: tmp_path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(io_err)?;
        writer
            .into_inner()
            .map_err(|e| io_err(e.into_error()))?
            .sync_all()
            .map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)?;

        info!(path = %path.display(), rows = self.row_count(), "Snapshot saved");
        Ok(())
    }
}

/// Exclusive claim on a snapshot path.
///
/// Acquired on startup, released on drop (RAII).
pub struct SnapshotLock {
    file: File,
    path: PathBuf,
}

impl SnapshotLock {
    /// Acquire the lock next to `snapshot_path`.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Locked` if another runtime holds it.
    pub fn acquire(snapshot_path: &Path) -> Result<Self, SnapshotError> {
        let path = sibling(snapshot_path, "lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| SnapshotError::Io {
                path: path.clone(),
                source,
            })?;

        if file.try_lock_exclusive().is_err() {
            return Err(SnapshotError::Locked { path });
        }
        debug!(path = %path.display(), "Snapshot lock acquired");
        Ok(Self { file, path })
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = fs::remove_file(&self.path);
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
