//! # Custody Runtime Library
//!
//! This library exposes the internal modules of the custody runtime for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - Configuration and subsystem wiring
//! - `snapshot` - JSON ledger snapshots and the snapshot lock
//! - `protocol` - JSON-lines request/response surface
//! - `runtime` - Startup, request loop, shutdown

#![warn(clippy::all)]

pub mod container;
pub mod protocol;
pub mod runtime;
pub mod snapshot;

pub use container::{load_config, ConfigError, CustodyContainer, LedgerTables, RuntimeConfig};
pub use protocol::{handle_line, Request, Response};
pub use runtime::{CustodyRuntime, ServeStats};
pub use snapshot::{CustodySnapshot, SnapshotError, SnapshotLock, SNAPSHOT_FORMAT_VERSION};
