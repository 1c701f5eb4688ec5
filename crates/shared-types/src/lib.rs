//! # Shared Types Crate
//!
//! Records, errors and ports shared by every custody subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Records read by more than one subsystem
//!   (`ActorProfile`, `WasteItem`) are defined here.
//! - **Repository per Entity**: Every subsystem persists through
//!   `Ledger<T>`, injected at construction. No subsystem holds global state.
//! - **One Error Taxonomy**: Subsystem errors classify into `ErrorKind`.

pub mod clock;
pub mod entities;
pub mod errors;
pub mod ledger;
pub mod memory_ledger;

pub use clock::{ManualClock, SystemClock, TimeSource};
pub use entities::*;
pub use errors::*;
pub use ledger::{Ledger, LedgerError, LedgerRecord, Versioned};
pub use memory_ledger::{InMemoryLedger, TableSnapshot};
