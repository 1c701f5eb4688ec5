//! # Ledger Port
//!
//! The persistence contract every custody subsystem writes through.
//!
//! ## Guarantees
//!
//! | Primitive | Semantics |
//! |-----------|-----------|
//! | `insert` | Create-only. Fails with `DuplicateKey` if the id exists. |
//! | `get` | Whole-row read, never a partially applied update. |
//! | `compare_and_swap` | Update-if-unchanged against the caller's version. |
//! | `scan` | All rows of the table in id order. |
//! | `retract` | Removes a row. Reserved for compensating a failed compound write. |
//!
//! Rows carry a version that starts at 1 and increases by one on every
//! successful swap. A read-validate-write sequence is atomic per call when the
//! write is a swap against the version that was read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;

use crate::errors::{ErrorKind, HasErrorKind};

/// A record that can be stored in a ledger table.
pub trait LedgerRecord: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Primary key.
    type Id: Copy + Eq + Ord + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync;

    /// Table name, used in errors, logs and snapshots.
    const TABLE: &'static str;

    /// Primary key of this record.
    fn id(&self) -> Self::Id;
}

/// A stored row together with its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: u64,
    pub record: T,
}

impl<T> Versioned<T> {
    /// First version of a freshly inserted row.
    pub const INITIAL_VERSION: u64 = 1;

    /// Wrap a record at its initial version.
    pub fn initial(record: T) -> Self {
        Self {
            version: Self::INITIAL_VERSION,
            record,
        }
    }

    /// Drop the version.
    pub fn into_record(self) -> T {
        self.record
    }
}

/// Ledger failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Insert of an id that already exists.
    #[error("Duplicate key in {table}: {key}")]
    DuplicateKey { table: &'static str, key: String },

    /// Swap or retract of an id that does not exist.
    #[error("Missing row in {table}: {key}")]
    Missing { table: &'static str, key: String },

    /// The row changed since it was read.
    #[error("Version conflict in {table} for {key}: expected {expected}, found {found}")]
    VersionConflict {
        table: &'static str,
        key: String,
        expected: u64,
        found: u64,
    },

    /// The backing store could not complete the operation.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    /// Build a `DuplicateKey` error for a record type.
    pub fn duplicate<T: LedgerRecord>(id: T::Id) -> Self {
        Self::DuplicateKey {
            table: T::TABLE,
            key: id.to_string(),
        }
    }

    /// Build a `Missing` error for a record type.
    pub fn missing<T: LedgerRecord>(id: T::Id) -> Self {
        Self::Missing {
            table: T::TABLE,
            key: id.to_string(),
        }
    }

    /// Returns true if the caller lost a race on a swap.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

impl HasErrorKind for LedgerError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::VersionConflict { .. } => ErrorKind::Conflict,
            Self::Missing { .. } => ErrorKind::NotFound,
            Self::DuplicateKey { .. } | Self::Unavailable(_) => ErrorKind::Storage,
        }
    }
}

/// Repository interface for one entity type.
///
/// Implementations must serialize writers per table and must never expose a
/// partially written row to readers.
pub trait Ledger<T: LedgerRecord>: Send + Sync {
    /// Allocate the next sequence number for this table, starting at 1.
    fn next_sequence(&self) -> Result<u64, LedgerError>;

    /// Create a row.
    fn insert(&self, record: T) -> Result<Versioned<T>, LedgerError>;

    /// Read a row.
    fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, LedgerError>;

    /// Replace a row if its version still equals `expected_version`.
    fn compare_and_swap(&self, expected_version: u64, record: T)
        -> Result<Versioned<T>, LedgerError>;

    /// All rows in id order.
    fn scan(&self) -> Result<Vec<Versioned<T>>, LedgerError>;

    /// Remove a row written earlier in the same compound operation.
    fn retract(&self, id: T::Id) -> Result<(), LedgerError>;

    /// Convenience: the record only, without version.
    fn find(&self, id: T::Id) -> Result<Option<T>, LedgerError> {
        Ok(self.get(id)?.map(Versioned::into_record))
    }

    /// Convenience: all records matching a predicate.
    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Vec<T>, LedgerError> {
        Ok(self
            .scan()?
            .into_iter()
            .map(Versioned::into_record)
            .filter(|record| predicate(record))
            .collect())
    }
}

/// Declare a sequential `u64` identifier newtype for a ledger table.
#[macro_export]
macro_rules! ledger_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}
