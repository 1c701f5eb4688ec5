//! # In-Memory Ledger Adapter
//!
//! `Ledger<T>` backed by a `BTreeMap` behind a `parking_lot::RwLock`.
//!
//! One write lock per table serializes all writers of that entity type, so
//! a swap observes exactly the version the caller read or fails. Readers take
//! the read lock and clone whole rows.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::ledger::{Ledger, LedgerError, LedgerRecord, Versioned};

/// Single-node ledger table.
pub struct InMemoryLedger<T: LedgerRecord> {
    rows: RwLock<BTreeMap<T::Id, Versioned<T>>>,
    sequence: AtomicU64,
}

impl<T: LedgerRecord> InMemoryLedger<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns true if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Copy out every row and the sequence counter for a snapshot.
    pub fn export(&self) -> TableSnapshot<T> {
        let rows = self.rows.read();
        TableSnapshot {
            sequence: self.sequence.load(Ordering::SeqCst),
            rows: rows.values().cloned().collect(),
        }
    }

    /// Replace the table contents with a snapshot.
    pub fn import(&self, snapshot: TableSnapshot<T>) {
        let mut rows = self.rows.write();
        rows.clear();
        for row in snapshot.rows {
            rows.insert(row.record.id(), row);
        }
        self.sequence.store(snapshot.sequence, Ordering::SeqCst);
        debug!(table = T::TABLE, rows = rows.len(), "Ledger table restored");
    }
}

impl<T: LedgerRecord> Default for InMemoryLedger<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LedgerRecord> Ledger<T> for InMemoryLedger<T> {
    fn next_sequence(&self) -> Result<u64, LedgerError> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn insert(&self, record: T) -> Result<Versioned<T>, LedgerError> {
        let id = record.id();
        let mut rows = self.rows.write();
        if rows.contains_key(&id) {
            return Err(LedgerError::duplicate::<T>(id));
        }
        let row = Versioned::initial(record);
        rows.insert(id, row.clone());
        Ok(row)
    }

    fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, LedgerError> {
        Ok(self.rows.read().get(&id).cloned())
    }

    fn compare_and_swap(
        &self,
        expected_version: u64,
        record: T,
    ) -> Result<Versioned<T>, LedgerError> {
        let id = record.id();
        let mut rows = self.rows.write();
        let current = rows
            .get_mut(&id)
            .ok_or_else(|| LedgerError::missing::<T>(id))?;

        if current.version != expected_version {
            return Err(LedgerError::VersionConflict {
                table: T::TABLE,
                key: id.to_string(),
                expected: expected_version,
                found: current.version,
            });
        }

        current.version += 1;
        current.record = record;
        Ok(current.clone())
    }

    fn scan(&self) -> Result<Vec<Versioned<T>>, LedgerError> {
        Ok(self.rows.read().values().cloned().collect())
    }

    fn retract(&self, id: T::Id) -> Result<(), LedgerError> {
        self.rows
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::missing::<T>(id))
    }
}

/// Serializable contents of one table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(bound = "")]
pub struct TableSnapshot<T: LedgerRecord> {
    pub sequence: u64,
    pub rows: Vec<Versioned<T>>,
}

impl<T: LedgerRecord> Default for TableSnapshot<T> {
    fn default() -> Self {
        Self {
            sequence: 0,
            rows: Vec::new(),
        }
    }
}
