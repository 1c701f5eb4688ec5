//! # E-Waste Custody Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Fully wired harness with a manual clock
//! ├── integration/      # End-to-end custody scenarios
//! ├── properties.rs     # proptest properties over the action surface
//! └── concurrency.rs    # Racing writers against one ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ew-tests
//!
//! # By category
//! cargo test -p ew-tests integration::
//! cargo test -p ew-tests properties::
//! cargo test -p ew-tests concurrency::
//!
//! # Benchmarks
//! cargo bench -p ew-tests
//! ```

pub mod concurrency;
pub mod fixtures;
pub mod integration;
pub mod properties;
