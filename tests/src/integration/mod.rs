//! # Integration Tests
//!
//! Cross-subsystem custody flows driven through the orchestrator.

pub mod scenarios;
