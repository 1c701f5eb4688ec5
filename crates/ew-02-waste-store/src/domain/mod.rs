//! # Domain Module
//!
//! Errors, requests and invariants of the Waste Item Store.

pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
