//! # Domain Module
//!
//! Errors, configuration and invariants of the Identity Registry.

pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
