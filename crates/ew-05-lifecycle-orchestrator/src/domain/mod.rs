//! # Domain Module
//!
//! The action surface and the unified error.

pub mod actions;
pub mod errors;

pub use actions::*;
pub use errors::*;
