//! Core integrity checking
//!
//! Hashes the source and copy files in parallel and applies the
//! comparison policy.

mod checker;

pub use checker::*;
