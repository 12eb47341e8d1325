//! Configuration module for HashVerify
//!
//! Provides CLI argument parsing, the check configuration and its
//! pre-flight validation.

mod settings;
mod validation;

pub use settings::*;
pub use validation::validate;
