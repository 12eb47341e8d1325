//! Host resource detection
//!
//! Decides how many workers the digest pool may use on this machine.

mod threads;

pub use threads::*;
