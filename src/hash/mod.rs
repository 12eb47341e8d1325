//! Hash computation module
//!
//! Provides MD5 and SHA-256 digests of files, streamed in fixed-size chunks.

mod digest;

pub use digest::*;
