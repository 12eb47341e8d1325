//! # HashVerify - File Integrity Checker
//!
//! HashVerify computes the MD5 or SHA-256 digest of a source file and
//! compares it with either a hash you already have or the digest of a
//! second copy of the file.
//!
//! ## Features
//!
//! - **Two comparison modes**: a provided hex digest, or a copy file
//! - **Parallel digests**: source and copy are hashed concurrently on a
//!   bounded worker pool
//! - **Safe thread selection**: explicit requests are capped at
//!   `min(32, cpus + 4)`
//!
//! ## Quick Start
//!
//! ```no_run
//! use hashverify::config::HashAlgorithm;
//! use hashverify::core::check_integrity;
//! use std::path::Path;
//!
//! let report = check_integrity(
//!     Path::new("/downloads/image.iso"),
//!     HashAlgorithm::Md5,
//!     None,
//!     Some("9e107d9d372bb6826bd81d3542a419d6"),
//!     4,
//! ).unwrap();
//!
//! println!("{}", report.verdict);
//! ```
//!
//! ## Comparing Against a Copy
//!
//! ```no_run
//! use hashverify::config::{Comparison, HashAlgorithm};
//! use hashverify::core::IntegrityChecker;
//! use hashverify::system::ThreadPolicy;
//! use std::path::{Path, PathBuf};
//!
//! let threads = ThreadPolicy::detect(Some(2));
//! let checker = IntegrityChecker::new(HashAlgorithm::Sha256, threads.workers);
//!
//! let report = checker.check(
//!     Path::new("/data/archive.tar"),
//!     &Comparison::CopyFile(PathBuf::from("/backup/archive.tar")),
//! ).unwrap();
//!
//! assert!(report.verdict.is_match());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod hash;
pub mod system;

// Re-export commonly used types
pub use config::{CheckConfig, Comparison, HashAlgorithm};
pub use core::{check_integrity, CheckReport, IntegrityChecker, Verdict};
pub use error::{IntegrityError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
