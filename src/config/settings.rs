//! Configuration settings for HashVerify
//!
//! Defines the CLI arguments, the supported hash algorithms and the
//! immutable configuration a check runs with.

use crate::error::{IntegrityError, Result};
use crate::system::ThreadPolicy;
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// HashVerify - check a file against a known hash or a copy
#[derive(Parser, Debug, Clone)]
#[command(name = "hashverify")]
#[command(author = "HashVerify Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Utility to check integrity of files")]
#[command(long_about = r#"
HashVerify computes the digest of a source file and compares it either
with a hash you already have or with the digest of a second file.

Examples:
  hashverify image.iso -p 9e107d9d372bb6826bd81d3542a419d6
  hashverify image.iso -a sha256 -p <sha256-hex>
  hashverify data.tar -c /backup/data.tar --threads 2
"#)]
#[command(group(
    ArgGroup::new("comparison")
        .required(true)
        .multiple(false)
        .args(["provided_hash", "copy_file"])
))]
pub struct CliArgs {
    /// Path to the original file whose integrity is to be verified
    #[arg(value_name = "SOURCE_FILE")]
    pub source_file: PathBuf,

    /// Hashing algorithm to use for verification
    #[arg(short = 'a', long, value_enum, default_value = "md5", value_name = "ALGO")]
    pub algorithm: HashAlgorithm,

    /// Number of threads to use (values <= 0 fall back to the default)
    #[arg(short = 't', long, allow_negative_numbers = true, value_name = "NUM")]
    pub threads: Option<i64>,

    /// Hash value of the file to compare against (direct hash comparison)
    #[arg(short = 'p', long, value_name = "HASH")]
    pub provided_hash: Option<String>,

    /// Path to the file to compare against the source file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub copy_file: Option<PathBuf>,

    /// Verbose logging on stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Hash algorithm for integrity verification
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// MD5 (128-bit)
    #[default]
    #[value(name = "md5")]
    Md5,
    /// SHA-256 (256-bit)
    #[value(name = "sha256")]
    Sha256,
}

impl HashAlgorithm {
    /// Get the output size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 => 32,
        }
    }

    /// Length of the lowercase hex digest
    pub fn hex_len(&self) -> usize {
        self.output_size() * 2
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha256 => "SHA-256",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What the source file is compared against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// A digest string supplied by the user
    ProvidedHash(String),
    /// A second file hashed with the same algorithm
    CopyFile(PathBuf),
}

impl Comparison {
    /// Build from the two optional CLI values.
    ///
    /// Exactly one of them must be set. An empty provided hash counts as unset.
    pub fn from_options(copy_file: Option<PathBuf>, provided_hash: Option<String>) -> Result<Self> {
        let provided_hash = provided_hash.filter(|hash| !hash.is_empty());

        match (copy_file, provided_hash) {
            (Some(copy), None) => Ok(Self::CopyFile(copy)),
            (None, Some(hash)) => Ok(Self::ProvidedHash(hash)),
            (None, None) => Err(IntegrityError::config(
                "Either a copy file or a provided hash must be specified.",
            )),
            (Some(_), Some(_)) => Err(IntegrityError::config(
                "A copy file and a provided hash are mutually exclusive.",
            )),
        }
    }

    /// Copy file path, if this is a file comparison
    pub fn copy_file(&self) -> Option<&Path> {
        match self {
            Self::CopyFile(path) => Some(path),
            Self::ProvidedHash(_) => None,
        }
    }

    /// Provided digest, if this is a hash comparison
    pub fn provided_hash(&self) -> Option<&str> {
        match self {
            Self::ProvidedHash(hash) => Some(hash),
            Self::CopyFile(_) => None,
        }
    }
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// File whose integrity is verified
    pub source: PathBuf,
    /// What the source is compared against
    pub comparison: Comparison,
    /// Digest algorithm
    pub algorithm: HashAlgorithm,
    /// Worker count for the digest pool
    pub threads: ThreadPolicy,
}

impl CheckConfig {
    /// Create config from CLI arguments.
    ///
    /// `host_parallelism` is passed in rather than queried so the thread
    /// policy stays deterministic under test.
    pub fn from_cli(args: &CliArgs, host_parallelism: Option<usize>) -> Result<Self> {
        let comparison = Comparison::from_options(args.copy_file.clone(), args.provided_hash.clone())?;

        Ok(Self {
            source: args.source_file.clone(),
            comparison,
            algorithm: args.algorithm,
            threads: ThreadPolicy::resolve(args.threads, host_parallelism),
        })
    }
}
