//! Streaming file digests
//!
//! Files are read sequentially in fixed 4 KiB chunks and fed to an
//! incremental hasher. Each call owns its hasher, so independent files can be
//! hashed from different workers at once.

use crate::config::HashAlgorithm;
use crate::error::{IoResultExt, Result};
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read size used when streaming a file through a hasher
pub const CHUNK_SIZE: usize = 4096;

/// Hash result as hex string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashResult {
    /// The hash algorithm used
    pub algorithm: HashAlgorithm,
    /// Hash value as lowercase hex string
    pub hash: String,
    /// Bytes hashed
    pub size: u64,
}

impl HashResult {
    /// Create a new hash result
    pub fn new(algorithm: HashAlgorithm, hash: String, size: u64) -> Self {
        Self { algorithm, hash, size }
    }

    /// Same algorithm and same digest
    pub fn verify(&self, other: &HashResult) -> bool {
        self.algorithm == other.algorithm && self.hash == other.hash
    }

    /// Exact comparison against a digest string
    pub fn matches_hex(&self, expected: &str) -> bool {
        self.hash == expected
    }
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

/// Incremental hasher over the supported algorithms
#[derive(Clone)]
pub enum Hasher {
    /// MD5
    Md5(Md5),
    /// SHA-256
    Sha256(Sha256),
}

impl Hasher {
    /// Create a new hasher for the given algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(Md5::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
        }
    }

    /// Get the algorithm this hasher uses
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Md5(_) => HashAlgorithm::Md5,
            Self::Sha256(_) => HashAlgorithm::Sha256,
        }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
        }
    }

    /// Finalize and get the hash as lowercase hex
    pub fn finalize(self) -> String {
        match self {
            Self::Md5(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
        }
    }
}

/// Compute the digest of a file
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> Result<HashResult> {
    let mut file = File::open(path).with_path(path)?;
    let mut hasher = Hasher::new(algorithm);
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut size = 0u64;

    loop {
        let bytes_read = file.read(&mut buffer).with_path(path)?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
        size += bytes_read as u64;
    }

    let result = HashResult::new(algorithm, hasher.finalize(), size);
    debug!(
        path = %path.display(),
        algorithm = algorithm.name(),
        size = %humansize::format_size(size, humansize::BINARY),
        hash = %result.hash,
        "hashed file"
    );

    Ok(result)
}

/// Compute hash of data in memory
pub fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> HashResult {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    HashResult::new(algorithm, hasher.finalize(), data.len() as u64)
}
