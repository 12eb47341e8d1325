//! Integrity check orchestration
//!
//! Hashes the source file, and the copy file when there is one, as two
//! independent tasks on a bounded rayon pool, then decides the verdict.

use crate::config::{CheckConfig, Comparison, HashAlgorithm};
use crate::error::{IntegrityError, Result};
use crate::hash::{hash_file, HashResult};
use std::path::Path;
use tracing::{debug, info, warn};

/// Source of file digests used by the checker
pub trait DigestProvider: Sync {
    /// Digest `path` with `algorithm`
    fn digest(&self, path: &Path, algorithm: HashAlgorithm) -> Result<HashResult>;
}

/// Reads and hashes files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDigester;

impl DigestProvider for FileDigester {
    fn digest(&self, path: &Path, algorithm: HashAlgorithm) -> Result<HashResult> {
        hash_file(path, algorithm)
    }
}

/// Outcome of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Source digest equals the provided hash
    MatchesProvidedHash,
    /// Source digest equals the copy file's digest
    MatchesCopyFile,
    /// Neither comparator matched
    NoMatch,
}

impl Verdict {
    /// Apply the comparison policy.
    ///
    /// A provided hash is consulted before a copy file.
    pub fn decide(source: &HashResult, provided_hash: Option<&str>, copy: Option<&HashResult>) -> Self {
        if provided_hash.is_some_and(|expected| source.matches_hex(expected)) {
            Self::MatchesProvidedHash
        } else if copy.is_some_and(|copy| copy.verify(source)) {
            Self::MatchesCopyFile
        } else {
            Self::NoMatch
        }
    }

    /// Line reported to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::MatchesProvidedHash => "Source file hash matches provided hash.",
            Self::MatchesCopyFile => "Source file hash matches copy file hash.",
            Self::NoMatch => "Source file hash does not match provided hash or copy file hash.",
        }
    }

    /// True for either kind of match
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Verdict together with the digests it was based on
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The verdict
    pub verdict: Verdict,
    /// Digest of the source file
    pub source_hash: HashResult,
    /// Digest of the copy file, when one was compared
    pub copy_hash: Option<HashResult>,
}

/// Runs integrity checks with a fixed algorithm and worker bound
#[derive(Debug, Clone)]
pub struct IntegrityChecker<D = FileDigester> {
    algorithm: HashAlgorithm,
    threads: usize,
    digester: D,
}

impl IntegrityChecker<FileDigester> {
    /// Create a checker that hashes files from disk
    pub fn new(algorithm: HashAlgorithm, threads: usize) -> Self {
        Self {
            algorithm,
            threads,
            digester: FileDigester,
        }
    }

    /// Create a checker from a loaded configuration
    pub fn from_config(config: &CheckConfig) -> Self {
        Self::new(config.algorithm, config.threads.workers)
    }
}

impl<D: DigestProvider> IntegrityChecker<D> {
    /// Replace the digest source
    pub fn with_digester<E: DigestProvider>(self, digester: E) -> IntegrityChecker<E> {
        IntegrityChecker {
            algorithm: self.algorithm,
            threads: self.threads,
            digester,
        }
    }

    /// Algorithm used for every digest
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Worker bound of the digest pool
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Check `source` against one or both optional comparators.
    ///
    /// Fails with a configuration error, without hashing anything, unless
    /// exactly one of them is set.
    pub fn check_options(
        &self,
        source: &Path,
        copy_file: Option<&Path>,
        provided_hash: Option<&str>,
    ) -> Result<CheckReport> {
        let comparison = Comparison::from_options(
            copy_file.map(Path::to_path_buf),
            provided_hash.map(str::to_string),
        )?;
        self.check(source, &comparison)
    }

    /// Hash `source` (and the copy file, if any) and decide the verdict.
    ///
    /// Both digests are joined before any error is returned. When both
    /// fail, the source file's error wins.
    pub fn check(&self, source: &Path, comparison: &Comparison) -> Result<CheckReport> {
        match comparison {
            Comparison::ProvidedHash(expected) => {
                info!(source = %source.display(), algorithm = self.algorithm.name(), "comparing against provided hash");
                if expected.len() != self.algorithm.hex_len() {
                    warn!(
                        "provided hash has {} characters, {} digests have {}",
                        expected.len(),
                        self.algorithm.name(),
                        self.algorithm.hex_len()
                    );
                }
            }
            Comparison::CopyFile(copy) => {
                info!(source = %source.display(), copy = %copy.display(), algorithm = self.algorithm.name(), "comparing against copy file");
            }
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| IntegrityError::ThreadPoolError(e.to_string()))?;
        debug!(workers = self.threads, "digest pool ready");

        let (source_result, copy_result) = pool.install(|| {
            rayon::join(
                || self.digester.digest(source, self.algorithm),
                || {
                    comparison
                        .copy_file()
                        .map(|copy| self.digester.digest(copy, self.algorithm))
                },
            )
        });

        let source_hash = source_result?;
        let copy_hash = copy_result.transpose()?;

        let verdict = Verdict::decide(&source_hash, comparison.provided_hash(), copy_hash.as_ref());
        debug!(?verdict, source_hash = %source_hash, copy_hash = ?copy_hash.as_ref().map(|h| h.hash.as_str()), "check complete");

        Ok(CheckReport {
            verdict,
            source_hash,
            copy_hash,
        })
    }
}

/// Check `source` with a file-backed checker.
///
/// Exactly one of `copy_file` and `provided_hash` must be set.
pub fn check_integrity(
    source: &Path,
    algorithm: HashAlgorithm,
    copy_file: Option<&Path>,
    provided_hash: Option<&str>,
    threads: usize,
) -> Result<CheckReport> {
    IntegrityChecker::new(algorithm, threads).check_options(source, copy_file, provided_hash)
}
