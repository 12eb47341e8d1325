//! Worker count selection
//!
//! At most two digests are ever computed per check, so the pool size only
//! bounds resource usage. The bound is still applied so an explicit
//! `--threads` request can never oversubscribe the host.

use tracing::{debug, warn};

/// Worker count used when nothing else applies
pub const DEFAULT_THREADS: usize = 4;

/// Hard ceiling on the worker count
pub const MAX_THREADS: usize = 32;

/// Extra workers allowed above the host's logical CPU count
pub const HEADROOM_THREADS: usize = 4;

/// Logical CPU count of this machine, or `None` when it cannot be determined
pub fn detect_host_parallelism() -> Option<usize> {
    Some(num_cpus::get()).filter(|&cpus| cpus > 0)
}

/// Pick the number of workers for a request.
///
/// The cap is `min(MAX_THREADS, host + HEADROOM_THREADS)`. A missing or
/// non-positive request yields `min(DEFAULT_THREADS, cap)`; anything else is
/// clamped to the cap. Unknown host parallelism yields `DEFAULT_THREADS`.
pub fn select_threads(requested: Option<i64>, host_parallelism: Option<usize>) -> usize {
    let Some(available) = host_parallelism else {
        warn!("CPU count not available. Using default value: {}", DEFAULT_THREADS);
        return DEFAULT_THREADS;
    };

    let cap = MAX_THREADS.min(available.saturating_add(HEADROOM_THREADS));

    match requested {
        Some(n) if n > 0 => cap.min(usize::try_from(n).unwrap_or(usize::MAX)),
        _ => DEFAULT_THREADS.min(cap),
    }
}

/// A resolved thread request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadPolicy {
    /// What the user asked for, if anything
    pub requested: Option<i64>,
    /// Host parallelism the decision was based on
    pub host_parallelism: Option<usize>,
    /// Workers the digest pool will use
    pub workers: usize,
}

impl ThreadPolicy {
    /// Resolve a request against the given host parallelism
    pub fn resolve(requested: Option<i64>, host_parallelism: Option<usize>) -> Self {
        let workers = select_threads(requested, host_parallelism);
        debug!(?requested, ?host_parallelism, workers, "resolved thread count");

        Self {
            requested,
            host_parallelism,
            workers,
        }
    }

    /// Resolve a request against this machine
    pub fn detect(requested: Option<i64>) -> Self {
        Self::resolve(requested, detect_host_parallelism())
    }

    /// True when the user's request was lowered to fit the cap
    pub fn was_clamped(&self) -> bool {
        matches!(self.requested, Some(n) if n > 0 && (n as u64) > self.workers as u64)
    }
}
