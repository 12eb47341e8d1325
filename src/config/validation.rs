//! Pre-flight checks on a configuration
//!
//! Runs before any hashing so a missing file is reported without partial work.

use crate::config::CheckConfig;
use crate::error::{IntegrityError, Result};

/// Confirm the source file, and the copy file if any, exist.
pub fn validate(config: &CheckConfig) -> Result<()> {
    if !config.source.exists() {
        return Err(IntegrityError::SourceNotFound(config.source.clone()));
    }

    if let Some(copy) = config.comparison.copy_file() {
        if !copy.exists() {
            return Err(IntegrityError::CopyNotFound(copy.to_path_buf()));
        }
    }

    Ok(())
}
