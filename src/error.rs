//! Error types and exit codes for the patcher.
//!
//! Exactly one condition is fatal by contract: the target file is missing,
//! which exits with `1`. Everything the tool cannot recover from beyond that
//! (read/write failures, a broken built-in pattern, an unknown executable
//! location) is an internal error and exits with `10`.
//!
//! Advisory conditions (anchor not found, verification string absent) are
//! not errors at all; they are carried on the report.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// The target file does not exist.
    TargetMissing = 1,
    /// I/O failure or unexpected state.
    InternalError = 10,
}

impl ExitStatus {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for a patch run.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The file to patch does not exist.
    #[error("Error: Could not find sim.py at {}", .path.display())]
    TargetFileMissing { path: PathBuf },

    /// Failed to read the target file.
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the patched content back.
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A rule pattern failed to compile.
    #[error("invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The running executable's own location could not be determined.
    #[error("cannot determine executable location: {0}")]
    ExecutableLocation(#[source] io::Error),
}

/// Result type for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;

impl PatchError {
    /// Exit status this error maps to.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            PatchError::TargetFileMissing { .. } => ExitStatus::TargetMissing,
            PatchError::Read { .. }
            | PatchError::Write { .. }
            | PatchError::InvalidPattern { .. }
            | PatchError::ExecutableLocation(_) => ExitStatus::InternalError,
        }
    }

    /// Stable string code used in JSON error output.
    pub fn code_name(&self) -> &'static str {
        match self {
            PatchError::TargetFileMissing { .. } => "TargetFileMissing",
            PatchError::Read { .. } => "ReadError",
            PatchError::Write { .. } => "WriteError",
            PatchError::InvalidPattern { .. } => "InvalidPattern",
            PatchError::ExecutableLocation(_) => "ExecutableLocation",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
