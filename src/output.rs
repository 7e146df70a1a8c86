//! Report types and rendering for CLI output.
//!
//! The default output is the human-readable progress text operators see
//! during an environment install. `--format json` emits the same report as a
//! single JSON object with `status` as its first field.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PatchError;
use crate::patcher::{HelperStatus, PatchOutcome, RuleCount};

/// Report of a completed patch run.
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    /// Always `"ok"`; errors use [`ErrorResponse`].
    pub status: String,
    pub target: PathBuf,
    pub dry_run: bool,
    pub helper: HelperStatus,
    pub rules: Vec<RuleCount>,
    pub verified: bool,
    pub total_replacements: usize,
    /// Unified diff of the would-be change, for dry runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl PatchReport {
    pub fn new(target: &Path, dry_run: bool, outcome: PatchOutcome, diff: Option<String>) -> Self {
        let total_replacements = outcome.total_replacements();
        PatchReport {
            status: "ok".to_string(),
            target: target.to_path_buf(),
            dry_run,
            helper: outcome.helper,
            rules: outcome.rules,
            verified: outcome.verified,
            total_replacements,
            diff,
        }
    }

    /// Lines printed after `Targeting: ...`, in run order.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.helper == HelperStatus::Injected {
            out.push_str("   -> Injected '_strip_val' helper function.\n");
        }

        for rule in self.rules.iter().filter(|r| r.count > 0) {
            out.push_str(&format!(
                "   -> Replaced {} instance(s) of '{}'\n",
                rule.count, rule.pattern
            ));
        }

        if self.verified {
            out.push_str("Verified: Velocity initialization is patched.\n");
        } else {
            out.push_str(
                "WARNING: Velocity initialization might NOT be patched. Check file manually.\n",
            );
        }

        if self.dry_run {
            out.push_str(&format!(
                "Dry run: {} change(s) not written.\n",
                self.total_replacements
            ));
            if let Some(diff) = &self.diff {
                out.push_str(diff);
            }
        } else {
            out.push_str(&format!(
                "Success: MD-tools patched ({} changes applied). Continue installation following README file.\n",
                self.total_replacements
            ));
        }

        out
    }
}

/// The line announcing which file is being patched.
pub fn targeting_line(target: &Path) -> String {
    format!("Targeting: {}", target.display())
}

// ============================================================================
// Error Output
// ============================================================================

/// JSON body for a failed run.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: ErrorInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Process exit code.
    pub code: u8,
    pub kind: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error(err: &PatchError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            error: ErrorInfo {
                code: err.exit_status().code(),
                kind: err.code_name().to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
