//! The patcher: helper injection, rule application, verification, write-back.
//!
//! A run is one linear pass:
//!
//! 1. Check the target exists (fatal if not)
//! 2. Read it into a single `String`
//! 3. Inject the helper after the first anchor match, unless the marker is
//!    already present
//! 4. Apply each rule, in order, to the cumulative content
//! 5. Check for the verification string (advisory)
//! 6. Write the content back (skipped for dry runs)
//!
//! Steps 3 through 5 live in [`Patcher::apply`], which never touches the
//! filesystem.

use std::fs;
use std::path::Path;

use regex::NoExpand;
use serde::Serialize;
use similar::TextDiff;
use tracing::{debug, info, warn};

use crate::error::{PatchError, PatchResult};
use crate::output::PatchReport;
use crate::rules::CompiledRules;

// ============================================================================
// Outcome Types
// ============================================================================

/// What happened to the helper definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HelperStatus {
    /// Inserted after the anchor.
    Injected,
    /// Marker already present; nothing inserted.
    AlreadyPresent,
    /// Marker absent but the anchor was not found; nothing inserted.
    AnchorMissing,
}

/// Replacement count for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCount {
    pub pattern: String,
    pub replacement: String,
    pub count: usize,
}

/// Result of transforming content in memory.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub content: String,
    pub helper: HelperStatus,
    pub rules: Vec<RuleCount>,
    pub verified: bool,
}

impl PatchOutcome {
    /// Total replacements across all rules.
    pub fn total_replacements(&self) -> usize {
        self.rules.iter().map(|r| r.count).sum()
    }
}

/// Options for [`Patcher::patch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Compute the result and a diff, but leave the file untouched.
    pub dry_run: bool,
}

// ============================================================================
// Patcher
// ============================================================================

/// Applies a compiled rule set to a file.
#[derive(Debug, Clone)]
pub struct Patcher {
    rules: CompiledRules,
}

impl Patcher {
    pub fn new(rules: CompiledRules) -> Self {
        Patcher { rules }
    }

    /// Patcher with the built-in `sim.py` rules.
    pub fn builtin() -> PatchResult<Self> {
        Ok(Self::new(CompiledRules::builtin()?))
    }

    /// Transform `content` without touching the filesystem.
    pub fn apply(&self, content: &str) -> PatchOutcome {
        let mut content = content.to_string();
        let helper = self.inject_helper(&mut content);

        let mut rules = Vec::with_capacity(self.rules.rules.len());
        for compiled in &self.rules.rules {
            let count = compiled.regex.find_iter(&content).count();
            if count > 0 {
                content = compiled
                    .regex
                    .replace_all(&content, NoExpand(compiled.rule.replacement))
                    .into_owned();
            }
            debug!(pattern = compiled.rule.pattern, count, "applied rule");
            rules.push(RuleCount {
                pattern: compiled.rule.pattern.to_string(),
                replacement: compiled.rule.replacement.to_string(),
                count,
            });
        }

        let verified = content.contains(self.rules.verify);
        if !verified {
            debug!(expected = self.rules.verify, "verification string not found");
        }

        PatchOutcome {
            content,
            helper,
            rules,
            verified,
        }
    }

    fn inject_helper(&self, content: &mut String) -> HelperStatus {
        let helper = &self.rules.helper;
        if content.contains(helper.marker) {
            debug!(marker = helper.marker, "helper already present");
            return HelperStatus::AlreadyPresent;
        }

        match self.rules.anchor.find(content).map(|m| m.end()) {
            Some(end) => {
                content.insert_str(end, helper.snippet);
                info!(offset = end, "injected helper");
                HelperStatus::Injected
            }
            None => {
                warn!(anchor = helper.anchor, "anchor not found, helper not injected");
                HelperStatus::AnchorMissing
            }
        }
    }

    /// Patch the file at `target` in place.
    ///
    /// A missing target is the only fatal condition. The file is rewritten
    /// even when no rule matched.
    pub fn patch(&self, target: &Path, options: PatchOptions) -> PatchResult<PatchReport> {
        if !target.exists() {
            return Err(PatchError::TargetFileMissing {
                path: target.to_path_buf(),
            });
        }

        let original = fs::read_to_string(target).map_err(|source| PatchError::Read {
            path: target.to_path_buf(),
            source,
        })?;

        let outcome = self.apply(&original);

        let diff = if options.dry_run {
            Some(unified_diff(target, &original, &outcome.content))
        } else {
            fs::write(target, &outcome.content).map_err(|source| PatchError::Write {
                path: target.to_path_buf(),
                source,
            })?;
            info!(path = %target.display(), bytes = outcome.content.len(), "wrote patched file");
            None
        };

        Ok(PatchReport::new(target, options.dry_run, outcome, diff))
    }
}

/// Unified diff between the original and patched content of `target`.
pub fn unified_diff(target: &Path, original: &str, patched: &str) -> String {
    let name = target.display().to_string();
    let diff = TextDiff::from_lines(original, patched);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================
