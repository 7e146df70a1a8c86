//! Compile-time contract for the public API.
//!
//! If this file fails to compile, the public API has regressed.

#![allow(unused_imports)]

use mdtools_patch::error::{ExitStatus, PatchError, PatchResult};
use mdtools_patch::locate::{default_target, normalize, resolve_from, DEFAULT_RELATIVE_TARGET};
use mdtools_patch::output::{emit_response, targeting_line, ErrorInfo, ErrorResponse, PatchReport};
use mdtools_patch::patcher::{
    unified_diff, HelperStatus, PatchOptions, PatchOutcome, Patcher, RuleCount,
};
use mdtools_patch::rules::{
    CompiledRule, CompiledRules, HelperInjection, ReplacementRule, REPLACEMENT_RULES,
    STRIP_VAL_HELPER, VELOCITY_CHECK,
};

#[test]
fn api_surface_compiles() {
    let patcher: PatchResult<Patcher> = Patcher::builtin();
    assert!(patcher.is_ok());
    assert_eq!(REPLACEMENT_RULES.len(), 3);
    assert_eq!(ExitStatus::TargetMissing.code(), 1);
}
