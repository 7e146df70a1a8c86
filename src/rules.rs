//! The fixed rule set for MD-tools' `sim.py`.
//!
//! On PowerPC, the SWIG bindings of OpenMM reject `Quantity` arguments built
//! as `value * u.unit`. The rules below rewrite those call arguments into plain
//! floats, after injecting a `_strip_val` helper that unwraps values which
//! already carry a unit.
//!
//! Patterns are hard-coded to the known content of that one file. They are
//! line-level regexes, not a parser.

use regex::Regex;

use crate::error::{PatchError, PatchResult};

/// A regex pattern and the literal text that replaces each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// Ordered rule list. Each rule sees the output of the rules before it.
pub const REPLACEMENT_RULES: &[ReplacementRule] = &[
    // temperature_kelvin * u.kelvin
    ReplacementRule {
        pattern: r"temperature_kelvin\s*\*\s*u\.kelvin",
        replacement: "float(_strip_val(temperature_kelvin))",
    },
    // heat_bath_friction_coef / u.picosecond
    ReplacementRule {
        pattern: r"heat_bath_friction_coef\s*/\s*u\.picosecond",
        replacement: "float(_strip_val(heat_bath_friction_coef))",
    },
    // dt_ps * u.picosecond
    ReplacementRule {
        pattern: r"dt_ps\s*\*\s*u\.picosecond",
        replacement: "float(_strip_val(dt_ps))",
    },
];

/// Insertion of a helper definition after an anchor, gated by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperInjection {
    /// If this substring is already present, nothing is injected.
    pub marker: &'static str,
    /// Regex for the line the snippet goes after. Only the first match is used.
    pub anchor: &'static str,
    /// Text inserted immediately after the anchor match.
    pub snippet: &'static str,
}

pub const STRIP_VAL_HELPER: HelperInjection = HelperInjection {
    marker: "_strip_val =",
    anchor: r"import openmm\.unit as u",
    snippet: "\n\n# BEDE PATCH: Helper to strip units\n_strip_val = lambda x: x._value if hasattr(x, '_value') else x\n",
};

/// Present in the file once the velocity initialization call is patched.
pub const VELOCITY_CHECK: &str = "float(_strip_val(temperature_kelvin)), random.randint";

// ============================================================================
// Compiled Rules
// ============================================================================

/// A rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: ReplacementRule,
    pub regex: Regex,
}

/// The complete rule set, ready to apply.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    pub helper: HelperInjection,
    pub anchor: Regex,
    pub rules: Vec<CompiledRule>,
    pub verify: &'static str,
}

impl CompiledRules {
    /// Compile an arbitrary helper and rule list.
    pub fn new(
        helper: HelperInjection,
        rules: &[ReplacementRule],
        verify: &'static str,
    ) -> PatchResult<Self> {
        let anchor = compile(helper.anchor)?;
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    rule: *rule,
                    regex: compile(rule.pattern)?,
                })
            })
            .collect::<PatchResult<Vec<_>>>()?;

        Ok(CompiledRules {
            helper,
            anchor,
            rules,
            verify,
        })
    }

    /// The built-in rule set for `sim.py`.
    pub fn builtin() -> PatchResult<Self> {
        Self::new(STRIP_VAL_HELPER, REPLACEMENT_RULES, VELOCITY_CHECK)
    }
}

fn compile(pattern: &str) -> PatchResult<Regex> {
    Regex::new(pattern).map_err(|e| PatchError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
