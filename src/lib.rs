//! mdtools-patch: rewrites unit-carrying OpenMM arguments in MD-tools.
//!
//! SWIG-wrapped OpenMM on PowerPC raises `TypeError` when handed `Quantity`
//! values built as `value * u.unit`. This crate patches
//! `mdtools/openmm/sim.py` to pass plain floats instead, injecting a small
//! `_strip_val` helper that unwraps values which already carry a unit.

pub mod error;
pub mod locate;
pub mod output;
pub mod patcher;
pub mod rules;

pub use error::{ExitStatus, PatchError, PatchResult};
pub use output::PatchReport;
pub use patcher::{HelperStatus, PatchOptions, PatchOutcome, Patcher};
