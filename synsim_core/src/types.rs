//! Core domain types for the binocular defocus simulator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Per-eye input parameters
//! - Per-distance evaluation results
//! - The dominant-eye selector for monovision

use crate::catalog::ViewingDistance;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Eye Parameters
// ============================================================================

/// Per-eye input snapshot used by the optics engine.
///
/// All values are in diopters. `accommodation` is shared across both
/// eyes in a session; it is carried here so the engine can evaluate one
/// eye in isolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeParameters {
    /// Native unaided refractive error (typically −6 … +6 D at entry)
    pub r0: f64,
    /// Applied surgical/optical correction (−8 … +8 D)
    pub lens_correction: f64,
    /// Remaining focusing reserve (0 … 12 D)
    pub accommodation: f64,
}

impl Default for EyeParameters {
    fn default() -> Self {
        Self {
            r0: 0.0,
            lens_correction: 0.0,
            accommodation: 12.0,
        }
    }
}

impl EyeParameters {
    /// Net refractive error remaining after correction.
    pub fn residual(&self) -> f64 {
        self.r0 - self.lens_correction
    }
}

// ============================================================================
// Per-distance result
// ============================================================================

/// Result of evaluating one eye at one catalog distance.
///
/// Produced fresh on every query; never cached or mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceResult {
    pub distance: ViewingDistance,
    /// The eye's residual (distance-invariant within one evaluation)
    pub residual: f64,
    /// Dioptric demand at this distance
    pub demand: f64,
    /// Blur left after available accommodation is spent
    pub rest_defocus: f64,
}

// ============================================================================
// Dominant eye
// ============================================================================

/// Which eye is corrected for distance vision when monovision is active.
/// The other eye becomes the "near eye".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DominantEye {
    Right,
    Left,
}

impl DominantEye {
    /// The opposite eye (the near eye under monovision).
    pub fn other(self) -> Self {
        match self {
            DominantEye::Right => DominantEye::Left,
            DominantEye::Left => DominantEye::Right,
        }
    }
}

impl fmt::Display for DominantEye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DominantEye::Right => write!(f, "right"),
            DominantEye::Left => write!(f, "left"),
        }
    }
}

impl FromStr for DominantEye {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "right" | "r" => Ok(DominantEye::Right),
            "left" | "l" => Ok(DominantEye::Left),
            _ => Err(Error::Parse(format!("unknown eye: {s} (expected right or left)"))),
        }
    }
}

// ============================================================================
// Display helper
// ============================================================================

/// Format a dioptric value for display: "+1.25 D", "-0.50 D", "0.00 D".
pub fn diopter_string(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2} D")
    } else {
        format!("{value:.2} D")
    }
}
