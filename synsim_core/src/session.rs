//! Binocular session model.
//!
//! Turns the raw persisted configuration into two sets of eye
//! parameters and per-distance results, applying the monovision
//! derivation rule. Every derived value is recomputed from the current
//! configuration snapshot on each query; nothing is cached.

use crate::engine;
use crate::types::{DistanceResult, DominantEye, EyeParameters};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Depth-of-field half-width (diopters) shown downstream when
/// monovision is on.
pub const DOF_RANGE_MONOVISION: f64 = 1.25;
/// Depth-of-field half-width (diopters) in plain binocular mode.
pub const DOF_RANGE_BINOCULAR: f64 = 0.50;

// ============================================================================
// Persisted configuration
// ============================================================================

/// The persisted session record.
///
/// This is the only mutable state in the system; everything the model
/// exposes is a pure derivation from one snapshot of this struct.
/// Fields missing from stored data fall back to the defaults below.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub right_r0: f64,
    pub right_lens_manual: f64,
    pub left_r0: f64,
    pub left_lens_manual: f64,
    /// Shared accommodative reserve, not per eye
    pub accommodation: f64,
    pub is_monovision: bool,
    pub dominant_eye: DominantEye,
    /// Target residual for the near eye under monovision (−4 … 0 D)
    pub near_target: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            right_r0: 0.0,
            right_lens_manual: 0.0,
            left_r0: 0.0,
            left_lens_manual: 0.0,
            accommodation: 12.0,
            is_monovision: false,
            dominant_eye: DominantEye::Right,
            near_target: -1.25,
        }
    }
}

/// One field of the session configuration, for persistence keying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigField {
    RightR0,
    RightLensManual,
    LeftR0,
    LeftLensManual,
    Accommodation,
    IsMonovision,
    DominantEye,
    NearTarget,
}

impl ConfigField {
    /// Stable storage key for this field.
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::RightR0 => "right_r0",
            ConfigField::RightLensManual => "right_lens_manual",
            ConfigField::LeftR0 => "left_r0",
            ConfigField::LeftLensManual => "left_lens_manual",
            ConfigField::Accommodation => "accommodation",
            ConfigField::IsMonovision => "is_monovision",
            ConfigField::DominantEye => "dominant_eye",
            ConfigField::NearTarget => "near_target",
        }
    }
}

/// Per-field persistence contract.
///
/// Invoked after every configuration mutation so the collaborator can
/// durably store the new value keyed by field name. The storage medium
/// and format are the implementor's concern.
pub trait ConfigStore {
    fn persist(&mut self, field: ConfigField, config: &SessionConfig) -> Result<()>;
}

// ============================================================================
// Session
// ============================================================================

/// A binocular session: the configuration snapshot plus an optional
/// store notified on every field write.
pub struct Session {
    config: SessionConfig,
    store: Option<Box<dyn ConfigStore>>,
}

impl Session {
    /// Create a session without persistence.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Create a session whose mutations persist through `store`.
    pub fn with_store(config: SessionConfig, store: Box<dyn ConfigStore>) -> Self {
        Self {
            config,
            store: Some(store),
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn notify(&mut self, field: ConfigField) -> Result<()> {
        if let Some(store) = self.store.as_mut() {
            store.persist(field, &self.config)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Field accessors: each write persists immediately, no batching
    // ------------------------------------------------------------------

    pub fn set_right_r0(&mut self, value: f64) -> Result<()> {
        self.config.right_r0 = value;
        self.notify(ConfigField::RightR0)
    }

    pub fn set_right_lens_manual(&mut self, value: f64) -> Result<()> {
        self.config.right_lens_manual = value;
        self.notify(ConfigField::RightLensManual)
    }

    pub fn set_left_r0(&mut self, value: f64) -> Result<()> {
        self.config.left_r0 = value;
        self.notify(ConfigField::LeftR0)
    }

    pub fn set_left_lens_manual(&mut self, value: f64) -> Result<()> {
        self.config.left_lens_manual = value;
        self.notify(ConfigField::LeftLensManual)
    }

    pub fn set_accommodation(&mut self, value: f64) -> Result<()> {
        self.config.accommodation = value;
        self.notify(ConfigField::Accommodation)
    }

    pub fn set_monovision(&mut self, enabled: bool) -> Result<()> {
        self.config.is_monovision = enabled;
        self.notify(ConfigField::IsMonovision)
    }

    pub fn set_dominant_eye(&mut self, eye: DominantEye) -> Result<()> {
        self.config.dominant_eye = eye;
        self.notify(ConfigField::DominantEye)
    }

    pub fn set_near_target(&mut self, value: f64) -> Result<()> {
        self.config.near_target = value;
        self.notify(ConfigField::NearTarget)
    }

    // ------------------------------------------------------------------
    // Derivations
    // ------------------------------------------------------------------

    /// True when the right eye is the monovision near eye.
    pub fn is_right_near_eye(&self) -> bool {
        self.config.is_monovision && self.config.dominant_eye == DominantEye::Left
    }

    /// True when the left eye is the monovision near eye.
    pub fn is_left_near_eye(&self) -> bool {
        self.config.is_monovision && self.config.dominant_eye == DominantEye::Right
    }

    /// Effective parameters for the right eye.
    ///
    /// The near eye's lens correction is auto-derived so its residual
    /// equals the near target; the stored manual value is untouched and
    /// comes back when monovision is switched off.
    pub fn right_eye(&self) -> EyeParameters {
        let lens_correction = if self.is_right_near_eye() {
            self.config.right_r0 - self.config.near_target
        } else {
            self.config.right_lens_manual
        };
        EyeParameters {
            r0: self.config.right_r0,
            lens_correction,
            accommodation: self.config.accommodation,
        }
    }

    /// Effective parameters for the left eye.
    pub fn left_eye(&self) -> EyeParameters {
        let lens_correction = if self.is_left_near_eye() {
            self.config.left_r0 - self.config.near_target
        } else {
            self.config.left_lens_manual
        };
        EyeParameters {
            r0: self.config.left_r0,
            lens_correction,
            accommodation: self.config.accommodation,
        }
    }

    /// Per-distance results for the right eye, in catalog order.
    pub fn right_results(&self) -> Vec<DistanceResult> {
        engine::calculate_results(&self.right_eye())
    }

    /// Per-distance results for the left eye, in catalog order.
    pub fn left_results(&self) -> Vec<DistanceResult> {
        engine::calculate_results(&self.left_eye())
    }

    /// Depth-of-field half-width for downstream display. A fixed policy
    /// constant per mode, not derived from other inputs.
    pub fn dof_range(&self) -> f64 {
        if self.config.is_monovision {
            DOF_RANGE_MONOVISION
        } else {
            DOF_RANGE_BINOCULAR
        }
    }

    /// Auto-derived lens value for the non-dominant eye, regardless of
    /// whether monovision is currently on. Display-only in binocular
    /// mode.
    pub fn near_eye_auto_lens(&self) -> f64 {
        match self.config.dominant_eye {
            DominantEye::Right => self.config.left_r0 - self.config.near_target,
            DominantEye::Left => self.config.right_r0 - self.config.near_target,
        }
    }
}
