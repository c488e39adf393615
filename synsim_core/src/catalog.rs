//! Fixed catalog of viewing distances.
//!
//! The catalog is the ordered list of distances every eye is evaluated
//! at: far (optical infinity), intermediate (70 cm), near (40 cm). It
//! never changes during the lifetime of the process.

use once_cell::sync::Lazy;

/// One catalog entry: a named viewing distance.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewingDistance {
    pub name: String,
    /// Distance in meters; `f64::INFINITY` marks optical infinity.
    pub meters: f64,
}

impl ViewingDistance {
    /// Dioptric focusing demand at this distance.
    pub fn demand(&self) -> f64 {
        demand(self.meters)
    }

    /// True for the optical-infinity entry.
    pub fn is_far(&self) -> bool {
        self.meters.is_infinite()
    }
}

/// Cached standard distances - built once and reused across all queries
static STANDARD_DISTANCES: Lazy<Vec<ViewingDistance>> = Lazy::new(|| {
    vec![
        ViewingDistance {
            name: "Far (∞)".into(),
            meters: f64::INFINITY,
        },
        ViewingDistance {
            name: "Intermediate (70 cm)".into(),
            meters: 0.70,
        },
        ViewingDistance {
            name: "Near (40 cm)".into(),
            meters: 0.40,
        },
    ]
});

/// The fixed ordered list of viewing distances: far, intermediate, near.
pub fn standard_distances() -> &'static [ViewingDistance] {
    &STANDARD_DISTANCES
}

/// Focusing demand in diopters at a distance of `meters`.
///
/// Zero for optical infinity, `1 / meters` otherwise. Callers must not
/// pass a non-positive finite distance; the standard catalog never
/// produces one.
pub fn demand(meters: f64) -> f64 {
    debug_assert!(
        meters.is_infinite() || meters > 0.0,
        "distance must be strictly positive or infinite, got {meters}"
    );
    if meters.is_infinite() {
        0.0
    } else {
        1.0 / meters
    }
}
