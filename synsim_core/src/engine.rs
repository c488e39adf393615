//! Optics engine: rest-defocus at each viewing distance.
//!
//! The model is a linear dioptric approximation. Total blur before
//! compensation is `B = residual + 1/d`; accommodation neutralizes up
//! to `min(B, A)` of it, but only when `B` is positive, because
//! accommodation can only add positive optical power.

use crate::catalog;
use crate::types::{DistanceResult, EyeParameters};

/// Rest-defocus: the blur an eye experiences at a given distance after
/// spending whatever accommodative reserve is available and useful.
///
/// Total and side-effect-free for any real inputs; range enforcement is
/// the caller's concern.
pub fn rest_defocus(residual: f64, distance_m: f64, accommodation: f64) -> f64 {
    let blur = residual + catalog::demand(distance_m);
    let coverage = if blur > 0.0 {
        blur.min(accommodation)
    } else {
        0.0
    };
    blur - coverage
}

/// Evaluate one eye at every standard distance, in catalog order.
///
/// Always returns exactly one result per catalog entry (three), never
/// reordered.
pub fn calculate_results(eye: &EyeParameters) -> Vec<DistanceResult> {
    let residual = eye.residual();
    catalog::standard_distances()
        .iter()
        .map(|dist| DistanceResult {
            distance: dist.clone(),
            residual,
            demand: dist.demand(),
            rest_defocus: rest_defocus(residual, dist.meters, eye.accommodation),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_rest_defocus_near_with_partial_accommodation() {
        // residual −0.5 at 40 cm: B = −0.5 + 2.5 = 2.0
        // accommodation 1.0 covers 1.0 → rest 1.0
        let rest = rest_defocus(-0.5, 0.40, 1.0);
        assert!((rest - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rest_defocus_near_fully_covered() {
        // B = 2.0, accommodation 3.0 covers all of it
        let rest = rest_defocus(-0.5, 0.40, 3.0);
        assert!(rest.abs() < EPS);
    }

    #[test]
    fn test_rest_defocus_far_without_accommodation() {
        // demand 0 at infinity, residual +1.0, A = 0 → rest 1.0
        let rest = rest_defocus(1.0, f64::INFINITY, 0.0);
        assert!((rest - 1.0).abs() < EPS);
    }

    #[test]
    fn test_negative_blur_is_not_compensated() {
        // Myopic defocus at infinity: accommodation cannot help
        let rest = rest_defocus(-1.5, f64::INFINITY, 12.0);
        assert!((rest - (-1.5)).abs() < EPS);
    }

    #[test]
    fn test_zero_accommodation_leaves_full_blur() {
        let rest = rest_defocus(0.5, 0.70, 0.0);
        assert!((rest - (0.5 + 1.0 / 0.70)).abs() < EPS);
    }

    #[test]
    fn test_positive_blur_clamps_at_zero() {
        // max(B − A, 0) when B > 0
        let rest = rest_defocus(0.5, 0.40, 12.0);
        assert_eq!(rest, 0.0);
    }

    #[test]
    fn test_monotonic_in_residual() {
        let mut previous = f64::NEG_INFINITY;
        let mut r = -8.0;
        while r <= 8.0 {
            let rest = rest_defocus(r, 0.40, 2.0);
            assert!(rest >= previous, "rest_defocus decreased at residual {r}");
            previous = rest;
            r += 0.25;
        }
    }

    #[test]
    fn test_calculate_results_covers_catalog_in_order() {
        let eye = EyeParameters {
            r0: -2.0,
            lens_correction: -1.5,
            accommodation: 1.0,
        };
        let results = calculate_results(&eye);

        assert_eq!(results.len(), 3);
        assert!(results[0].distance.is_far());
        assert_eq!(results[1].distance.meters, 0.70);
        assert_eq!(results[2].distance.meters, 0.40);

        for result in &results {
            assert!((result.residual - (-0.5)).abs() < EPS);
            assert!((result.demand - result.distance.demand()).abs() < EPS);
        }

        // Worked example: near distance, B = 2.0, coverage 1.0
        assert!((results[2].rest_defocus - 1.0).abs() < EPS);
    }
}
