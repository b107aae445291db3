//! Joint angle evaluation
//!
//! Computes the angle at a vertex joint from two rays (vertex→p1 and
//! vertex→p3). Points near the frame edge and, optionally, points the pose
//! model is unsure about produce no angle at all.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::landmark::Landmark;

/// Frame-edge and confidence limits for angle evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Coordinates must be strictly greater than this
    pub edge_min: f32,
    /// Coordinates must be strictly less than this
    pub edge_max: f32,
    /// Visibility must be strictly greater than this
    pub visibility_threshold: f32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            edge_min: 0.02,
            edge_max: 0.98,
            visibility_threshold: 0.5,
        }
    }
}

impl EvaluatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !(in_unit(self.edge_min) && in_unit(self.edge_max) && self.edge_min < self.edge_max) {
            return Err(ConfigError::InvalidBounds {
                min: self.edge_min,
                max: self.edge_max,
            });
        }
        if !in_unit(self.visibility_threshold) {
            return Err(ConfigError::InvalidVisibility(self.visibility_threshold));
        }
        Ok(())
    }
}

/// Stateless angle evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngleEvaluator {
    config: EvaluatorConfig,
}

impl AngleEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    fn in_frame(&self, lm: &Landmark) -> bool {
        let inside = |v: f32| v > self.config.edge_min && v < self.config.edge_max;
        inside(lm.x) && inside(lm.y)
    }

    /// Angle at `p2` between rays p2→p1 and p2→p3, in degrees within [0, 180].
    ///
    /// Returns `None` when any point sits outside the frame bounds, or when
    /// `require_visible` is set and any point fails the visibility threshold.
    /// `p2` must be the shared vertex; `p1` and `p3` are interchangeable.
    pub fn angle(
        &self,
        p1: &Landmark,
        p2: &Landmark,
        p3: &Landmark,
        require_visible: bool,
    ) -> Option<f32> {
        let points = [p1, p2, p3];

        if require_visible
            && !points
                .iter()
                .all(|lm| lm.is_visible(self.config.visibility_threshold))
        {
            return None;
        }

        if !points.iter().all(|lm| self.in_frame(lm)) {
            return None;
        }

        let radians = (p3.y - p2.y).atan2(p3.x - p2.x) - (p1.y - p2.y).atan2(p1.x - p2.x);
        let degrees = radians.abs().to_degrees();

        Some(if degrees > 180.0 { 360.0 - degrees } else { degrees })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(0, x, y)
    }

    #[test]
    fn test_straight_angle() {
        let eval = AngleEvaluator::default();
        let angle = eval.angle(&lm(0.2, 0.5), &lm(0.5, 0.5), &lm(0.8, 0.5), true).unwrap();
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_right_angle() {
        let eval = AngleEvaluator::default();
        let angle = eval.angle(&lm(0.8, 0.5), &lm(0.5, 0.5), &lm(0.5, 0.2), true).unwrap();
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_reflex_folds_below_180() {
        // atan2 difference of ~270° must fold to 90°
        let eval = AngleEvaluator::default();
        let angle = eval.angle(&lm(0.5, 0.2), &lm(0.5, 0.5), &lm(0.2, 0.5), true).unwrap();
        assert!((angle - 90.0).abs() < 1e-3);

        let sharp = eval.angle(&lm(0.8, 0.45), &lm(0.5, 0.5), &lm(0.8, 0.55), true).unwrap();
        assert!(sharp > 0.0 && sharp < 30.0);
    }

    #[test]
    fn test_symmetry_under_endpoint_swap() {
        let eval = AngleEvaluator::default();
        let coords = [0.1, 0.27, 0.5, 0.73, 0.9];
        for &x1 in &coords {
            for &y1 in &coords {
                for &x3 in &coords {
                    for &y3 in &coords {
                        let (a, v, b) = (lm(x1, y1), lm(0.45, 0.55), lm(x3, y3));
                        let forward = eval.angle(&a, &v, &b, true).unwrap();
                        let backward = eval.angle(&b, &v, &a, true).unwrap();
                        assert!((forward - backward).abs() < 1e-4);
                        assert!((0.0..=180.0).contains(&forward));
                    }
                }
            }
        }
    }

    #[test]
    fn test_edge_margin_is_exclusive() {
        let eval = AngleEvaluator::default();
        let centre = lm(0.5, 0.5);
        assert_eq!(eval.angle(&lm(0.02, 0.5), &centre, &lm(0.7, 0.7), true), None);
        assert_eq!(eval.angle(&lm(0.3, 0.98), &centre, &lm(0.7, 0.7), true), None);
        assert_eq!(eval.angle(&lm(0.3, 0.3), &lm(0.5, 0.01), &lm(0.7, 0.7), true), None);
        assert!(eval.angle(&lm(0.3, 0.3), &centre, &lm(0.7, 0.7), true).is_some());
    }

    #[test]
    fn test_nan_coordinates_rejected() {
        let eval = AngleEvaluator::default();
        let centre = lm(0.5, 0.5);
        assert_eq!(eval.angle(&lm(f32::NAN, 0.3), &centre, &lm(0.7, 0.7), false), None);
    }

    #[test]
    fn test_visibility_gate() {
        let eval = AngleEvaluator::default();
        let a = lm(0.3, 0.3).with_visibility(0.9);
        let v = lm(0.5, 0.5).with_visibility(0.4);
        let b = lm(0.7, 0.3).with_visibility(0.9);

        assert_eq!(eval.angle(&a, &v, &b, true), None);
        assert!(eval.angle(&a, &v, &b, false).is_some());
    }

    #[test]
    fn test_custom_bounds() {
        let eval = AngleEvaluator::new(EvaluatorConfig {
            edge_min: 0.1,
            edge_max: 0.9,
            visibility_threshold: 0.5,
        });
        assert_eq!(eval.angle(&lm(0.05, 0.5), &lm(0.5, 0.5), &lm(0.7, 0.7), false), None);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(EvaluatorConfig::default().validate().is_ok());

        let inverted = EvaluatorConfig {
            edge_min: 0.9,
            edge_max: 0.1,
            ..EvaluatorConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(ConfigError::InvalidBounds { .. })));

        let vis = EvaluatorConfig {
            visibility_threshold: 1.5,
            ..EvaluatorConfig::default()
        };
        assert_eq!(vis.validate(), Err(ConfigError::InvalidVisibility(1.5)));
    }
}
