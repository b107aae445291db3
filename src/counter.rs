//! Repetition counting state machine
//!
//! Each configured angle keeps a two-frame history and a below/above
//! classification against its threshold. A repetition is counted when the
//! movement has been seen at rest (every angle below threshold, which arms
//! the counter) and then extended (every angle above threshold with every
//! position condition satisfied).
//!
//! Occluded or near-edge joints produce unknown angles. Unknown angles never
//! flip a classification.

use tracing::{debug, trace};

use crate::angle::AngleEvaluator;
use crate::error::ConfigError;
use crate::landmark::{self, JointId, Landmark};
use crate::movement::{GateMode, MovementConfig};

/// Per-angle history and threshold classification.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngleState {
    pub previous: Option<f32>,
    pub current: Option<f32>,
    pub below_threshold: bool,
    pub above_threshold: bool,
}

impl AngleState {
    /// Reclassify only when both history slots hold a positive angle.
    fn classify(&mut self, threshold: f32) {
        if let (Some(prev), Some(curr)) = (self.previous, self.current) {
            if prev > 0.0 && curr > 0.0 {
                self.below_threshold = curr < threshold;
                self.above_threshold = !self.below_threshold;
            }
        }
    }
}

/// Last computed angle of one configured triple, for overlay annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleReadout {
    pub joints: [JointId; 3],
    pub vertex: JointId,
    pub degrees: Option<f32>,
}

/// Counts repetitions of a single movement.
#[derive(Debug, Clone)]
pub struct RepCounter {
    config: MovementConfig,
    evaluator: AngleEvaluator,
    angles: Vec<AngleState>,
    positions: Vec<bool>,
    armed: bool,
    gate_open: bool,
    count: u32,
    tracking_enabled: bool,
}

impl RepCounter {
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        Self::with_evaluator(config, AngleEvaluator::default())
    }

    pub fn with_evaluator(
        config: MovementConfig,
        evaluator: AngleEvaluator,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        evaluator.config().validate()?;

        Ok(Self {
            angles: vec![AngleState::default(); config.angles.len()],
            positions: vec![false; config.positions.len()],
            armed: false,
            gate_open: false,
            count: 0,
            tracking_enabled: config.enabled,
            evaluator,
            config,
        })
    }

    /// Feed one frame of landmarks and return the updated count.
    ///
    /// An empty slice means no person was detected; every angle becomes
    /// unknown and position conditions keep their last value.
    pub fn update(&mut self, landmarks: &[Landmark]) -> u32 {
        for state in &mut self.angles {
            state.previous = state.current;
        }

        if landmarks.is_empty() {
            for state in &mut self.angles {
                state.current = None;
            }
        } else {
            self.measure_angles(landmarks);
            self.check_positions(landmarks);
        }

        for (state, spec) in self.angles.iter_mut().zip(&self.config.angles) {
            state.classify(spec.threshold);
        }

        self.check_gate();

        if !self.armed && self.gate_allows_arming() && self.angles.iter().all(|s| s.below_threshold) {
            self.armed = true;
            debug!(movement = %self.config.name, "armed");
        }

        if self.armed
            && self.angles.iter().all(|s| s.above_threshold)
            && self.positions.iter().all(|&held| held)
        {
            self.count += 1;
            self.armed = false;
            if matches!(self.config.init_gate, Some(gate) if gate.mode == GateMode::EveryRep) {
                self.gate_open = false;
            }
            debug!(movement = %self.config.name, count = self.count, "repetition counted");
        }

        self.count
    }

    fn measure_angles(&mut self, landmarks: &[Landmark]) {
        let require_visible = self.config.requires_visibility();

        for (state, spec) in self.angles.iter_mut().zip(&self.config.angles) {
            let [p1, p2, p3] = spec.joints;
            state.current = match (
                landmark::find(landmarks, p1),
                landmark::find(landmarks, p2),
                landmark::find(landmarks, p3),
            ) {
                (Some(a), Some(v), Some(b)) => self.evaluator.angle(a, v, b, require_visible),
                _ => {
                    debug!(movement = %self.config.name, joints = ?spec.joints, "joint missing from frame");
                    None
                }
            };
            trace!(movement = %self.config.name, vertex = p2, angle = ?state.current);
        }
    }

    fn check_positions(&mut self, landmarks: &[Landmark]) {
        for (held, spec) in self.positions.iter_mut().zip(&self.config.positions) {
            if let (Some(a), Some(b)) = (landmark::find(landmarks, spec.a), landmark::find(landmarks, spec.b)) {
                *held = spec.holds(a, b);
            }
        }
    }

    fn check_gate(&mut self) {
        let Some(gate) = self.config.init_gate else {
            return;
        };
        if self.gate_open {
            return;
        }
        if let Some(angle) = self.angles.first().and_then(|s| s.current) {
            if angle > 0.0 && angle < gate.threshold {
                self.gate_open = true;
                debug!(movement = %self.config.name, angle, "starting pose reached");
            }
        }
    }

    fn gate_allows_arming(&self) -> bool {
        self.config.init_gate.is_none() || self.gate_open
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Zero the count and disarm. Angle history is kept.
    pub fn reset_count(&mut self) {
        self.count = 0;
        self.armed = false;
        self.gate_open = false;
    }

    pub fn tracking_enabled(&self) -> bool {
        self.tracking_enabled
    }

    /// Callers skip `update` for counters with tracking disabled.
    pub fn set_tracking_enabled(&mut self, enabled: bool) {
        self.tracking_enabled = enabled;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_gate_open(&self) -> bool {
        self.gate_open
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn angle_states(&self) -> &[AngleState] {
        &self.angles
    }

    pub fn position_conditions(&self) -> &[bool] {
        &self.positions
    }

    pub fn readouts(&self) -> impl Iterator<Item = AngleReadout> + '_ {
        self.config
            .angles
            .iter()
            .zip(&self.angles)
            .map(|(spec, state)| AngleReadout {
                joints: spec.joints,
                vertex: spec.vertex(),
                degrees: state.current,
            })
    }
}
