//! Movement definitions: which joint angles and relative positions make up
//! one repetition.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::landmark::{JointId, Landmark};

/// Three joints forming two rays that meet at the middle one, plus the
/// trigger threshold in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSpec {
    pub joints: [JointId; 3],
    pub threshold: f32,
}

impl AngleSpec {
    pub fn new(p1: JointId, vertex: JointId, p3: JointId, threshold: f32) -> Self {
        Self {
            joints: [p1, vertex, p3],
            threshold,
        }
    }

    pub fn vertex(&self) -> JointId {
        self.joints[1]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    #[default]
    Y,
}

impl Axis {
    pub fn of(self, lm: &Landmark) -> f32 {
        match self {
            Axis::X => lm.x,
            Axis::Y => lm.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    #[serde(alias = ">")]
    GreaterThan,
    #[serde(alias = "<")]
    LessThan,
}

/// Relative position of joint `b` against joint `a` on one axis.
///
/// `GreaterThan` holds when `b > a - margin`, `LessThan` when `b < a + margin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSpec {
    pub a: JointId,
    pub b: JointId,
    #[serde(default)]
    pub axis: Axis,
    pub comparator: Comparator,
    pub margin: f32,
}

impl PositionSpec {
    pub fn new(a: JointId, b: JointId, comparator: Comparator, margin: f32) -> Self {
        Self {
            a,
            b,
            axis: Axis::Y,
            comparator,
            margin,
        }
    }

    pub fn holds(&self, a: &Landmark, b: &Landmark) -> bool {
        let (a, b) = (self.axis.of(a), self.axis.of(b));
        match self.comparator {
            Comparator::GreaterThan => b > a - self.margin,
            Comparator::LessThan => b < a + self.margin,
        }
    }
}

/// Whether low-visibility landmarks invalidate an angle.
///
/// Compound full-body movements use `Ignored` because self-occlusion is
/// expected during the movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityPolicy {
    #[default]
    Required,
    Ignored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// The gate closes again after every counted repetition.
    #[default]
    EveryRep,
    /// Once opened, the gate stays open until the count is reset.
    OncePerSession,
}

/// Starting-pose requirement: the first angle must drop below `threshold`
/// before arming is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitGate {
    pub threshold: f32,
    #[serde(default)]
    pub mode: GateMode,
}

/// Full definition of one countable movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    pub name: String,
    pub angles: Vec<AngleSpec>,
    #[serde(default)]
    pub positions: Vec<PositionSpec>,
    #[serde(default)]
    pub visibility: VisibilityPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_gate: Option<InitGate>,
    /// Initial tracking state for new sessions
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Report per-angle readouts while replaying
    #[serde(default)]
    pub debug: bool,
}

fn default_enabled() -> bool {
    true
}

impl MovementConfig {
    pub fn new(name: impl Into<String>, angles: Vec<AngleSpec>) -> Self {
        Self {
            name: name.into(),
            angles,
            positions: Vec::new(),
            visibility: VisibilityPolicy::Required,
            init_gate: None,
            enabled: true,
            debug: false,
        }
    }

    /// Build from parallel tables of joint triples and thresholds.
    pub fn from_tables<P: AsRef<[JointId]>>(
        name: impl Into<String>,
        points: &[P],
        thresholds: &[f32],
    ) -> Result<Self, ConfigError> {
        if points.len() != thresholds.len() {
            return Err(ConfigError::LengthMismatch {
                points: points.len(),
                thresholds: thresholds.len(),
            });
        }

        let angles = points
            .iter()
            .zip(thresholds)
            .enumerate()
            .map(|(index, (joints, &threshold))| match *joints.as_ref() {
                [p1, vertex, p3] => Ok(AngleSpec::new(p1, vertex, p3, threshold)),
                ref other => Err(ConfigError::MalformedAngle {
                    index,
                    joints: other.to_vec(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = Self::new(name, angles);
        config.validate()?;
        Ok(config)
    }

    pub fn with_positions(mut self, positions: Vec<PositionSpec>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityPolicy) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_init_gate(mut self, gate: InitGate) -> Self {
        self.init_gate = Some(gate);
        self
    }

    pub fn requires_visibility(&self) -> bool {
        self.visibility == VisibilityPolicy::Required
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_degrees = |t: f32| t > 0.0 && t <= 180.0;

        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.angles.is_empty() {
            return Err(ConfigError::NoAngles {
                movement: self.name.clone(),
            });
        }
        for (index, spec) in self.angles.iter().enumerate() {
            if !valid_degrees(spec.threshold) {
                return Err(ConfigError::ThresholdOutOfRange {
                    movement: self.name.clone(),
                    index,
                    threshold: spec.threshold,
                });
            }
        }
        for (index, spec) in self.positions.iter().enumerate() {
            if !spec.margin.is_finite() {
                return Err(ConfigError::InvalidMargin {
                    movement: self.name.clone(),
                    index,
                    margin: spec.margin,
                });
            }
        }
        if let Some(gate) = &self.init_gate {
            if !valid_degrees(gate.threshold) {
                return Err(ConfigError::InvalidGate {
                    movement: self.name.clone(),
                    threshold: gate.threshold,
                });
            }
        }
        Ok(())
    }
}
