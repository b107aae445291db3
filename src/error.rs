use crate::landmark::JointId;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Rejected movement or evaluator configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("points table has {points} entries but thresholds table has {thresholds}")]
    LengthMismatch { points: usize, thresholds: usize },

    #[error("angle {index} must name exactly three joints, got {joints:?}")]
    MalformedAngle { index: usize, joints: Vec<JointId> },

    #[error("movement '{movement}' has no angles")]
    NoAngles { movement: String },

    #[error("movement '{movement}': angle {index} threshold {threshold} outside (0, 180]")]
    ThresholdOutOfRange {
        movement: String,
        index: usize,
        threshold: f32,
    },

    #[error("movement '{movement}': position {index} margin {margin} is not finite")]
    InvalidMargin {
        movement: String,
        index: usize,
        margin: f32,
    },

    #[error("movement '{movement}': init gate threshold {threshold} outside (0, 180]")]
    InvalidGate { movement: String, threshold: f32 },

    #[error("frame bounds must satisfy 0 <= min < max <= 1, got ({min}, {max})")]
    InvalidBounds { min: f32, max: f32 },

    #[error("visibility threshold {0} outside [0, 1]")]
    InvalidVisibility(f32),

    #[error("movement name must not be empty")]
    EmptyName,

    #[error("duplicate movement '{0}'")]
    DuplicateMovement(String),
}

/// Error types for rep-sentinel
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown movement: {0}")]
    UnknownMovement(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Frame decode error on line {line}: {source}")]
    Frame {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
