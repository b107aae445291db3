//! Rep Sentinel - repetition counting for pose-tracked exercises
//!
//! Takes the per-frame body landmarks produced by a pose-estimation model
//! and counts completed repetitions of configured movements (arm
//! extensions, sit-to-stand, or anything describable as joint angles plus
//! relative joint positions).
//!
//! ```
//! use rep_sentinel::{presets, Landmark, RepCounter};
//!
//! let mut counter = RepCounter::new(presets::sit_to_stand()).unwrap();
//! let frame: Vec<Landmark> = Vec::new(); // nobody in view
//! assert_eq!(counter.update(&frame), 0);
//! ```

pub mod angle;
pub mod config;
pub mod counter;
pub mod error;
pub mod landmark;
pub mod movement;
pub mod presets;
pub mod replay;
pub mod session;

pub use angle::{AngleEvaluator, EvaluatorConfig};
pub use config::Config;
pub use counter::{AngleReadout, AngleState, RepCounter};
pub use error::{ConfigError, Error, Result};
pub use landmark::{JointId, Landmark};
pub use movement::{
    AngleSpec, Axis, Comparator, GateMode, InitGate, MovementConfig, PositionSpec, VisibilityPolicy,
};
pub use session::{RepEvent, Session};
