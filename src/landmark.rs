//! Pose landmarks as delivered by the pose model, one slice per frame.

use serde::{Deserialize, Serialize};

/// Joint index in the pose model's landmark layout.
pub type JointId = usize;

// BlazePose / MediaPipe Pose indices (33 landmarks)
pub const NOSE: JointId = 0;
pub const LEFT_SHOULDER: JointId = 11;
pub const RIGHT_SHOULDER: JointId = 12;
pub const LEFT_ELBOW: JointId = 13;
pub const RIGHT_ELBOW: JointId = 14;
pub const LEFT_WRIST: JointId = 15;
pub const RIGHT_WRIST: JointId = 16;
pub const LEFT_HIP: JointId = 23;
pub const RIGHT_HIP: JointId = 24;
pub const LEFT_KNEE: JointId = 25;
pub const RIGHT_KNEE: JointId = 26;
pub const LEFT_ANKLE: JointId = 27;
pub const RIGHT_ANKLE: JointId = 28;

pub const POSE_LANDMARK_COUNT: usize = 33;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: JointId,
    /// Normalized to the frame width, 0-1
    pub x: f32,
    /// Normalized to the frame height, 0-1
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(id: JointId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Landmarks without a visibility score are treated as visible.
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility.map_or(true, |v| v > threshold)
    }
}

/// Find a landmark by joint id.
///
/// Pose models emit landmarks in id order, so `landmarks[id]` is checked
/// first and a linear scan covers sparse or reordered frames.
pub fn find(landmarks: &[Landmark], id: JointId) -> Option<&Landmark> {
    match landmarks.get(id) {
        Some(lm) if lm.id == id => Some(lm),
        _ => landmarks.iter().find(|lm| lm.id == id),
    }
}

/// Decode a flat model output row (`stride` values per landmark) into landmarks.
///
/// Stride 2 is `x, y`; 3 adds `z`; 4 or more adds visibility in slot 3.
/// Ids are positional. A trailing partial landmark is dropped.
pub fn from_flat(data: &[f32], stride: usize) -> Vec<Landmark> {
    if stride < 2 {
        return Vec::new();
    }

    data.chunks_exact(stride)
        .enumerate()
        .map(|(i, row)| Landmark {
            id: i,
            x: row[0],
            y: row[1],
            z: if stride > 2 { row[2] } else { 0.0 },
            visibility: if stride > 3 { Some(row[3]) } else { None },
        })
        .collect()
}
