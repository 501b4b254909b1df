//! Detection messages: what one camera saw at one capture instant.

use serde::{Deserialize, Serialize};

/// One camera's view of the field at a single capture instant.
///
/// A frame is authoritative for its camera: entities it omits are no longer
/// in that camera's view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    /// Monotonically increasing per-camera frame counter.
    pub frame_number: u32,
    /// Capture time in seconds, in the vision software's clock domain.
    pub t_capture: f64,
    /// Send time in seconds, in the vision software's clock domain.
    pub t_sent: f64,
    /// The camera that produced this frame.
    pub camera_id: u32,
    /// Every ball candidate in view.
    pub balls: Vec<DetectionBall>,
    /// Yellow-team robots in view.
    pub robots_yellow: Vec<DetectionRobot>,
    /// Blue-team robots in view.
    pub robots_blue: Vec<DetectionRobot>,
}

/// A single ball detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionBall {
    /// Detection quality in `[0, 100]`; higher is better.
    pub confidence: f32,
    /// Position along the field length, in millimeters.
    pub x: f32,
    /// Position along the field width, in millimeters.
    pub y: f32,
    /// Height above the field in millimeters, when the vision software
    /// estimates it.
    pub z: Option<f32>,
}

/// A single robot detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionRobot {
    /// Detection quality in `[0, 100]`; higher is better.
    pub confidence: f32,
    /// Pattern id, when identification succeeded. Observations without an id
    /// cannot be tracked and are dropped by consumers.
    pub robot_id: Option<u32>,
    /// Position along the field length, in millimeters.
    pub x: f32,
    /// Position along the field width, in millimeters.
    pub y: f32,
    /// Heading in radians, when the pattern orientation was resolved.
    pub orientation: Option<f32>,
}
