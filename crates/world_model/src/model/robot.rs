use serde::{Deserialize, Serialize};

/// A tracked robot, in field coordinates.
///
/// Kinematics are `None` until a filter estimates them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    /// Pattern id, unique within a team.
    pub id: u32,
    /// Position along the field length, in millimeters.
    pub x: f64,
    /// Position along the field width, in millimeters.
    pub y: f64,
    /// Heading in radians.
    pub theta: f64,
    /// Velocity along the field length, in millimeters per second.
    pub vx: Option<f64>,
    /// Velocity along the field width, in millimeters per second.
    pub vy: Option<f64>,
    /// Angular velocity in radians per second.
    pub vtheta: Option<f64>,
    /// Acceleration along the field length, in millimeters per second squared.
    pub ax: Option<f64>,
    /// Acceleration along the field width, in millimeters per second squared.
    pub ay: Option<f64>,
    /// Angular acceleration in radians per second squared.
    pub atheta: Option<f64>,
}

impl Robot {
    /// A robot at a known pose, with no kinematics attached.
    #[must_use]
    pub fn new(id: u32, x: f64, y: f64, theta: f64) -> Self {
        Self {
            id,
            x,
            y,
            theta,
            ..Self::default()
        }
    }
}
