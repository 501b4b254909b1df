use serde::{Deserialize, Serialize};

/// The ball, in field coordinates.
///
/// Kinematics are `None` until a filter estimates them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Position along the field length, in millimeters.
    pub x: f64,
    /// Position along the field width, in millimeters.
    pub y: f64,
    /// Velocity along the field length, in millimeters per second.
    pub vx: Option<f64>,
    /// Velocity along the field width, in millimeters per second.
    pub vy: Option<f64>,
    /// Acceleration along the field length, in millimeters per second squared.
    pub ax: Option<f64>,
    /// Acceleration along the field width, in millimeters per second squared.
    pub ay: Option<f64>,
    /// Detection confidence in `[0, 100]`.
    pub confidence: f64,
}

impl Ball {
    /// A ball at a known position, with no kinematics attached.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}
