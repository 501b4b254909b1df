use serde::{Deserialize, Serialize};

/// Field dimensions in millimeters.
///
/// Everything is zero until a geometry message arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Length of the field, goal to goal.
    pub length: f64,
    /// Width of the field, touchline to touchline.
    pub width: f64,
    /// Radius of the center circle.
    pub center_radius: f64,
    /// Distance between the goal posts.
    pub goal_width: f64,
    /// Depth of the penalty area, measured from the goal line.
    pub penalty_length: f64,
    /// Width of the penalty area.
    pub penalty_width: f64,
}
