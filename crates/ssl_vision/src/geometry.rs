//! Geometry messages: field dimensions and painted markings.

use serde::{Deserialize, Serialize};

/// Name of the arc that outlines the center circle.
pub const CENTER_CIRCLE_ARC: &str = "CenterCircle";

/// Field geometry container.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryData {
    /// Dimensions of the playing field.
    pub field: GeometryFieldSize,
}

/// Dimensions of the playing field, in millimeters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryFieldSize {
    /// Length of the field, goal to goal.
    pub field_length: i32,
    /// Width of the field, touchline to touchline.
    pub field_width: i32,
    /// Distance between the goal posts.
    pub goal_width: i32,
    /// Depth of the penalty area; absent from older vision software.
    pub penalty_area_depth: Option<i32>,
    /// Width of the penalty area; absent from older vision software.
    pub penalty_area_width: Option<i32>,
    /// Painted arcs, e.g. the center circle.
    pub field_arcs: Vec<FieldCircularArc>,
}

/// A painted circular arc on the field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCircularArc {
    /// Well-known arc name, e.g. [`CENTER_CIRCLE_ARC`].
    pub name: String,
    /// Radius in millimeters.
    pub radius: f32,
}
