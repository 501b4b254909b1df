//! The top-level packet wrapping the per-frame messages.

use serde::{Deserialize, Serialize};

use crate::detection::DetectionFrame;
use crate::geometry::GeometryData;

/// One packet from the vision software: at most one detection frame and at
/// most one geometry message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapperPacket {
    /// A camera's detection frame, if this packet carries one.
    pub detection: Option<DetectionFrame>,
    /// A geometry message, if this packet carries one.
    pub geometry: Option<GeometryData>,
}
