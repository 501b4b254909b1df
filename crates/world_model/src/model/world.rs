use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Ball, Field, Robot};

/// The fused world: ball, both teams, and the field.
///
/// Robot maps are keyed by pattern id; an id that no camera currently tracks
/// is absent, so presence is checked with `contains_key` before lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// The selected ball.
    pub ball: Ball,
    /// Blue robots by pattern id.
    pub robots_blue: BTreeMap<u32, Robot>,
    /// Yellow robots by pattern id.
    pub robots_yellow: BTreeMap<u32, Robot>,
    /// The latched field geometry.
    pub field: Field,
}
