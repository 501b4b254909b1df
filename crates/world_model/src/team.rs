//! Team colours and the compile-time tags distinguishing the two robot
//! updaters.

use std::fmt;

use serde::{Deserialize, Serialize};
use ssl_vision::{DetectionFrame, DetectionRobot};

/// The two team colours of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// The blue team.
    Blue,
    /// The yellow team.
    Yellow,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        };

        f.write_str(name)
    }
}

/// Statically selects which observation list of a detection frame a robot
/// updater listens to.
pub trait TeamColor: 'static {
    /// The colour this tag stands for.
    const COLOR: Color;

    /// The frame's observation list for this colour.
    fn robots(frame: &DetectionFrame) -> &[DetectionRobot];
}

/// Marker for the blue team.
pub enum Blue {}

impl TeamColor for Blue {
    const COLOR: Color = Color::Blue;

    fn robots(frame: &DetectionFrame) -> &[DetectionRobot] {
        &frame.robots_blue
    }
}

/// Marker for the yellow team.
pub enum Yellow {}

impl TeamColor for Yellow {
    const COLOR: Color = Color::Yellow;

    fn robots(frame: &DetectionFrame) -> &[DetectionRobot] {
        &frame.robots_yellow
    }
}
