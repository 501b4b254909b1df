//! Updaters fed by decoded SSL-Vision packets.
//!
//! Each updater owns the per-camera candidate state for its entities and
//! materializes immutable snapshots on demand. Candidate bookkeeping follows
//! two rules: a frame is authoritative for its camera, and the exposed
//! observation is the highest-confidence candidate across cameras.

mod ball;
mod field;
mod robot;
mod world;

pub use ball::BallUpdater;
pub use field::FieldUpdater;
pub use robot::RobotUpdater;
pub use world::WorldUpdater;

use std::time::Duration;

/// Capture time of a detection frame as a point in the monotonic clock
/// domain. Non-finite or negative capture times clamp to zero.
fn stamp(t_capture: f64) -> Duration {
    Duration::try_from_secs_f64(t_capture).unwrap_or_default()
}
