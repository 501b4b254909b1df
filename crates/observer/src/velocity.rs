//! Finite-difference velocity and acceleration for robots.

use std::f64::consts::PI;
use std::time::Duration;

use world_model::FilterError;
use world_model::filter::OnUpdated;
use world_model::model::Robot;

/// Difference between two headings, wrapped to `[-π, π)`.
fn heading_difference(to: f64, from: f64) -> f64 {
    (to - from + PI).rem_euclid(2.0 * PI) - PI
}

/// Derives a robot's velocity and acceleration by differencing consecutive
/// selected observations.
///
/// Install it per id, or as the default filter so every robot gets one:
///
/// ```
/// # use world_model::{team::Blue, updater::RobotUpdater};
/// # use observer::VelocityTracker;
/// let mut updater = RobotUpdater::<Blue>::new();
/// updater.set_default_filter(|| Box::new(VelocityTracker::default()));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityTracker {
    previous: Option<Sample>,
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    robot: Robot,
    velocity: Option<(f64, f64, f64)>,
    stamp: Duration,
}

impl OnUpdated<Robot> for VelocityTracker {
    fn update(&mut self, raw: &Robot, stamp: Duration) -> Result<Robot, FilterError> {
        let mut cooked = *raw;

        let velocity = match self.previous {
            Some(previous) => {
                let dt = stamp.saturating_sub(previous.stamp).as_secs_f64();
                if dt <= 0.0 {
                    // a stamp that did not advance keeps the previous estimate
                    return Ok(cooked);
                }

                let vx = (raw.x - previous.robot.x) / dt;
                let vy = (raw.y - previous.robot.y) / dt;
                let vtheta = heading_difference(raw.theta, previous.robot.theta) / dt;
                cooked.vx = Some(vx);
                cooked.vy = Some(vy);
                cooked.vtheta = Some(vtheta);

                if let Some((previous_vx, previous_vy, previous_vtheta)) = previous.velocity {
                    cooked.ax = Some((vx - previous_vx) / dt);
                    cooked.ay = Some((vy - previous_vy) / dt);
                    cooked.atheta = Some((vtheta - previous_vtheta) / dt);
                }

                Some((vx, vy, vtheta))
            }
            None => None,
        };

        self.previous = Some(Sample {
            robot: *raw,
            velocity,
            stamp,
        });

        Ok(cooked)
    }
}
