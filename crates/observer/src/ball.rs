//! A constant-velocity Kalman observer for the ball.

use std::time::Duration;

use nalgebra::{Matrix2, RowVector2, Vector2};
use world_model::FilterError;
use world_model::filter::OnUpdated;
use world_model::model::Ball;

use crate::Error;

/// Process noise power spectral density, in mm²/s³. Sized so that kicks,
/// which accelerate the ball far beyond the constant-velocity model, do not
/// leave the estimate lagging for long.
const PROCESS_NOISE: f64 = 1e6;

/// Vision position noise variance, in mm².
const MEASUREMENT_NOISE: f64 = 25.0;

/// Initial velocity variance, in mm²/s². Covers everything up to a full-power
/// shot.
const INITIAL_VELOCITY_VARIANCE: f64 = 1e8;

/// Kalman observer assuming piecewise-constant ball velocity.
///
/// Install it with
/// [`BallUpdater::set_filter`](world_model::updater::BallUpdater::set_filter);
/// the exposed ball carries the smoothed position and a velocity estimate.
/// The first observation seeds the state, every further one runs a
/// predict/correct cycle with `dt` taken from the capture stamps.
#[derive(Clone, Copy, Debug)]
pub struct BallObserver {
    process_noise: f64,
    measurement_noise: f64,
    /// One position/velocity state per field axis; `None` until seeded.
    axes: Option<[Axis; 2]>,
    last_stamp: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Axis {
    /// Position and velocity along one axis.
    state: Vector2<f64>,
    covariance: Matrix2<f64>,
}

impl Axis {
    fn seeded(position: f64, measurement_noise: f64) -> Self {
        Self {
            state: Vector2::new(position, 0.0),
            covariance: Matrix2::new(measurement_noise, 0.0, 0.0, INITIAL_VELOCITY_VARIANCE),
        }
    }

    fn predict(&mut self, dt: f64, process_noise: f64) {
        let transition = Matrix2::new(1.0, dt, 0.0, 1.0);
        // white-noise acceleration model
        let noise = process_noise
            * Matrix2::new(
                dt.powi(3) / 3.0,
                dt.powi(2) / 2.0,
                dt.powi(2) / 2.0,
                dt,
            );

        self.state = transition * self.state;
        self.covariance = transition * self.covariance * transition.transpose() + noise;
    }

    fn correct(&mut self, measurement: f64, measurement_noise: f64) {
        let innovation = measurement - self.state.x;
        let innovation_variance = self.covariance.m11 + measurement_noise;
        let gain = Vector2::new(self.covariance.m11, self.covariance.m21) / innovation_variance;

        self.state += gain * innovation;
        self.covariance -= gain * RowVector2::new(self.covariance.m11, self.covariance.m12);
    }
}

impl BallObserver {
    /// An observer with noise characteristics suited to SSL-Vision.
    #[must_use]
    pub fn new() -> Self {
        Self::with_noise(PROCESS_NOISE, MEASUREMENT_NOISE)
    }

    /// An observer with explicit process and measurement noise, both in
    /// millimeter units.
    #[must_use]
    pub fn with_noise(process_noise: f64, measurement_noise: f64) -> Self {
        Self {
            process_noise,
            measurement_noise,
            axes: None,
            last_stamp: Duration::ZERO,
        }
    }
}

impl Default for BallObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl OnUpdated<Ball> for BallObserver {
    fn update(&mut self, raw: &Ball, stamp: Duration) -> Result<Ball, FilterError> {
        if !(raw.x.is_finite() && raw.y.is_finite()) {
            return Err(Error::NonFiniteMeasurement.into());
        }

        let measurement = [raw.x, raw.y];
        let Some(axes) = &mut self.axes else {
            self.axes = Some(measurement.map(|position| Axis::seeded(position, self.measurement_noise)));
            self.last_stamp = stamp;
            return Ok(Ball {
                vx: Some(0.0),
                vy: Some(0.0),
                ..*raw
            });
        };

        // A stamp that did not advance skips the prediction step.
        let dt = stamp.saturating_sub(self.last_stamp).as_secs_f64();
        self.last_stamp = stamp;
        for (axis, position) in axes.iter_mut().zip(measurement) {
            if dt > 0.0 {
                axis.predict(dt, self.process_noise);
            }
            axis.correct(position, self.measurement_noise);
        }

        Ok(Ball {
            x: axes[0].state.x,
            y: axes[1].state.x,
            vx: Some(axes[0].state.y),
            vy: Some(axes[1].state.y),
            ax: None,
            ay: None,
            confidence: raw.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;
    use world_model::filter::OnUpdated;
    use world_model::model::Ball;

    use super::BallObserver;

    #[test]
    fn converges_onto_a_resting_ball() {
        // corners and center of a division A field
        let positions = [
            (4500.0, 3000.0),
            (4500.0, -3000.0),
            (-4500.0, -3000.0),
            (-4500.0, 3000.0),
            (0.0, 0.0),
        ];

        let mut observer = BallObserver::new();
        let mut stamp = Duration::ZERO;

        for (x, y) in positions {
            let ball = Ball::at(x, y);
            let mut estimate = Ball::default();

            for _ in 0..1000 {
                stamp += Duration::from_millis(16);
                estimate = observer.update(&ball, stamp).unwrap();
            }

            assert_relative_eq!(estimate.x, x, epsilon = 10.0);
            assert_relative_eq!(estimate.y, y, epsilon = 10.0);
            assert_relative_eq!(estimate.vx.unwrap(), 0.0, epsilon = 10.0);
            assert_relative_eq!(estimate.vy.unwrap(), 0.0, epsilon = 10.0);
        }
    }

    #[test]
    fn tracks_a_rolling_ball() {
        let mut observer = BallObserver::new();
        let mut stamp = Duration::ZERO;
        let mut estimate = Ball::default();

        // 1 m/s along x
        for step in 0..1000u32 {
            stamp += Duration::from_millis(16);
            let ball = Ball::at(f64::from(step) * 16.0, 0.0);
            estimate = observer.update(&ball, stamp).unwrap();
        }

        assert_relative_eq!(estimate.vx.unwrap(), 1000.0, epsilon = 50.0);
        assert_relative_eq!(estimate.vy.unwrap(), 0.0, epsilon = 50.0);
    }

    #[test]
    fn rejects_non_finite_measurements() {
        let mut observer = BallObserver::new();
        let stamp = Duration::from_millis(16);

        observer.update(&Ball::at(0.0, 0.0), stamp).unwrap();
        assert!(
            observer
                .update(&Ball::at(f64::NAN, 0.0), Duration::from_millis(32))
                .is_err()
        );

        // the state survives the rejected measurement
        let estimate = observer
            .update(&Ball::at(1.0, 1.0), Duration::from_millis(48))
            .unwrap();
        assert!(estimate.x.is_finite());
    }
}
