//! State observers that plug into the world model's filter slots.
//!
//! Raw vision observations are noisy and carry no kinematics. The observers
//! in this crate run as on-updated filters and enrich the exposed snapshots:
//! [`BallObserver`] smooths the ball and estimates its velocity with a
//! Kalman filter, [`VelocityTracker`] derives robot velocity and
//! acceleration by differencing consecutive observations.

use thiserror::Error;

pub mod ball;
pub mod velocity;

pub use ball::BallObserver;
pub use velocity::VelocityTracker;

/// Observer error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// A measurement contained NaN or infinity, which would poison the
    /// observer state.
    #[error("non-finite measurement")]
    NonFiniteMeasurement,
}
