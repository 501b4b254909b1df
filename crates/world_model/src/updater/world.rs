//! Routes wrapper packets to the entity updaters.

use std::collections::BTreeSet;

use ssl_vision::WrapperPacket;

use crate::Result;
use crate::config::WorldConfig;
use crate::model::World;
use crate::team::{Blue, Yellow};
use crate::transform::FieldTransform;

use super::{BallUpdater, FieldUpdater, RobotUpdater};

/// Composes the ball, both robot updaters, and the field behind a
/// camera-enable mask and a shared vision-to-field transform.
#[derive(Default)]
pub struct WorldUpdater {
    ball: BallUpdater,
    robots_blue: RobotUpdater<Blue>,
    robots_yellow: RobotUpdater<Yellow>,
    field: FieldUpdater,
    /// Cameras whose detection frames are discarded. Disabling a camera does
    /// not purge the candidates it already contributed.
    disabled_cameras: BTreeSet<u32>,
}

impl WorldUpdater {
    /// An updater with every camera enabled and the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes one wrapper packet.
    ///
    /// A detection frame from a disabled camera is discarded; geometry is
    /// applied regardless of the camera mask. Every sub-updater ingests the
    /// frame even when one of them reports a filter failure; the first
    /// failure is returned once the packet is fully routed.
    pub fn update(&mut self, packet: &WrapperPacket) -> Result<()> {
        let mut first_error = None;

        if let Some(detection) = &packet.detection {
            if self.is_camera_enabled(detection.camera_id) {
                for result in [
                    self.ball.update(detection),
                    self.robots_blue.update(detection),
                    self.robots_yellow.update(detection),
                ] {
                    if let Err(error) = result {
                        if first_error.is_none() {
                            first_error = Some(error);
                        }
                    }
                }
            } else {
                tracing::debug!(
                    camera_id = detection.camera_id,
                    "discarding detection frame from disabled camera"
                );
            }
        }

        if let Some(geometry) = &packet.geometry {
            self.field.update(geometry);
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// The assembled world snapshot.
    #[must_use]
    pub fn value(&self) -> World {
        World {
            ball: self.ball.value(),
            robots_blue: self.robots_blue.value(),
            robots_yellow: self.robots_yellow.value(),
            field: self.field.value(),
        }
    }

    /// Installs the vision-to-field transform on the ball and both robot
    /// updaters, effective for subsequent packets. Field geometry is never
    /// transformed.
    pub fn set_transform(&mut self, x: f64, y: f64, theta: f64) {
        let transform = FieldTransform::new(x, y, theta);
        self.ball.set_transform(transform);
        self.robots_blue.set_transform(transform);
        self.robots_yellow.set_transform(transform);
    }

    /// Lets `camera_id`'s detection frames through again.
    pub fn enable_camera(&mut self, camera_id: u32) {
        self.disabled_cameras.remove(&camera_id);
    }

    /// Discards detection frames from `camera_id` from now on. Candidates
    /// the camera already contributed stay until other frames displace them.
    pub fn disable_camera(&mut self, camera_id: u32) {
        self.disabled_cameras.insert(camera_id);
    }

    /// Whether detection frames from `camera_id` are ingested.
    #[must_use]
    pub fn is_camera_enabled(&self, camera_id: u32) -> bool {
        !self.disabled_cameras.contains(&camera_id)
    }

    /// The ball updater, for filter management.
    pub fn ball_updater(&mut self) -> &mut BallUpdater {
        &mut self.ball
    }

    /// The blue-team updater, for filter management.
    pub fn robots_blue_updater(&mut self) -> &mut RobotUpdater<Blue> {
        &mut self.robots_blue
    }

    /// The yellow-team updater, for filter management.
    pub fn robots_yellow_updater(&mut self) -> &mut RobotUpdater<Yellow> {
        &mut self.robots_yellow
    }

    /// Applies a loaded configuration: camera mask and transform.
    pub fn apply_config(&mut self, config: &WorldConfig) {
        for &camera_id in &config.disabled_cameras {
            self.disable_camera(camera_id);
        }
        let transform = &config.transform;
        self.set_transform(transform.x, transform.y, transform.theta);

        tracing::info!(
            disabled_cameras = ?config.disabled_cameras,
            "world configuration applied"
        );
    }
}
