//! TOML configuration for the world updater.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::Error;

/// Startup settings for a [`WorldUpdater`](crate::updater::WorldUpdater).
///
/// ```toml
/// disabled_cameras = [2, 3]
///
/// [transform]
/// x = -4500.0
/// y = 0.0
/// theta = 1.5707963
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Cameras whose detection frames should be discarded.
    pub disabled_cameras: Vec<u32>,
    /// The vision-to-field transform.
    pub transform: TransformConfig,
}

/// The vision-to-field transform as configured: a rotation by `theta`
/// followed by a translation by `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Translation along the field length, in millimeters.
    pub x: f64,
    /// Translation along the field width, in millimeters.
    pub y: f64,
    /// Rotation in radians.
    pub theta: f64,
}

impl WorldConfig {
    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;

        Ok(toml::from_str(&raw)?)
    }
}
