//! Result and Error types for the crate.
use thiserror::Error;

/// Result containing an error variant from this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// What a filter implementation returns when it rejects an observation;
/// boxed so implementations pick their own error types.
pub type FilterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error variants of the world model.
#[derive(Error, Debug)]
pub enum Error {
    /// The ball filter rejected the selected observation. The previously
    /// exposed ball is kept.
    #[error("ball filter rejected the selected observation")]
    BallFilter(#[source] FilterError),

    /// A robot's filter rejected the selected observation. The robot's
    /// previously exposed value is kept.
    #[error("filter for robot {id} rejected the selected observation")]
    RobotFilter {
        /// The governed robot id.
        id: u32,
        /// The filter's own failure.
        source: FilterError,
    },

    /// A config file could not be read.
    #[error("failed to read config from `{path}`")]
    ConfigIo {
        /// The path that was read.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A config file could not be parsed.
    #[error("failed to parse config")]
    ConfigParse(#[from] toml::de::Error),
}
