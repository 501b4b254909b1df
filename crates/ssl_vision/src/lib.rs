//! Decoded forms of the messages published by [SSL-Vision](https://github.com/RoboCup-SSL/ssl-vision),
//! the shared vision software of the RoboCup Small Size League.
//!
//! Wire-level decoding is not part of this crate; these are the plain
//! structures a receiver hands to the rest of the system after parsing the
//! protobuf stream.

pub mod detection;
pub mod geometry;
pub mod wrapper;

pub use detection::{DetectionBall, DetectionFrame, DetectionRobot};
pub use geometry::{CENTER_CIRCLE_ARC, FieldCircularArc, GeometryData, GeometryFieldSize};
pub use wrapper::WrapperPacket;

/// The multicast group SSL-Vision publishes wrapper packets on.
pub const VISION_MULTICAST_ADDRESS: &str = "224.5.23.2";

/// The port of the SSL-Vision multicast group.
pub const VISION_MULTICAST_PORT: u16 = 10006;
