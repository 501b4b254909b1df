//! World-state tracking for a robot soccer AI.
//!
//! Fuses SSL-Vision detections from any number of cameras into one
//! authoritative snapshot of the field, the ball, and both teams. Each entity
//! keeps one candidate observation per camera; the highest-confidence
//! candidate is selected and, optionally, run through a user-installed filter
//! before it shows up in the [`model::World`] snapshot.
//!
//! All updaters are single-threaded: the owner serializes `update`, `value`,
//! and filter-management calls, e.g. by confining an updater to one task.

pub mod config;
pub mod filter;
pub mod model;
pub mod team;
pub mod transform;
pub mod updater;

mod error;
pub use error::{Error, FilterError, Result};
