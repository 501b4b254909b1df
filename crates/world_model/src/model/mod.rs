//! Immutable snapshot types handed to consumers.

mod ball;
mod field;
mod robot;
mod world;

pub use ball::Ball;
pub use field::Field;
pub use robot::Robot;
pub use world::World;
