//! The vision-to-field coordinate transform.

use std::f64::consts::TAU;

use nalgebra::{Isometry2, Point2, vector};

/// A planar transform from vision coordinates into field coordinates:
/// a rotation followed by a translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldTransform {
    isometry: Isometry2<f64>,
}

impl FieldTransform {
    /// A transform rotating by `theta` radians and translating by `(x, y)`.
    #[must_use]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            isometry: Isometry2::new(vector![x, y], theta),
        }
    }

    /// Maps a vision-frame position into field coordinates.
    #[must_use]
    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        let point = self.isometry.transform_point(&Point2::new(x, y));
        (point.x, point.y)
    }

    /// Maps a vision-frame heading into field coordinates.
    ///
    /// Headings rotate against the point rotation and wrap into `[0, 2π)`.
    #[must_use]
    pub fn apply_angle(&self, theta: f64) -> f64 {
        (theta - self.isometry.rotation.angle()).rem_euclid(TAU)
    }
}

impl Default for FieldTransform {
    fn default() -> Self {
        Self {
            isometry: Isometry2::identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};

    use approx::assert_relative_eq;

    use super::FieldTransform;

    #[test]
    fn identity_leaves_positions_alone() {
        let transform = FieldTransform::default();

        let (x, y) = transform.apply_point(123.0, -456.0);
        assert_relative_eq!(x, 123.0);
        assert_relative_eq!(y, -456.0);
        assert_relative_eq!(transform.apply_angle(1.25), 1.25);
    }

    #[test]
    fn rotates_then_translates_positions() {
        // quarter turn, then 10 along x and 20 along y
        let transform = FieldTransform::new(10.0, 20.0, FRAC_PI_2);

        let (x, y) = transform.apply_point(100.0, 200.0);
        assert_relative_eq!(x, -190.0, epsilon = 1e-7);
        assert_relative_eq!(y, 120.0, epsilon = 1e-7);

        let (x, y) = transform.apply_point(1.0, 2.0);
        assert_relative_eq!(x, 8.0, epsilon = 1e-7);
        assert_relative_eq!(y, 21.0, epsilon = 1e-7);
    }

    #[test]
    fn headings_counter_rotate_and_wrap() {
        let transform = FieldTransform::new(10.0, 20.0, FRAC_PI_2);

        assert_relative_eq!(transform.apply_angle(0.0), 3.0 * FRAC_PI_2, epsilon = 1e-7);
        assert_relative_eq!(transform.apply_angle(PI), FRAC_PI_2, epsilon = 1e-7);
        assert_relative_eq!(
            transform.apply_angle(FRAC_PI_6),
            PI + 2.0 * PI / 3.0,
            epsilon = 1e-7
        );
    }
}
