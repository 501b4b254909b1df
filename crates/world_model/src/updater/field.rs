//! Latches field geometry.

use ssl_vision::{CENTER_CIRCLE_ARC, GeometryData};

use crate::model::Field;

/// Keeps the most recently received field geometry.
#[derive(Debug, Default)]
pub struct FieldUpdater {
    field: Field,
}

impl FieldUpdater {
    /// An updater holding the all-zero default field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches the dimensions of a geometry message, last written wins.
    ///
    /// Of the painted arcs only the center circle is consumed; the penalty
    /// area is taken over when the message carries it.
    pub fn update(&mut self, geometry: &GeometryData) {
        let size = &geometry.field;
        self.field.length = size.field_length.into();
        self.field.width = size.field_width.into();
        self.field.goal_width = size.goal_width.into();
        if let Some(depth) = size.penalty_area_depth {
            self.field.penalty_length = depth.into();
        }
        if let Some(width) = size.penalty_area_width {
            self.field.penalty_width = width.into();
        }
        for arc in &size.field_arcs {
            if arc.name == CENTER_CIRCLE_ARC {
                self.field.center_radius = arc.radius.into();
            }
        }

        tracing::debug!(
            length = self.field.length,
            width = self.field.width,
            "field geometry updated"
        );
    }

    /// The last written field, or the default until geometry arrives.
    #[must_use]
    pub fn value(&self) -> Field {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use ssl_vision::{FieldCircularArc, GeometryData, GeometryFieldSize};

    use crate::model::Field;

    use super::FieldUpdater;

    fn geometry() -> GeometryData {
        GeometryData {
            field: GeometryFieldSize {
                field_length: 9000,
                field_width: 6000,
                goal_width: 1000,
                penalty_area_depth: None,
                penalty_area_width: None,
                field_arcs: vec![
                    FieldCircularArc {
                        name: "CenterCircle".into(),
                        radius: 200.0,
                    },
                    FieldCircularArc {
                        name: "SomeOtherArc".into(),
                        radius: 999.0,
                    },
                ],
            },
        }
    }

    #[test]
    fn starts_out_with_the_default_field() {
        assert_eq!(FieldUpdater::new().value(), Field::default());
    }

    #[test]
    fn latches_dimensions_and_the_center_circle() {
        let mut updater = FieldUpdater::new();
        updater.update(&geometry());

        let field = updater.value();
        assert_eq!(field.length, 9000.0);
        assert_eq!(field.width, 6000.0);
        assert_eq!(field.goal_width, 1000.0);
        assert_eq!(field.center_radius, 200.0);
        assert_eq!(field.penalty_length, 0.0);
        assert_eq!(field.penalty_width, 0.0);
    }

    #[test]
    fn last_written_geometry_wins() {
        let mut updater = FieldUpdater::new();
        updater.update(&geometry());

        let mut second = geometry();
        second.field.field_length = 12000;
        second.field.field_arcs.clear();
        updater.update(&second);

        let field = updater.value();
        assert_eq!(field.length, 12000.0);
        // no arc in the second message; the latched radius stays
        assert_eq!(field.center_radius, 200.0);
    }

    #[test]
    fn takes_the_penalty_area_when_present() {
        let mut updater = FieldUpdater::new();

        let mut message = geometry();
        message.field.penalty_area_depth = Some(1200);
        message.field.penalty_area_width = Some(2400);
        updater.update(&message);

        let field = updater.value();
        assert_eq!(field.penalty_length, 1200.0);
        assert_eq!(field.penalty_width, 2400.0);
    }
}
