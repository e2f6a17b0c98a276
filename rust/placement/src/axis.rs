// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Repetition axis: an anchor point and a unit direction.

use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Rotation axis used by the angular repeater.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    /// Point the axis passes through.
    pub anchor: Point3<f64>,
    /// Unit direction of the axis.
    pub direction: Unit<Vector3<f64>>,
}

impl AxisFrame {
    /// Builds the axis running from `point1` towards `point2`.
    ///
    /// Coincident points fall back to the +Z axis through `point1`, which is
    /// the direction of the default axis `(0,0,0) -> (0,0,1)`.
    pub fn from_points(point1: &Point3<f64>, point2: &Point3<f64>) -> Self {
        // halved then scaled by the largest component so the norm cannot overflow
        let delta = point2.coords * 0.5 - point1.coords * 0.5;
        let scale = delta.amax();
        let scaled = if scale.is_finite() && scale > 0.0 {
            Some(delta / scale)
        } else {
            None
        };

        let direction = match scaled.and_then(|v| Unit::try_new(v, 1e-15)) {
            Some(d) => d,
            None => {
                tracing::debug!(
                    x = point1.x,
                    y = point1.y,
                    z = point1.z,
                    "Repetition axis points coincide, falling back to +Z"
                );
                Vector3::z_axis()
            }
        };

        Self {
            anchor: *point1,
            direction,
        }
    }

    /// Right-handed rotation by `angle` radians about the axis direction.
    pub fn rotation(&self, angle: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&self.direction, angle)
    }

    /// Rotates `point` by `angle` about the axis, then slides it `shift`
    /// along the axis direction.
    pub fn revolve(&self, point: &Point3<f64>, angle: f64, shift: f64) -> Point3<f64> {
        let offset = self.rotation(angle) * (point - self.anchor);
        self.anchor + offset + self.direction.into_inner() * shift
    }
}

impl Default for AxisFrame {
    fn default() -> Self {
        Self {
            anchor: Point3::origin(),
            direction: Vector3::z_axis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn direction_is_normalized() {
        let frame = AxisFrame::from_points(&Point3::new(1.0, 2.0, 3.0), &Point3::new(1.0, 2.0, 13.0));
        assert_relative_eq!(frame.anchor, Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(frame.direction.into_inner(), Vector3::new(0.0, 0.0, 1.0));

        let frame = AxisFrame::from_points(&Point3::origin(), &Point3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(frame.direction.into_inner(), Vector3::new(0.6, 0.8, 0.0));
    }

    #[test]
    fn coincident_points_fall_back_to_z() {
        let p = Point3::new(5.0, -1.0, 2.0);
        let frame = AxisFrame::from_points(&p, &p);
        assert_eq!(frame.anchor, p);
        assert_eq!(frame.direction, Vector3::z_axis());
    }

    #[test]
    fn far_apart_points_keep_their_direction() {
        let frame = AxisFrame::from_points(&Point3::origin(), &Point3::new(0.0, 0.0, 1e200));
        assert_relative_eq!(frame.direction.into_inner(), Vector3::new(0.0, 0.0, 1.0));

        let p = frame.revolve(&Point3::new(1.0, 0.0, 0.0), FRAC_PI_2, 0.0);
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        let frame = AxisFrame::from_points(
            &Point3::new(-1.5e308, 0.0, 0.0),
            &Point3::new(1.5e308, 0.0, 0.0),
        );
        assert_relative_eq!(frame.direction.into_inner(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn tiny_axis_is_still_an_axis() {
        let frame = AxisFrame::from_points(&Point3::origin(), &Point3::new(0.0, 1e-300, 0.0));
        assert_relative_eq!(frame.direction.into_inner(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn revolve_around_offset_anchor() {
        let frame = AxisFrame::from_points(&Point3::new(1.0, 0.0, 0.0), &Point3::new(1.0, 0.0, 1.0));

        // (2,0,0) is 1 unit from the axis
        let p = frame.revolve(&Point3::new(2.0, 0.0, 0.0), FRAC_PI_2, 3.0);
        assert_relative_eq!(p, Point3::new(1.0, 1.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn reversed_axis_turns_clockwise() {
        let frame = AxisFrame::from_points(&Point3::origin(), &Point3::new(0.0, 0.0, -2.0));
        let p = frame.revolve(&Point3::new(1.0, 0.0, 0.0), FRAC_PI_2, 1.0);
        assert_relative_eq!(p, Point3::new(0.0, -1.0, -1.0), epsilon = 1e-12);
    }
}
