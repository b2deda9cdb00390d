//! Segment geometry shared by hit-testing, overlay rendering and heatmap
//! synthesis.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A line segment in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
}

impl Segment {
    pub fn new(start: Point2<f32>, end: Point2<f32>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).norm()
    }

    pub fn midpoint(&self) -> Point2<f32> {
        nalgebra::center(&self.start, &self.end)
    }
}

/// Distance from `p` to the segment `[a, b]`.
///
/// Projects `p` onto the segment, clamps the projection parameter to
/// `[0, 1]` and returns the Euclidean distance to the clamped projection.
/// A zero-length segment degenerates to the distance to `a`.
pub fn distance_point_to_segment(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    let ab: Vector2<f32> = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    let proj = a + ab * t;
    (p - proj).norm()
}

/// Fold an angle in degrees into `[-90, 90]` by adding or subtracting 180.
pub fn fold_angle_deg(deg: f32) -> f32 {
    if deg > 90.0 {
        deg - 180.0
    } else if deg < -90.0 {
        deg + 180.0
    } else {
        deg
    }
}

/// Angle between an axis and the horizontal, in degrees, folded into
/// `[-90, 90]`.
///
/// The y component is flipped so that "up" is positive: image rows grow
/// downward but grasp angles are reported in the usual y-up convention.
pub fn axis_angle_deg(start: Point2<f32>, end: Point2<f32>) -> f32 {
    let dx = end.x - start.x;
    let dy = -(end.y - start.y);
    fold_angle_deg(dy.atan2(dx).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_zero_on_the_segment() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert_relative_eq!(
            distance_point_to_segment(Point2::new(3.0, 0.0), a, b),
            0.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(distance_point_to_segment(a, a, b), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn distance_clamps_beyond_endpoints() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        // Past `b`, the nearest point is `b` itself.
        assert_relative_eq!(
            distance_point_to_segment(Point2::new(13.0, 4.0), a, b),
            5.0,
            epsilon = 1e-5
        );
        // Before `a`.
        assert_relative_eq!(
            distance_point_to_segment(Point2::new(-3.0, 4.0), a, b),
            5.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn distance_perpendicular_interior() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert_relative_eq!(
            distance_point_to_segment(Point2::new(5.0, 7.0), a, b),
            7.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn degenerate_segment_is_point_distance() {
        let a = Point2::new(2.0, 2.0);
        let p = Point2::new(5.0, 6.0);
        assert_relative_eq!(distance_point_to_segment(p, a, a), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn fold_angle_into_half_turn() {
        assert_relative_eq!(fold_angle_deg(135.0), -45.0);
        assert_relative_eq!(fold_angle_deg(-135.0), 45.0);
        assert_relative_eq!(fold_angle_deg(45.0), 45.0);
        assert_relative_eq!(fold_angle_deg(90.0), 90.0);
    }

    #[test]
    fn axis_angle_flips_y() {
        // Axis pointing "down" in image space (rows increase) is a negative
        // angle in the y-up convention, folded into [-90, 90].
        let deg = axis_angle_deg(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        assert_relative_eq!(deg, -45.0, epsilon = 1e-4);

        let vertical = axis_angle_deg(Point2::new(100.0, 100.0), Point2::new(100.0, 200.0));
        assert_relative_eq!(vertical.abs(), 90.0, epsilon = 1e-4);
    }
}
