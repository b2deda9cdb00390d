//! Grasp-line records and perpendicular (width) segment derivation.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::geometry::{distance_point_to_segment, Segment};

/// Largest allowed width ratio: the width segment may be up to twice the
/// axis length.
pub const MAX_LENGTH_RATIO: f32 = 2.0;

/// Width annotation attached to a grasp line.
///
/// Only the ratio is stored; the width segment's endpoints are always
/// derived from the owning line so they can never go stale when the ratio
/// changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Perpendicular {
    pub length_ratio: f32,
}

/// A user-drawn grasp center axis.
///
/// `length`, `center` and `angle` are computed once at creation and are
/// immutable afterwards; `angle` is `atan2(dy, dx)` in the y-down image
/// frame, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraspLine {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
    pub length: f32,
    pub center: Point2<f32>,
    pub angle: f32,
    pub perp: Option<Perpendicular>,
}

impl GraspLine {
    pub fn new(start: Point2<f32>, end: Point2<f32>) -> Self {
        let d = end - start;
        Self {
            start,
            end,
            length: d.norm(),
            center: nalgebra::center(&start, &end),
            angle: d.y.atan2(d.x),
            perp: None,
        }
    }

    /// Create or update the width annotation. The ratio is clamped to
    /// `[0, MAX_LENGTH_RATIO]`.
    pub fn set_perpendicular(&mut self, length_ratio: f32) {
        self.perp = Some(Perpendicular {
            length_ratio: length_ratio.clamp(0.0, MAX_LENGTH_RATIO),
        });
    }

    pub fn axis(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// Derive the width segment of `line` at its center for the given ratio.
///
/// This is the single definition used both for overlay rendering and for
/// heatmap synthesis.
pub fn derive_perpendicular(line: &GraspLine, length_ratio: f32) -> Segment {
    perpendicular_at(line, line.center, length_ratio)
}

/// Derive a cross-section segment centered at an arbitrary point on the
/// axis, with the line's global length and angle.
pub fn perpendicular_at(line: &GraspLine, center: Point2<f32>, length_ratio: f32) -> Segment {
    let half = line.length * length_ratio / 2.0;
    let perp_angle = line.angle + std::f32::consts::FRAC_PI_2;
    let (sin, cos) = perp_angle.sin_cos();
    Segment::new(
        Point2::new(center.x - half * cos, center.y - half * sin),
        Point2::new(center.x + half * cos, center.y + half * sin),
    )
}

/// Index of the line closest to `point` among those within `tolerance`.
///
/// Strictly-closer wins, so ties go to the first line in iteration order.
/// Returns `None` for an empty slice or when every line is farther than
/// `tolerance`.
pub fn find_nearest(point: Point2<f32>, lines: &[GraspLine], tolerance: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, line) in lines.iter().enumerate() {
        let dist = distance_point_to_segment(point, line.start, line.end);
        if dist > tolerance {
            continue;
        }
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}
