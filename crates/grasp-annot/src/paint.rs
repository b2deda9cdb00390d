//! Local fine-tuning of the quality map: bounded Gaussian-falloff
//! increments around a pointer position.

use grasp_annot_core::Map2;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAINT_RADIUS: f32 = 5.0;
pub const DEFAULT_PAINT_STRENGTH: f32 = 0.1;

/// Direction of a fine-tune stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintMode {
    Increase,
    Decrease,
}

/// Adjust `quality` in place around `point` (already in preview-resolution
/// coordinates).
///
/// Every pixel within `radius` gets `strength * exp(-d^2 / (2 (radius/2)^2))`
/// added or subtracted, clamped to `[0, 1]`. The clamp is the only bound on
/// repeated application. Angle and width maps are never touched.
pub fn paint(quality: &mut Map2, point: Point2<f32>, mode: PaintMode, radius: f32, strength: f32) {
    if radius <= 0.0 {
        return;
    }
    let (w, h) = (quality.width as isize, quality.height as isize);
    let cx = point.x;
    let cy = point.y;
    let sigma2 = 2.0 * (radius / 2.0) * (radius / 2.0);

    let x0 = ((cx - radius).floor() as isize).max(0);
    let x1 = ((cx + radius).ceil() as isize).min(w - 1);
    let y0 = ((cy - radius).floor() as isize).max(0);
    let y1 = ((cy + radius).ceil() as isize).min(h - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist2 = dx * dx + dy * dy;
            if dist2 > radius * radius {
                continue;
            }
            let factor = (-dist2 / sigma2).exp();
            let v = quality.get(x as usize, y as usize);
            let v = match mode {
                PaintMode::Increase => (v + strength * factor).min(1.0),
                PaintMode::Decrease => (v - strength * factor).max(0.0),
            };
            quality.set(x as usize, y as usize, v);
        }
    }
}
