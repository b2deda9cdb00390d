//! Display normalization and the fixed red-blue ramp used for on-screen
//! previews.
//!
//! Presentation only: nothing here affects the serialized ground truth.

use grasp_annot_core::Map2;
use serde::{Deserialize, Serialize};

/// Fixed maximum grasp width used for display normalization, in the same
/// units as the axis length.
pub const MAX_DISPLAY_WIDTH: f32 = 150.0;

/// Which of the three maps a raw value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapKind {
    Quality,
    Angle,
    Width,
}

/// Normalize a raw map value into `[0, 1]` for display.
pub fn normalize(value: f32, kind: MapKind) -> f32 {
    match kind {
        MapKind::Quality => value.clamp(0.0, 1.0),
        MapKind::Angle => (value + 90.0) / 180.0,
        MapKind::Width => (value / MAX_DISPLAY_WIDTH).clamp(0.0, 1.0),
    }
}

#[inline]
fn ramp(normalized: f32) -> [u8; 3] {
    let r = (normalized * 255.0).round() as u8;
    [r, 0, 255 - r]
}

/// Render a map as an interleaved RGB888 buffer (`height * width * 3`).
pub fn map_to_rgb(map: &Map2, kind: MapKind) -> Vec<u8> {
    let mut out = Vec::with_capacity(map.data.len() * 3);
    for &v in &map.data {
        out.extend_from_slice(&ramp(normalize(v, kind)));
    }
    out
}

/// A vertical legend column for the given map kind: `height` rows of the
/// same ramp, value 1 at the top down to 0 at the bottom.
pub fn colorbar(_kind: MapKind, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(height * 3);
    for i in 0..height {
        let value = 1.0 - i as f32 / height as f32;
        out.extend_from_slice(&ramp(value));
    }
    out
}
