//! Pointer-to-image coordinate mapping.
//!
//! The GUI shows the image scaled into a fixed viewport with preserved
//! aspect ratio, so the displayed image is letterboxed inside the widget.
//! `DisplayRect` records where the image actually landed; pointer events
//! arrive in widget coordinates and are translated here.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ViewportError {
    #[error("invalid resolution: {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// On-screen bounding box of the scaled image inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub origin: Point2<f32>,
    pub size: Vector2<f32>,
}

impl DisplayRect {
    pub fn contains(&self, p: Point2<f32>) -> bool {
        let rel = p - self.origin;
        rel.x >= 0.0 && rel.y >= 0.0 && rel.x <= self.size.x && rel.y <= self.size.y
    }
}

/// Scale `image_size` into `viewport_size` preserving aspect ratio and
/// center the result. Offsets are floored to whole pixels, matching the
/// integer widget coordinates the GUI reports.
pub fn fit_display_rect(
    image_size: (u32, u32),
    viewport_size: (u32, u32),
) -> Result<DisplayRect, ViewportError> {
    let (iw, ih) = image_size;
    let (vw, vh) = viewport_size;
    if iw == 0 || ih == 0 {
        return Err(ViewportError::InvalidResolution {
            width: iw,
            height: ih,
        });
    }
    if vw == 0 || vh == 0 {
        return Err(ViewportError::InvalidResolution {
            width: vw,
            height: vh,
        });
    }

    let scale = (vw as f32 / iw as f32).min(vh as f32 / ih as f32);
    let sw = (iw as f32 * scale).floor();
    let sh = (ih as f32 * scale).floor();
    let ox = ((vw as f32 - sw) / 2.0).floor();
    let oy = ((vh as f32 - sh) / 2.0).floor();

    Ok(DisplayRect {
        origin: Point2::new(ox, oy),
        size: Vector2::new(sw, sh),
    })
}

/// Translate a pointer position in viewport coordinates into image-space
/// coordinates. `None` when the pointer falls outside the displayed image.
pub fn map_to_image(pointer: Point2<f32>, rect: &DisplayRect) -> Option<Point2<f32>> {
    if !rect.contains(pointer) {
        return None;
    }
    Some(Point2::from(pointer - rect.origin))
}
