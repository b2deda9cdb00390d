//! Heatmap synthesis: walk each annotated grasp line, rasterize the chain
//! of cross-sections at preview resolution and accumulate Gaussian grasp
//! quality around the axis.

use grasp_annot_core::{
    axis_angle_deg, distance_point_to_segment, fill_polygon, perpendicular_at, HeatmapTriple,
    Segment,
};
use nalgebra::Point2;

use crate::store::AnnotationSet;

#[derive(thiserror::Error, Debug)]
pub enum SynthesisError {
    #[error("annotation set is empty")]
    EmptyAnnotationSet,
    #[error("invalid resolution: {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// Synthesize the quality/angle/width maps for `set`.
///
/// `image_size` is the loaded image's pixel dimensions; `preview_size` is
/// the output resolution (typically half the image, floored). Lines
/// without a width annotation contribute nothing. The result is computed
/// from scratch on every call, so repeated synthesis of an unchanged set
/// is bit-identical.
pub fn synthesize(
    set: &AnnotationSet,
    image_size: (u32, u32),
    preview_size: (u32, u32),
) -> Result<HeatmapTriple, SynthesisError> {
    let (orig_w, orig_h) = image_size;
    let (prev_w, prev_h) = preview_size;
    if orig_w == 0 || orig_h == 0 {
        return Err(SynthesisError::InvalidResolution {
            width: orig_w,
            height: orig_h,
        });
    }
    if prev_w == 0 || prev_h == 0 {
        return Err(SynthesisError::InvalidResolution {
            width: prev_w,
            height: prev_h,
        });
    }
    if set.is_empty() {
        return Err(SynthesisError::EmptyAnnotationSet);
    }

    let mut maps = HeatmapTriple::zeros(prev_w as usize, prev_h as usize);

    let sx = prev_w as f32 / orig_w as f32;
    let sy = prev_h as f32 / orig_h as f32;
    // Sigma shrinks with the downscale factor so the band stays visually
    // consistent at preview resolution.
    let sigma_scale = 4.0 * orig_h as f32 / prev_h as f32;

    let mut max_angle: f32 = f32::NEG_INFINITY;
    let mut max_width: f32 = f32::NEG_INFINITY;

    for line in set.lines() {
        let Some(perp) = line.perp else {
            continue;
        };

        // One sample per pixel of axis length; a chain needs at least two
        // cross-sections before anything is rasterized.
        let n = line.length.floor() as usize;
        if n < 2 {
            continue;
        }

        let cross_len = line.length * perp.length_ratio;
        if cross_len <= 0.0 {
            continue;
        }
        let sigma = cross_len / sigma_scale;

        let angle_deg = axis_angle_deg(line.start, line.end);
        max_angle = max_angle.max(angle_deg.abs());
        max_width = max_width.max(cross_len);

        let step = (line.end - line.start) / (n - 1) as f32;
        let mut prev_cross = None;

        for i in 0..n {
            let center: Point2<f32> = line.start + step * i as f32;
            let cross = perpendicular_at(line, center, perp.length_ratio);

            if let Some(prev) = prev_cross {
                rasterize_quad(&mut maps, &prev, &cross, sx, sy, sigma, cross_len, angle_deg);
            }
            prev_cross = Some(cross);
        }
    }

    log::debug!("synthesized heatmaps: max |angle| {max_angle:.2} deg, max width {max_width:.2}");
    Ok(maps)
}

/// Rasterize the quadrilateral spanned by two consecutive cross-sections
/// and write all three maps inside it.
#[allow(clippy::too_many_arguments)]
fn rasterize_quad(
    maps: &mut HeatmapTriple,
    prev: &Segment,
    cur: &Segment,
    sx: f32,
    sy: f32,
    sigma: f32,
    cross_len: f32,
    angle_deg: f32,
) {
    // Corner order prev_start, prev_end, cur_end, cur_start keeps the
    // polygon non-self-intersecting. Vertices are floored to whole preview
    // pixels before filling and distance evaluation.
    let xs = [
        (prev.start.x * sx).floor(),
        (prev.end.x * sx).floor(),
        (cur.end.x * sx).floor(),
        (cur.start.x * sx).floor(),
    ];
    let ys = [
        (prev.start.y * sy).floor(),
        (prev.end.y * sy).floor(),
        (cur.end.y * sy).floor(),
        (cur.start.y * sy).floor(),
    ];

    // Local center line: midpoints of the two cross-sections, in scaled
    // space.
    let c0 = Point2::new(
        ((prev.start.x + prev.end.x) / 2.0 * sx).floor(),
        ((prev.start.y + prev.end.y) / 2.0 * sy).floor(),
    );
    let c1 = Point2::new(
        ((cur.start.x + cur.end.x) / 2.0 * sx).floor(),
        ((cur.start.y + cur.end.y) / 2.0 * sy).floor(),
    );

    let (w, h) = (maps.width_px(), maps.height_px());
    fill_polygon(&xs, &ys, w, h, |x, y| {
        let p = Point2::new(x as f32, y as f32);
        let dist = distance_point_to_segment(p, c0, c1);
        let g = (-0.5 * dist * dist / (sigma * sigma)).exp();

        // Quality accumulates by maximum so overlapping bands never erase
        // a higher confidence. Width and angle are last-writer-wins; that
        // asymmetry matches the datasets already labeled with this tool.
        let q = maps.quality.get(x, y);
        maps.quality.set(x, y, q.max(g));
        maps.width.set(x, y, cross_len);
        maps.angle.set(x, y, angle_deg);
    });
}
