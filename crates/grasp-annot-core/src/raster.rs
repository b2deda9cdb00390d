//! Float raster buffers and polygon scan filling.

use serde::{Deserialize, Serialize};

/// A row-major single-channel float raster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map2 {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl Map2 {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }
}

/// The three co-registered annotation maps at preview resolution.
///
/// Invariants: `quality` values lie in `[0, 1]`, `angle` in `[-90, 90]`
/// degrees, `width` is non-negative and in original-image pixel units.
/// Pixel `(y, x)` refers to the same physical location in all three.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatmapTriple {
    pub quality: Map2,
    pub angle: Map2,
    pub width: Map2,
}

impl HeatmapTriple {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            quality: Map2::zeros(width, height),
            angle: Map2::zeros(width, height),
            width: Map2::zeros(width, height),
        }
    }

    pub fn width_px(&self) -> usize {
        self.quality.width
    }

    pub fn height_px(&self) -> usize {
        self.quality.height
    }
}

/// Visit every raster pixel inside the polygon `(xs[i], ys[i])`, clipped to
/// `width` x `height`.
///
/// Even-odd scanline fill sampled at integer rows; horizontal edges drop
/// out of the crossing rule naturally. Vertices are in pixel coordinates.
pub fn fill_polygon(
    xs: &[f32],
    ys: &[f32],
    width: usize,
    height: usize,
    mut visit: impl FnMut(usize, usize),
) {
    assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n < 3 || width == 0 || height == 0 {
        return;
    }

    let y_min = ys.iter().cloned().fold(f32::INFINITY, f32::min);
    let y_max = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let row_start = y_min.floor().max(0.0) as usize;
    let row_end = (y_max.ceil() as isize).min(height as isize - 1);
    if row_end < row_start as isize {
        return;
    }

    let mut crossings: Vec<f32> = Vec::with_capacity(n);
    for row in row_start..=row_end as usize {
        let yf = row as f32;
        crossings.clear();
        for i in 0..n {
            let j = (i + 1) % n;
            let (y0, y1) = (ys[i], ys[j]);
            if (y0 <= yf) == (y1 <= yf) {
                continue;
            }
            let t = (yf - y0) / (y1 - y0);
            crossings.push(xs[i] + t * (xs[j] - xs[i]));
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x0 = pair[0].ceil().max(0.0) as usize;
            let x1 = (pair[1].floor() as isize).min(width as isize - 1);
            let mut x = x0 as isize;
            while x <= x1 {
                visit(x as usize, row);
                x += 1;
            }
        }
    }
}
