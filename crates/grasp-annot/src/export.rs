//! Label-file serialization.
//!
//! The persisted artifact is the three maps upsampled back to the original
//! image resolution and channel-merged into one interleaved buffer:
//! row-major `height x width x 3`, little-endian `f32`, channel order
//! `(quality, width, angle)`. Downstream consumers read these files
//! bit-for-bit, so the layout is a compatibility boundary.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use grasp_annot_core::{HeatmapTriple, Map2};

#[derive(thiserror::Error, Debug)]
pub enum LabelIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("label file holds {got} floats, expected {expected}")]
    BadLength { got: usize, expected: usize },
}

#[inline]
fn get_clamped(src: &Map2, x: isize, y: isize) -> f32 {
    let x = x.clamp(0, src.width as isize - 1) as usize;
    let y = y.clamp(0, src.height as isize - 1) as usize;
    src.get(x, y)
}

/// Bilinear resampling of a float map to a new resolution.
pub fn resize_bilinear(src: &Map2, width: usize, height: usize) -> Map2 {
    let mut dst = Map2::zeros(width, height);
    if width == 0 || height == 0 {
        return dst;
    }

    let fx = if width > 1 {
        (src.width as f32 - 1.0) / (width as f32 - 1.0)
    } else {
        0.0
    };
    let fy = if height > 1 {
        (src.height as f32 - 1.0) / (height as f32 - 1.0)
    } else {
        0.0
    };

    for y in 0..height {
        let sy = y as f32 * fy;
        let y0 = sy.floor() as isize;
        let wy = sy - y0 as f32;
        for x in 0..width {
            let sx = x as f32 * fx;
            let x0 = sx.floor() as isize;
            let wx = sx - x0 as f32;

            let p00 = get_clamped(src, x0, y0);
            let p10 = get_clamped(src, x0 + 1, y0);
            let p01 = get_clamped(src, x0, y0 + 1);
            let p11 = get_clamped(src, x0 + 1, y0 + 1);

            let a = p00 + wx * (p10 - p00);
            let b = p01 + wx * (p11 - p01);
            dst.set(x, y, a + wy * (b - a));
        }
    }
    dst
}

/// Upsample `maps` to `image_size` and write the interleaved label file.
pub fn write_labels(
    maps: &HeatmapTriple,
    image_size: (u32, u32),
    path: impl AsRef<Path>,
) -> Result<(), LabelIoError> {
    let (w, h) = (image_size.0 as usize, image_size.1 as usize);
    let quality = resize_bilinear(&maps.quality, w, h);
    let width = resize_bilinear(&maps.width, w, h);
    let angle = resize_bilinear(&maps.angle, w, h);

    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);
    for i in 0..w * h {
        out.write_all(&quality.data[i].to_le_bytes())?;
        out.write_all(&width.data[i].to_le_bytes())?;
        out.write_all(&angle.data[i].to_le_bytes())?;
    }
    out.flush()?;
    log::info!("wrote {}x{}x3 label file", w, h);
    Ok(())
}

/// Read a label file back into a `HeatmapTriple` at the given resolution.
pub fn read_labels(
    path: impl AsRef<Path>,
    image_size: (u32, u32),
) -> Result<HeatmapTriple, LabelIoError> {
    let (w, h) = (image_size.0 as usize, image_size.1 as usize);
    let raw = fs::read(path)?;
    let expected = w * h * 3;
    let got = raw.len() / 4;
    if raw.len() % 4 != 0 || got != expected {
        return Err(LabelIoError::BadLength { got, expected });
    }

    let mut maps = HeatmapTriple::zeros(w, h);
    for (i, chunk) in raw.chunks_exact(4).enumerate() {
        let v = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let px = i / 3;
        match i % 3 {
            0 => maps.quality.data[px] = v,
            1 => maps.width.data[px] = v,
            _ => maps.angle.data[px] = v,
        }
    }
    Ok(maps)
}
