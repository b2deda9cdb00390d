//! Core geometry and raster types for grasp annotation.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! know about sessions, tools or label files; it provides the primitives
//! the `grasp-annot` engine builds on: segment math, grasp-line records,
//! viewport mapping and float rasters.

mod geometry;
mod line;
mod logger;
mod raster;
mod viewport;

pub use geometry::{axis_angle_deg, distance_point_to_segment, fold_angle_deg, Segment};
pub use line::{
    derive_perpendicular, find_nearest, perpendicular_at, GraspLine, Perpendicular,
    MAX_LENGTH_RATIO,
};
pub use logger::init_with_level;
pub use raster::{fill_polygon, HeatmapTriple, Map2};
pub use viewport::{fit_display_rect, map_to_image, DisplayRect, ViewportError};
