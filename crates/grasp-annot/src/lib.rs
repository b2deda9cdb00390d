//! Grasp-annotation session engine.
//!
//! Workflow mirrored from the interactive tool this crate backs:
//! 1. Load an image: an [`Engine`] opens a fresh [`Session`] with the
//!    image and viewport dimensions.
//! 2. Draw a grasp center axis (pointer press/release in draw mode).
//! 3. Mark the gripper opening width as a ratio of the axis length; the
//!    perpendicular segment is always derived, never stored.
//! 4. Generate: cross-sections are sampled along each annotated axis and
//!    rasterized into three co-registered maps — grasp quality (Gaussian
//!    around the axis), grasp angle and grasp width.
//! 5. Optionally fine-tune the quality map with Gaussian paint strokes.
//! 6. Export the maps as an interleaved float32 label file at original
//!    image resolution.
//!
//! The GUI is an external collaborator: it feeds pointer events and mode
//! toggles in, and renders the overlay geometry and RGB preview buffers
//! the engine hands back.

mod colormap;
mod engine;
mod export;
mod io;
mod paint;
mod session;
mod store;
mod synth;

pub use colormap::{colorbar, map_to_rgb, normalize, MapKind, MAX_DISPLAY_WIDTH};
pub use engine::{Engine, EngineError};
pub use export::{read_labels, resize_bilinear, write_labels, LabelIoError};
pub use io::{AnnotationFile, AnnotationIoError};
pub use paint::{paint, PaintMode, DEFAULT_PAINT_RADIUS, DEFAULT_PAINT_STRENGTH};
pub use session::{OverlayKind, OverlaySegment, Session, ToolMode};
pub use store::{AnnotationSet, StoreError, DEFAULT_CLICK_TOLERANCE};
pub use synth::{synthesize, SynthesisError};

pub use grasp_annot_core as core;
