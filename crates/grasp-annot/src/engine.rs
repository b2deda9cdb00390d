//! GUI-facing engine facade.
//!
//! Holds at most one active [`Session`] and maps the "nothing loaded yet"
//! state onto a recoverable error instead of a precondition the GUI has to
//! track itself.

use std::path::Path;

use nalgebra::Point2;

use grasp_annot_core::{GraspLine, HeatmapTriple, ViewportError};

use crate::export::{write_labels, LabelIoError};
use crate::session::{OverlaySegment, Session, ToolMode};
use crate::store::StoreError;
use crate::synth::SynthesisError;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("no image loaded")]
    NoImageLoaded,
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    LabelIo(#[from] LabelIoError),
}

/// Single-session annotation engine.
#[derive(Default)]
pub struct Engine {
    session: Option<Session>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active session with a fresh one for the newly loaded
    /// image. All annotations and maps of the previous image are dropped.
    pub fn load_image(
        &mut self,
        image_size: (u32, u32),
        viewport_size: (u32, u32),
    ) -> Result<(), EngineError> {
        self.session = Some(Session::new(image_size, viewport_size)?);
        Ok(())
    }

    /// Close the current image, if any.
    pub fn close_image(&mut self) {
        self.session = None;
    }

    pub fn has_image(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Result<&Session, EngineError> {
        self.session.as_ref().ok_or(EngineError::NoImageLoaded)
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, EngineError> {
        self.session.as_mut().ok_or(EngineError::NoImageLoaded)
    }

    pub fn set_mode(&mut self, mode: ToolMode) -> Result<(), EngineError> {
        self.session_mut()?.set_mode(mode);
        Ok(())
    }

    pub fn pointer_pressed(&mut self, pointer: Point2<f32>) -> Result<bool, EngineError> {
        Ok(self.session_mut()?.pointer_pressed(pointer))
    }

    pub fn pointer_moved(
        &mut self,
        pointer: Point2<f32>,
        pressed: bool,
    ) -> Result<bool, EngineError> {
        Ok(self.session_mut()?.pointer_moved(pointer, pressed))
    }

    pub fn pointer_released(&mut self, pointer: Point2<f32>) -> Result<Option<GraspLine>, EngineError> {
        Ok(self.session_mut()?.pointer_released(pointer).copied())
    }

    pub fn mark_width(&mut self, length_ratio: f32) -> Result<(), EngineError> {
        self.session_mut()?.mark_width(length_ratio)?;
        Ok(())
    }

    pub fn generate(&mut self) -> Result<&HeatmapTriple, EngineError> {
        Ok(self.session_mut()?.generate()?)
    }

    pub fn overlay(&self) -> Result<Vec<OverlaySegment>, EngineError> {
        Ok(self.session()?.overlay())
    }

    /// Write the label file for the current maps at original resolution.
    pub fn export_labels(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let session = self.session()?;
        write_labels(session.heatmaps(), session.image_size(), path)?;
        Ok(())
    }
}
