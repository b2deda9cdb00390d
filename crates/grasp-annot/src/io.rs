//! JSON persistence for annotation sets.
//!
//! Lets a labeling pass be interrupted and resumed without regenerating
//! the heatmaps: the grasp lines (with their width ratios) are saved next
//! to the image and reloaded into a fresh session later.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::store::AnnotationSet;

#[derive(thiserror::Error, Debug)]
pub enum AnnotationIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// On-disk annotation document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationFile {
    /// Pixel dimensions of the annotated image; a loader should refuse a
    /// file whose dimensions disagree with the image it is applied to.
    pub image_size: (u32, u32),
    pub annotations: AnnotationSet,
}

impl AnnotationFile {
    pub fn new(image_size: (u32, u32), annotations: AnnotationSet) -> Self {
        Self {
            image_size,
            annotations,
        }
    }

    /// Load a JSON annotation document from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnnotationIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this document to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnnotationIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
