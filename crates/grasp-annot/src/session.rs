//! Per-image annotation session.
//!
//! A `Session` is created when an image is loaded and replaced wholesale
//! when the image changes; there is no piecemeal field reset. It owns the
//! annotation set, the heatmap buffers and the active tool mode, and it is
//! the single place where pointer events in viewport coordinates are
//! translated into engine operations.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use grasp_annot_core::{
    derive_perpendicular, fit_display_rect, map_to_image, DisplayRect, GraspLine, HeatmapTriple,
    Segment, ViewportError,
};

use crate::paint::{paint, PaintMode, DEFAULT_PAINT_RADIUS, DEFAULT_PAINT_STRENGTH};
use crate::store::{AnnotationSet, StoreError, DEFAULT_CLICK_TOLERANCE};
use crate::synth::{synthesize, SynthesisError};

/// Scale between original-image and preview coordinates.
const PREVIEW_FACTOR: u32 = 2;

/// Active tool, driven by the GUI's mode toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Idle,
    Draw,
    FineTune(PaintMode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    Axis,
    Width,
}

/// One segment for the GUI to paint over the original image. The engine
/// supplies geometry only; it never draws into the image buffer itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlaySegment {
    pub segment: Segment,
    pub kind: OverlayKind,
    pub selected: bool,
}

pub struct Session {
    image_size: (u32, u32),
    preview_size: (u32, u32),
    display_rect: DisplayRect,
    annotations: AnnotationSet,
    heatmaps: HeatmapTriple,
    mode: ToolMode,
    draw_start: Option<Point2<f32>>,
}

impl Session {
    /// Start a session for an image of `image_size` displayed in a
    /// viewport of `viewport_size`.
    pub fn new(image_size: (u32, u32), viewport_size: (u32, u32)) -> Result<Self, ViewportError> {
        let display_rect = fit_display_rect(image_size, viewport_size)?;
        let preview_size = (image_size.0 / PREVIEW_FACTOR, image_size.1 / PREVIEW_FACTOR);
        log::info!(
            "session: image {}x{}, preview {}x{}",
            image_size.0,
            image_size.1,
            preview_size.0,
            preview_size.1
        );
        Ok(Self {
            image_size,
            preview_size,
            display_rect,
            annotations: AnnotationSet::new(),
            heatmaps: HeatmapTriple::zeros(preview_size.0 as usize, preview_size.1 as usize),
            mode: ToolMode::Idle,
            draw_start: None,
        })
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    pub fn preview_size(&self) -> (u32, u32) {
        self.preview_size
    }

    pub fn display_rect(&self) -> &DisplayRect {
        &self.display_rect
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn heatmaps(&self) -> &HeatmapTriple {
        &self.heatmaps
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        if mode != ToolMode::Draw {
            self.draw_start = None;
        }
        self.mode = mode;
    }

    /// The viewport size changed; refit the display rect.
    pub fn viewport_resized(&mut self, viewport_size: (u32, u32)) -> Result<(), ViewportError> {
        self.display_rect = fit_display_rect(self.image_size, viewport_size)?;
        Ok(())
    }

    /// In-progress axis start point, for the GUI's rubber-band preview.
    pub fn draw_start(&self) -> Option<Point2<f32>> {
        self.draw_start
    }

    /// Pointer press in viewport coordinates. Returns `true` when session
    /// state changed and the GUI should redraw.
    pub fn pointer_pressed(&mut self, pointer: Point2<f32>) -> bool {
        let Some(p) = map_to_image(pointer, &self.display_rect) else {
            return false;
        };
        match self.mode {
            ToolMode::FineTune(mode) => {
                self.paint_at(p, mode);
                true
            }
            ToolMode::Draw => {
                self.draw_start = Some(p);
                false
            }
            ToolMode::Idle => self
                .annotations
                .select_nearest(p, DEFAULT_CLICK_TOLERANCE)
                .is_some(),
        }
    }

    /// Pointer move; `pressed` is whether the primary button is held.
    pub fn pointer_moved(&mut self, pointer: Point2<f32>, pressed: bool) -> bool {
        let Some(p) = map_to_image(pointer, &self.display_rect) else {
            return false;
        };
        match self.mode {
            ToolMode::FineTune(mode) if pressed => {
                self.paint_at(p, mode);
                true
            }
            _ => false,
        }
    }

    /// Pointer release. In draw mode this finishes the axis: the new grasp
    /// line is stored, selected and returned, and the tool drops back to
    /// idle.
    pub fn pointer_released(&mut self, pointer: Point2<f32>) -> Option<&GraspLine> {
        let p = map_to_image(pointer, &self.display_rect)?;
        if self.mode != ToolMode::Draw {
            return None;
        }
        let start = self.draw_start.take()?;
        let line = GraspLine::new(start, p);
        self.annotations.add_line(line);
        self.mode = ToolMode::Idle;
        self.annotations.current()
    }

    /// Create or resize the width annotation of the selected line.
    /// `length_ratio` comes from the width control, range `[0, 2]`.
    pub fn mark_width(&mut self, length_ratio: f32) -> Result<(), StoreError> {
        self.annotations.set_perpendicular(length_ratio)
    }

    /// Run heatmap synthesis over the current annotation set, replacing
    /// any previous maps (including fine-tune edits).
    pub fn generate(&mut self) -> Result<&HeatmapTriple, SynthesisError> {
        self.heatmaps = synthesize(&self.annotations, self.image_size, self.preview_size)?;
        Ok(&self.heatmaps)
    }

    /// Drop all annotations and reset the maps to zero.
    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
        self.heatmaps =
            HeatmapTriple::zeros(self.preview_size.0 as usize, self.preview_size.1 as usize);
    }

    /// Overlay geometry for the GUI: every axis, plus a derived width
    /// segment for lines that have one, with the selection flagged.
    pub fn overlay(&self) -> Vec<OverlaySegment> {
        let current = self.annotations.current_index();
        let mut out = Vec::new();
        for (idx, line) in self.annotations.lines().iter().enumerate() {
            let selected = current == Some(idx);
            out.push(OverlaySegment {
                segment: line.axis(),
                kind: OverlayKind::Axis,
                selected,
            });
            if let Some(perp) = line.perp {
                out.push(OverlaySegment {
                    segment: derive_perpendicular(line, perp.length_ratio),
                    kind: OverlayKind::Width,
                    selected,
                });
            }
        }
        out
    }

    fn paint_at(&mut self, image_point: Point2<f32>, mode: PaintMode) {
        let preview = Point2::new(
            image_point.x / PREVIEW_FACTOR as f32,
            image_point.y / PREVIEW_FACTOR as f32,
        );
        paint(
            &mut self.heatmaps.quality,
            preview,
            mode,
            DEFAULT_PAINT_RADIUS,
            DEFAULT_PAINT_STRENGTH,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: (u32, u32) = (640, 480);
    const VIEWPORT: (u32, u32) = (640, 480);

    fn session() -> Session {
        Session::new(IMAGE, VIEWPORT).unwrap()
    }

    fn draw_line(s: &mut Session, from: (f32, f32), to: (f32, f32)) {
        s.set_mode(ToolMode::Draw);
        assert!(!s.pointer_pressed(Point2::new(from.0, from.1)));
        let line = s.pointer_released(Point2::new(to.0, to.1)).unwrap();
        assert_eq!(line.start, Point2::new(from.0, from.1));
    }

    #[test]
    fn draw_release_creates_and_selects_line() {
        let mut s = session();
        draw_line(&mut s, (100.0, 100.0), (100.0, 200.0));
        assert_eq!(s.annotations().len(), 1);
        assert_eq!(s.annotations().current_index(), Some(0));
        // Drawing mode drops back to idle after the release.
        assert_eq!(s.mode(), ToolMode::Idle);
    }

    #[test]
    fn pointer_outside_display_is_ignored() {
        let mut s = Session::new((1280, 720), (640, 480)).unwrap();
        s.set_mode(ToolMode::Draw);
        // Above the letterbox band.
        assert!(!s.pointer_pressed(Point2::new(320.0, 10.0)));
        assert!(s.draw_start().is_none());
    }

    #[test]
    fn idle_click_selects_nearest_line() {
        let mut s = session();
        draw_line(&mut s, (0.0, 100.0), (600.0, 100.0));
        draw_line(&mut s, (0.0, 300.0), (600.0, 300.0));
        assert_eq!(s.annotations().current_index(), Some(1));

        assert!(s.pointer_pressed(Point2::new(300.0, 102.0)));
        assert_eq!(s.annotations().current_index(), Some(0));

        // A click in empty space keeps the selection.
        assert!(!s.pointer_pressed(Point2::new(300.0, 200.0)));
        assert_eq!(s.annotations().current_index(), Some(0));
    }

    #[test]
    fn mark_width_requires_selection() {
        let mut s = session();
        assert!(s.mark_width(0.25).is_err());
        draw_line(&mut s, (100.0, 100.0), (100.0, 200.0));
        s.mark_width(0.25).unwrap();
        let overlay = s.overlay();
        assert_eq!(overlay.len(), 2);
        assert_eq!(overlay[1].kind, OverlayKind::Width);
        assert!(overlay[1].selected);
    }

    #[test]
    fn generate_fills_the_maps() {
        let mut s = session();
        draw_line(&mut s, (100.0, 100.0), (100.0, 200.0));
        s.mark_width(0.25).unwrap();
        let maps = s.generate().unwrap();
        assert!(maps.quality.data.iter().any(|&v| v > 0.9));
    }

    #[test]
    fn generate_without_lines_fails() {
        let mut s = session();
        assert!(matches!(
            s.generate(),
            Err(SynthesisError::EmptyAnnotationSet)
        ));
    }

    #[test]
    fn fine_tune_paints_the_quality_map() {
        let mut s = session();
        s.set_mode(ToolMode::FineTune(PaintMode::Increase));
        assert!(s.pointer_pressed(Point2::new(100.0, 100.0)));
        // Image (100,100) -> preview (50,50).
        assert!(s.heatmaps().quality.get(50, 50) > 0.0);
        assert_eq!(s.heatmaps().width.get(50, 50), 0.0);

        // Dragging keeps painting.
        assert!(s.pointer_moved(Point2::new(104.0, 100.0), true));
        assert!(!s.pointer_moved(Point2::new(104.0, 100.0), false));
    }

    #[test]
    fn clear_resets_annotations_and_maps() {
        let mut s = session();
        draw_line(&mut s, (100.0, 100.0), (100.0, 200.0));
        s.mark_width(0.25).unwrap();
        s.generate().unwrap();
        s.clear_annotations();
        assert!(s.annotations().is_empty());
        assert!(s.heatmaps().quality.data.iter().all(|&v| v == 0.0));
        assert!(s.mark_width(0.25).is_err());
    }
}
