//! In-memory annotation set: grasp lines in drawing order plus the current
//! selection.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use grasp_annot_core::{find_nearest, GraspLine};

/// Half-width of the clickable band around a grasp axis, in image pixels.
pub const DEFAULT_CLICK_TOLERANCE: f32 = 5.0;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("no grasp line selected")]
    NoSelection,
}

/// Ordered grasp-line collection. Insertion order is drawing order; the
/// selection is an index, never an owning reference.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnnotationSet {
    lines: Vec<GraspLine>,
    current: Option<usize>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[GraspLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&GraspLine> {
        self.current.map(|i| &self.lines[i])
    }

    /// Append a line and make it the current selection.
    pub fn add_line(&mut self, line: GraspLine) {
        self.lines.push(line);
        self.current = Some(self.lines.len() - 1);
        log::debug!(
            "added grasp line ({:.1},{:.1}) -> ({:.1},{:.1}), {} total",
            line.start.x,
            line.start.y,
            line.end.x,
            line.end.y,
            self.lines.len()
        );
    }

    /// Select the line nearest to `point` within `tolerance`. A miss leaves
    /// the selection unchanged rather than clearing it.
    pub fn select_nearest(&mut self, point: Point2<f32>, tolerance: f32) -> Option<usize> {
        let hit = find_nearest(point, &self.lines, tolerance);
        if hit.is_some() {
            self.current = hit;
        }
        hit
    }

    /// Create or update the width annotation of the current selection.
    pub fn set_perpendicular(&mut self, length_ratio: f32) -> Result<(), StoreError> {
        let idx = self.current.ok_or(StoreError::NoSelection)?;
        self.lines[idx].set_perpendicular(length_ratio);
        Ok(())
    }

    /// Drop all lines and invalidate the selection.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(y: f32) -> GraspLine {
        GraspLine::new(Point2::new(0.0, y), Point2::new(100.0, y))
    }

    #[test]
    fn add_selects_the_new_line() {
        let mut set = AnnotationSet::new();
        set.add_line(line(0.0));
        set.add_line(line(50.0));
        assert_eq!(set.current_index(), Some(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn miss_keeps_previous_selection() {
        let mut set = AnnotationSet::new();
        set.add_line(line(0.0));
        assert_eq!(set.current_index(), Some(0));
        let hit = set.select_nearest(Point2::new(50.0, 40.0), DEFAULT_CLICK_TOLERANCE);
        assert_eq!(hit, None);
        assert_eq!(set.current_index(), Some(0));
    }

    #[test]
    fn select_nearest_updates_current() {
        let mut set = AnnotationSet::new();
        set.add_line(line(0.0));
        set.add_line(line(50.0));
        let hit = set.select_nearest(Point2::new(30.0, 3.0), DEFAULT_CLICK_TOLERANCE);
        assert_eq!(hit, Some(0));
        assert_eq!(set.current_index(), Some(0));
    }

    #[test]
    fn set_perpendicular_requires_selection() {
        let mut set = AnnotationSet::new();
        assert!(matches!(
            set.set_perpendicular(0.25),
            Err(StoreError::NoSelection)
        ));

        set.add_line(line(0.0));
        set.set_perpendicular(0.25).unwrap();
        assert_eq!(set.current().unwrap().perp.unwrap().length_ratio, 0.25);

        // Updating replaces the ratio in place.
        set.set_perpendicular(0.5).unwrap();
        assert_eq!(set.current().unwrap().perp.unwrap().length_ratio, 0.5);
    }

    #[test]
    fn clear_invalidates_selection() {
        let mut set = AnnotationSet::new();
        set.add_line(line(0.0));
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.current_index(), None);
        assert!(matches!(
            set.set_perpendicular(0.25),
            Err(StoreError::NoSelection)
        ));
    }
}
