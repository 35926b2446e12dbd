//! Turns freehand strokes or text into a normalized point cloud.

use crate::geometry::normalize_points;
use glam::Vec2;

pub mod font;

/// Fewer captured points than this never make a shape.
pub const MIN_SHAPE_POINTS: usize = 5;

/// Origin-centered point cloud whose larger side spans 2 units.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomShape {
    points: Vec<Vec2>,
}

impl CustomShape {
    /// Normalizes raw screen-space points. `None` when empty.
    pub fn from_raw(points: &[Vec2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self { points: normalize_points(points) })
    }

    /// Wraps points that are already normalized.
    pub fn from_normalized(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn from_text(text: &str) -> Option<Self> {
        Self::from_raw(&font::text_points(text))
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Freehand stroke buffers. Completed strokes accumulate until cleared; the
/// active stroke joins them on pointer release.
#[derive(Debug, Default, Clone)]
pub struct ShapeCapture {
    strokes: Vec<Vec<Vec2>>,
    active: Option<Vec<Vec2>>,
}

impl ShapeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, p: Vec2) {
        self.finish_active();
        self.active = Some(vec![p]);
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        if let Some(active) = self.active.as_mut() {
            active.push(p);
        }
    }

    pub fn pointer_up(&mut self) {
        self.finish_active();
    }

    fn finish_active(&mut self) {
        if let Some(stroke) = self.active.take() {
            if !stroke.is_empty() {
                self.strokes.push(stroke);
            }
        }
    }

    pub fn strokes(&self) -> &[Vec<Vec2>] {
        &self.strokes
    }

    pub fn active(&self) -> Option<&[Vec2]> {
        self.active.as_deref()
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn point_count(&self) -> usize {
        self.all_points().count()
    }

    fn all_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.strokes.iter().flatten().chain(self.active.iter().flatten()).copied()
    }

    /// Normalized union of every stroke, including one still in progress.
    /// Does not clear the buffers.
    pub fn captured_shape(&self) -> Option<CustomShape> {
        let points: Vec<Vec2> = self.all_points().collect();
        if points.len() < MIN_SHAPE_POINTS {
            return None;
        }
        CustomShape::from_raw(&points)
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(capture: &mut ShapeCapture, points: &[(f32, f32)]) {
        let mut it = points.iter().map(|&(x, y)| Vec2::new(x, y));
        if let Some(first) = it.next() {
            capture.pointer_down(first);
            it.for_each(|p| capture.pointer_move(p));
            capture.pointer_up();
        }
    }

    #[test]
    fn four_points_are_not_enough() {
        let mut capture = ShapeCapture::new();
        stroke(&mut capture, &[(0.0, 0.0), (10.0, 0.0)]);
        stroke(&mut capture, &[(10.0, 10.0), (0.0, 10.0)]);
        assert_eq!(capture.point_count(), 4);
        assert!(capture.captured_shape().is_none());
    }

    #[test]
    fn five_points_make_a_shape() {
        let mut capture = ShapeCapture::new();
        stroke(&mut capture, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        stroke(&mut capture, &[(0.0, 10.0), (5.0, 5.0)]);
        let shape = capture.captured_shape().unwrap();
        assert_eq!(shape.len(), 5);
        assert!(shape.points().iter().all(|p| p.x.abs() <= 1.0 + 1e-6 && p.y.abs() <= 1.0 + 1e-6));
    }

    #[test]
    fn in_progress_stroke_counts_and_query_does_not_clear() {
        let mut capture = ShapeCapture::new();
        capture.pointer_down(Vec2::new(0.0, 0.0));
        for i in 1..6 {
            capture.pointer_move(Vec2::new(i as f32, i as f32 * 2.0));
        }
        assert!(capture.strokes().is_empty());
        assert!(capture.captured_shape().is_some());
        assert!(capture.captured_shape().is_some());
        assert_eq!(capture.active().map(<[Vec2]>::len), Some(6));
    }

    #[test]
    fn moves_without_a_press_are_ignored() {
        let mut capture = ShapeCapture::new();
        capture.pointer_move(Vec2::ONE);
        capture.pointer_up();
        assert_eq!(capture.point_count(), 0);
    }

    #[test]
    fn clear_drops_everything() {
        let mut capture = ShapeCapture::new();
        stroke(&mut capture, &[(0.0, 0.0), (1.0, 1.0)]);
        capture.pointer_down(Vec2::ZERO);
        capture.clear();
        assert_eq!(capture.point_count(), 0);
        assert!(!capture.is_drawing());
    }

    #[test]
    fn text_shape_is_normalized() {
        let shape = CustomShape::from_text("Hi").unwrap();
        assert!(shape.len() > MIN_SHAPE_POINTS);
        let (lo, hi) = crate::geometry::bounds(shape.points()).unwrap();
        let span = (hi - lo).max_element();
        assert!((span - 2.0).abs() < 1e-4);
        assert!(CustomShape::from_text("   ").is_none());
    }
}
