//! Axis-aligned rectangles in screen space (pixels, y grows downward).
//!
//! Used twice over: as a source rectangle inside a sprite sheet and as a
//! world-space bounding box for collision tests.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, width: f32, height: f32) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink every side by `pad`.
    pub fn inset(&self, pad: f32) -> Self {
        Self {
            x: self.x + pad,
            y: self.y + pad,
            width: self.width - 2.0 * pad,
            height: self.height - 2.0 * pad,
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_report_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn separated_on_one_axis_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // x ranges overlap, y ranges do not
        let b = Rect::new(2.0, 20.0, 4.0, 4.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn inset_shrinks_all_sides() {
        let r = Rect::new(10.0, 20.0, 100.0, 80.0).inset(15.0);
        assert_eq!(r, Rect::new(25.0, 35.0, 70.0, 50.0));
        assert!((r.right() - 95.0).abs() < f32::EPSILON);
        assert!((r.bottom() - 85.0).abs() < f32::EPSILON);
    }
}
