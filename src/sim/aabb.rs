//! Axis-aligned bounding box geometry
//!
//! Screen space: x grows to the right, y grows downward. `pos` is the
//! top-left corner, `size` the (width, height) extent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle used for drawing and collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (both > 0)
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "AABB extent must be positive");
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Right edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Check if two boxes overlap
    ///
    /// Strict comparison: boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && other.pos.x < self.right()
            && self.pos.y < other.bottom()
            && other.pos.y < self.bottom()
    }

    /// Move the box in place
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
    }

    /// Move the top-left corner to an absolute position
    #[inline]
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_intersecting() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_contained() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        // Shares the bottom edge
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        // Shares only a corner
        let corner = Aabb::new(10.0, 10.0, 10.0, 10.0);

        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!a.overlaps(&corner));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Same rows, different columns
        assert!(!a.overlaps(&Aabb::new(50.0, 0.0, 10.0, 10.0)));
        // Same columns, different rows
        assert!(!a.overlaps(&Aabb::new(0.0, -50.0, 10.0, 10.0)));
    }

    #[test]
    fn test_translate() {
        let mut a = Aabb::new(1.0, 2.0, 3.0, 4.0);
        a.translate(10.0, -5.0);
        assert_eq!(a.x(), 11.0);
        assert_eq!(a.y(), -3.0);
        assert_eq!(a.width(), 3.0);
        assert_eq!(a.height(), 4.0);
        assert_eq!(a.right(), 14.0);
        assert_eq!(a.bottom(), 1.0);
    }
}
