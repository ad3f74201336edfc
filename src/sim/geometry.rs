//! Axis-aligned boxes and the player's circular hitbox
//!
//! Screen space: origin top-left, +x right, +y down. Entity positions are
//! the top-left corner of their box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// True when the box lies entirely outside the play area
    pub fn is_off_screen(&self) -> bool {
        self.max().x < 0.0
            || self.pos.x > SCREEN_WIDTH
            || self.max().y < 0.0
            || self.pos.y > SCREEN_HEIGHT
    }
}

/// A circle used for forgiving player hit detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Circle vs box via the closest point on the box
    pub fn intersects(&self, rect: &Rect) -> bool {
        let closest = self.center.clamp(rect.min(), rect.max());
        closest.distance_squared(self.center) < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Shared edge only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_circle_hits_corner_only_when_close() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(Circle::new(Vec2::new(8.0, 8.0), 3.0).intersects(&rect));
        assert!(!Circle::new(Vec2::new(5.0, 5.0), 6.0).intersects(&rect));
        // Center inside the box
        assert!(Circle::new(Vec2::new(15.0, 15.0), 1.0).intersects(&rect));
    }

    #[test]
    fn test_off_screen() {
        let size = Vec2::new(8.0, 4.0);
        assert!(!Rect::new(Vec2::new(400.0, 300.0), size).is_off_screen());
        assert!(Rect::new(Vec2::new(-9.0, 300.0), size).is_off_screen());
        assert!(Rect::new(Vec2::new(SCREEN_WIDTH + 1.0, 300.0), size).is_off_screen());
        assert!(Rect::new(Vec2::new(400.0, SCREEN_HEIGHT + 1.0), size).is_off_screen());
    }
}
