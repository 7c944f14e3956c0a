//! Integer screen-space rectangles
//!
//! Screen coordinates: origin at the top-left corner, y grows downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    /// Rectangle of the given size at the origin
    pub fn sized(size: IVec2) -> Self {
        Self {
            pos: IVec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.pos.x + self.size.x / 2
    }

    pub fn set_right(&mut self, right: i32) {
        self.pos.x = right - self.size.x;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.pos.y = bottom - self.size.y;
    }

    /// Place so the middle of the bottom edge sits at `point`
    pub fn set_midbottom(&mut self, point: IVec2) {
        self.pos.x = point.x - self.size.x / 2;
        self.pos.y = point.y - self.size.y;
    }

    /// Whether two rectangles share any area (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Clamp each edge independently so the rectangle stays inside `bounds`
    pub fn clamp_inside(&mut self, bounds: &Rect) {
        if self.left() < bounds.left() {
            self.pos.x = bounds.left();
        }
        if self.right() > bounds.right() {
            self.set_right(bounds.right());
        }
        if self.top() < bounds.top() {
            self.pos.y = bounds.top();
        }
        if self.bottom() > bounds.bottom() {
            self.set_bottom(bounds.bottom());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center_x(), 25);
    }

    #[test]
    fn test_midbottom() {
        let mut r = Rect::sized(IVec2::new(100, 120));
        r.set_midbottom(IVec2::new(240, 610));
        assert_eq!(r.x(), 190);
        assert_eq!(r.bottom(), 610);
    }

    #[test]
    fn test_intersects_excludes_touching() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
    }

    #[test]
    fn test_clamp_inside_each_edge() {
        let bounds = Rect::new(0, 0, 480, 700);
        let mut r = Rect::new(-5, 650, 100, 120);
        r.clamp_inside(&bounds);
        assert_eq!(r.left(), 0);
        assert_eq!(r.bottom(), 700);

        let mut r = Rect::new(400, -3, 100, 120);
        r.clamp_inside(&bounds);
        assert_eq!(r.right(), 480);
        assert_eq!(r.top(), 0);
    }
}
