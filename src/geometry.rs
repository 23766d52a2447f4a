//! Circle and rectangle primitives
//!
//! Positions and vectors are plain `glam::Vec2`. The two shapes use different
//! boundary conventions:
//! - `Circle::intersects` excludes the boundary (strictly inside)
//! - `Rect::intersects` includes all four edges

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::direction;

/// An impact/damage area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// True iff `p` is strictly inside the circle.
    ///
    /// Zero or negative radii never intersect anything; NaN inputs compare
    /// false.
    #[inline]
    pub fn intersects(&self, p: Vec2) -> bool {
        self.radius > direction(self.center, p).length()
    }

    /// True iff any of the points is strictly inside the circle
    pub fn intersects_any(&self, points: &[Vec2]) -> bool {
        points.iter().any(|&p| self.intersects(p))
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        let r = self.radius.max(0.0);
        Rect::new(self.center - Vec2::splat(r), 2.0 * r, 2.0 * r)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self { pos, width, height }
    }

    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos, size, size)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height)
    }

    pub fn midpoint(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Corners in NW, NE, SW, SE order
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.pos,
            Vec2::new(max.x, self.pos.y),
            Vec2::new(self.pos.x, max.y),
            max,
        ]
    }

    /// Closed containment test, inclusive of every edge
    #[inline]
    pub fn intersects(&self, p: Vec2) -> bool {
        let max = self.max();
        self.pos.x <= p.x && max.x >= p.x && self.pos.y <= p.y && max.y >= p.y
    }

    /// Closed overlap test between two rectangles (touching edges count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a, b) = (self.max(), other.max());
        self.pos.x <= b.x && other.pos.x <= a.x && self.pos.y <= b.y && other.pos.y <= a.y
    }

    /// Closest point on (or in) the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let max = self.max();
        let mut q = p;
        if q.x < self.pos.x {
            q.x = self.pos.x;
        } else if q.x > max.x {
            q.x = max.x;
        }
        if q.y < self.pos.y {
            q.y = self.pos.y;
        } else if q.y > max.y {
            q.y = max.y;
        }
        q
    }

    /// True iff the circle touches or penetrates the rectangle
    pub fn overlaps_circle(&self, c: &Circle) -> bool {
        c.intersects(self.closest_point(c.center))
    }

    /// True iff all four corners lie strictly inside the circle
    pub fn inside_circle(&self, c: &Circle) -> bool {
        self.corners().iter().all(|&p| c.intersects(p))
    }
}
