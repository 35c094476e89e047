//! Axis-aligned bounding boxes
//!
//! Screen convention: origin at the top-left, +y points down, so `top` is the
//! smaller y. Intervals are closed: boxes that share an edge intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box stored as min/max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` extending `half_extent` each way
    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Box from the origin to `size`
    pub fn from_size(size: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Closed-interval overlap test
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }

    /// Minimum translation that moves `self` out of `other`.
    ///
    /// Resolves along the axis of least overlap; `None` when the boxes do not
    /// overlap with positive depth (edge contact needs no push).
    pub fn push_out(&self, other: &Aabb) -> Option<Vec2> {
        let overlap_x = self.right().min(other.right()) - self.left().max(other.left());
        let overlap_y = self.bottom().min(other.bottom()) - self.top().max(other.top());
        if overlap_x <= 0.0 || overlap_y <= 0.0 {
            return None;
        }

        let delta = self.center() - other.center();
        if overlap_x < overlap_y {
            let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(overlap_x * sign, 0.0))
        } else {
            let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(0.0, overlap_y * sign))
        }
    }

    /// Which sides of `bounds` this box has crossed, one unit per axis.
    ///
    /// `x = 1` means it left through the left edge (push right), `x = -1`
    /// through the right edge; likewise `y` for top/bottom.
    pub fn exit_sides(&self, bounds: &Aabb) -> Vec2 {
        let x = if self.left() < bounds.left() {
            1.0
        } else if self.right() > bounds.right() {
            -1.0
        } else {
            0.0
        };
        let y = if self.top() < bounds.top() {
            1.0
        } else if self.bottom() > bounds.bottom() {
            -1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}
