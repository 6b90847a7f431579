//! Axis-aligned box tests
//!
//! Everything in the world is a box for collision purposes: the player square,
//! platform slabs and the enemy sprite extent (the triangle is drawn inside its box).
//! Screen convention: +y points down, so a box's `min.y` is its top edge.

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from top-left corner and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap on the x axis (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Strict point containment
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// Check whether a falling body lands on a platform slab
///
/// The body lands when it overlaps the slab horizontally, its bottom edge sits inside
/// the slab's top band and it is not moving upward. Returns the y the body's top
/// edge must snap to so its bottom rests on the slab.
///
/// Bodies moving up (`vel_y < 0`) pass through from below.
pub fn landing_contact(body: &Aabb, vel_y: f32, slab: &Aabb) -> Option<f32> {
    if vel_y < 0.0 {
        return None;
    }
    let feet = body.max.y;
    if body.overlaps_x(slab) && feet > slab.min.y && feet < slab.max.y {
        Some(slab.min.y - body.height())
    } else {
        None
    }
}
