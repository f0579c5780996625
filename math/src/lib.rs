//! Degree based angles and the few point helpers the renderer and level
//! need. Everything here works in map units as `f32`.

mod angle;

pub use angle::*;
use glam::Vec2;

/// Straight line distance between two points
#[inline]
pub fn point_to_dist(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Cross product sign of `point - origin` against `delta`. Zero or negative
/// means the point is on the left of (or on) the line.
#[inline]
pub fn cross_side(origin: Vec2, delta: Vec2, point: Vec2) -> f32 {
    let d = point - origin;
    d.x * delta.y - d.y * delta.x
}
