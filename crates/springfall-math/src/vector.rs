//! Small vector helpers shared by the solvers and contact code.

use glam::Vec3;
use springfall_types::constants::EPSILON;

/// Unit direction and distance between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    /// Unit vector pointing from `b` to `a`.
    pub normal: Vec3,
    /// `|a - b|`.
    pub distance: f32,
}

/// Returns the separation of `a` from `b`, or `None` when the two points
/// coincide (distance below [`EPSILON`]) or the offset is not finite.
#[inline]
pub fn separation(a: Vec3, b: Vec3) -> Option<Separation> {
    let offset = a - b;
    let distance = offset.length();
    if !distance.is_finite() || distance < EPSILON {
        return None;
    }
    Some(Separation {
        normal: offset / distance,
        distance,
    })
}

/// Removes the component of `velocity` pointing into a surface with
/// outward `normal`: `v - min(v·n, 0)·n`.
///
/// Velocities already moving away from the surface are returned unchanged.
#[inline]
pub fn remove_inward(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - velocity.dot(normal).min(0.0) * normal
}

/// Clamps `velocity` to at most `max_speed`. Returns the clamped value and
/// whether clamping happened.
#[inline]
pub fn clamp_speed(velocity: Vec3, max_speed: f32) -> (Vec3, bool) {
    let speed_sq = velocity.length_squared();
    if speed_sq > max_speed * max_speed {
        (velocity * (max_speed / speed_sq.sqrt()), true)
    } else {
        (velocity, false)
    }
}

/// Interleaves points into a render-ready `[x0, y0, z0, x1, ...]` buffer.
pub fn flatten(points: &[Vec3]) -> Vec<f32> {
    let mut flat = Vec::with_capacity(points.len() * 3);
    for p in points {
        flat.extend_from_slice(&[p.x, p.y, p.z]);
    }
    flat
}
