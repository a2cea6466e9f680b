//! Circle geometry for the arena
//!
//! Everything in Pulse Fields is a circle: the arena, the player, hazards and
//! safe zones. These predicates are the whole collision model.

use glam::Vec2;

use super::state::{HazardField, SafeZone};

/// Signed distance from `p` to a circle's edge (negative inside)
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Pull a body of `body_radius` back inside the arena wall, keeping its angle
///
/// Returns the clamped position and whether it moved.
pub fn clamp_to_arena(pos: Vec2, center: Vec2, arena_radius: f32, body_radius: f32) -> (Vec2, bool) {
    let limit = (arena_radius - body_radius).max(0.0);
    let (dist, angle) = crate::cartesian_to_polar(center, pos);
    if dist > limit {
        (crate::polar_to_cartesian(center, limit, angle), true)
    } else {
        (pos, false)
    }
}

/// True when a body of `body_radius` (plus `margin`) sits entirely inside `zone`
#[inline]
pub fn inside_zone(pos: Vec2, body_radius: f32, zone: &SafeZone, margin: f32) -> bool {
    sd_circle(pos, zone.pos, zone.radius) < -(body_radius + margin)
}

/// Index of the first zone that fully contains the body
pub fn find_safe_zone(zones: &[SafeZone], pos: Vec2, body_radius: f32, margin: f32) -> Option<usize> {
    zones
        .iter()
        .position(|zone| inside_zone(pos, body_radius, zone, margin))
}

/// True when the body overlaps a hazard by more than `forgiveness`
#[inline]
pub fn hazard_overlaps(pos: Vec2, body_radius: f32, hazard: &HazardField, forgiveness: f32) -> bool {
    sd_circle(pos, hazard.pos, hazard.radius) < body_radius - forgiveness
}

/// Index of the first hazard (spawn order) touching the body
pub fn find_hazard_hit(hazards: &[HazardField], pos: Vec2, body_radius: f32, forgiveness: f32) -> Option<usize> {
    hazards
        .iter()
        .position(|hazard| hazard_overlaps(pos, body_radius, hazard, forgiveness))
}
