//! Pulse Fields - A circular arena survival game
//!
//! Core modules:
//! - `sim`: Simulation core (movement, hazards, safe zones, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `input`: Arcade control mapping
//! - `flow`: Title / play / pause / game over screens

pub mod flow;
pub mod input;
pub mod sim;
pub mod tuning;

pub use flow::{Flow, Screen};
pub use input::{ArcadeButton, InputState};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (screen space, y grows downward)
    pub const ARENA_CENTER_X: f32 = 400.0;
    pub const ARENA_CENTER_Y: f32 = 300.0;
    pub const ARENA_RADIUS: f32 = 250.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 8.0;
    /// Units per second
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const STARTING_LIVES: u8 = 3;
    /// Post-damage grace period (ms)
    pub const INVULNERABLE_DURATION_MS: f32 = 1000.0;

    /// Entry animation: player drops in from above the arena
    pub const ENTRY_START_Y: f32 = -50.0;
    pub const ENTRY_DURATION_MS: f32 = 800.0;

    /// Hazard (energy field) lifecycle
    pub const HAZARD_SPAWN_RADIUS: f32 = 10.0;
    pub const HAZARD_MAX_RADIUS: f32 = 300.0;
    pub const HAZARD_MIN_ALPHA: f32 = 0.3;
    pub const HAZARD_SPEED_MIN: f32 = 50.0;
    pub const HAZARD_SPEED_RANGE: f32 = 30.0;
    /// Spawn distance from center is [INNER, arena_radius - OUTER_MARGIN)
    pub const HAZARD_SPAWN_INNER: f32 = 50.0;
    pub const HAZARD_SPAWN_OUTER_MARGIN: f32 = 100.0;
    pub const HAZARD_SPAWN_DELAY_START_MS: f32 = 3000.0;
    pub const HAZARD_SPAWN_DELAY_MIN_MS: f32 = 2000.0;
    /// Spawn delay shrinks by 1ms per this many ms of elapsed time
    pub const HAZARD_SPAWN_DELAY_DECAY: f32 = 5000.0;
    /// Collision forgiveness (units)
    pub const HAZARD_FORGIVENESS: f32 = 1.0;

    /// Safe zones
    pub const ZONE_BASE_COUNT: u32 = 3;
    pub const ZONE_GROWTH_INTERVAL_MS: f32 = 10_000.0;
    pub const ZONE_REGEN_INTERVAL_MS: f32 = 5000.0;
    pub const ZONE_ANGLE_JITTER: f32 = 0.5;
    pub const ZONE_DIST_MIN: f32 = 50.0;
    pub const ZONE_DIST_RANGE: f32 = 150.0;
    pub const ZONE_RADIUS_MIN: f32 = 40.0;
    pub const ZONE_RADIUS_RANGE: f32 = 30.0;
    /// Gap kept between a zone's edge and the arena wall
    pub const ZONE_WALL_MARGIN: f32 = 20.0;
    /// Player must be this far inside a zone's edge to count
    pub const ZONE_CONTAINMENT_MARGIN: f32 = 2.0;

    /// Score per ms spent inside a safe zone
    pub const SCORE_PER_MS: f64 = 0.1;

    /// Trail sampling
    pub const TRAIL_INTERVAL_MS: f32 = 30.0;
    pub const TRAIL_LENGTH: usize = 15;

    /// Undrained one-shot events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Colour tags (0xRRGGBB)
    pub const HAZARD_COLORS: [u32; 7] = [
        0xff0080, 0xff8000, 0xffff00, 0x80ff00, 0x00ffff, 0x0080ff, 0x8000ff,
    ];
    pub const ZONE_COLORS: [u32; 3] = [0x0088ff, 0xff0000, 0x00ff00];
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta) around `center`
#[inline]
pub fn cartesian_to_polar(center: Vec2, pos: Vec2) -> (f32, f32) {
    let d = pos - center;
    (d.length(), d.y.atan2(d.x))
}

/// Sanitize a frame delta: negative or non-finite deltas become zero
#[inline]
pub fn sanitize_delta(delta_ms: f32) -> f32 {
    if delta_ms.is_finite() && delta_ms > 0.0 {
        delta_ms
    } else {
        0.0
    }
}
