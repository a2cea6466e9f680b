//! Read-only frame snapshot for the presentation layer
//!
//! Built after every tick. Pending events are drained into the snapshot, so
//! each damage / game-over notification is seen exactly once.

use glam::Vec2;
use serde::Serialize;

use super::state::{GameEvent, GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub invulnerable: bool,
    /// Time into the current invulnerability window, for blinking
    pub invulnerable_ms: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HazardView {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
}

/// Everything a renderer/HUD needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub arena_center: Vec2,
    pub arena_radius: f32,
    pub player: PlayerView,
    /// Spawn order
    pub hazards: Vec<HazardView>,
    pub zones: Vec<ZoneView>,
    /// Oldest first
    pub trail: Vec<Vec2>,
    /// Display score (floor of the internal score)
    pub score: u64,
    pub lives: u8,
    pub elapsed_ms: f64,
    /// Player took damage since the last snapshot
    pub damage_event: bool,
    /// Final score, set on the snapshot that observes the game over
    pub game_over: Option<u64>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    /// Build a snapshot and consume the pending events
    pub fn take(state: &mut GameState) -> Self {
        let events = state.drain_events();
        Self::build(state, events)
    }

    fn build(state: &GameState, events: Vec<GameEvent>) -> Self {
        let damage_event = events.iter().any(|e| matches!(e, GameEvent::Damage { .. }));
        let game_over = events.iter().find_map(|e| match e {
            GameEvent::GameOver { final_score } => Some(*final_score),
            _ => None,
        });

        Self {
            phase: state.phase,
            arena_center: state.arena_center,
            arena_radius: state.arena_radius,
            player: PlayerView {
                pos: state.player.pos,
                radius: state.player.radius,
                invulnerable: state.player.invulnerable,
                invulnerable_ms: state.player.invulnerable_ms,
            },
            hazards: state
                .hazards
                .iter()
                .map(|h| HazardView {
                    pos: h.pos,
                    radius: h.radius,
                    alpha: h.alpha,
                    color: h.color,
                })
                .collect(),
            zones: state
                .zones
                .iter()
                .map(|z| ZoneView {
                    pos: z.pos,
                    radius: z.radius,
                    color: z.color,
                })
                .collect(),
            trail: state.trail.iter().map(|p| p.pos).collect(),
            score: state.display_score(),
            lives: state.lives,
            elapsed_ms: state.elapsed_ms,
            damage_event,
            game_over,
            events,
        }
    }
}
