//! Game state and core simulation types
//!
//! Everything one session owns lives in `GameState`; the tick is the only
//! writer.

use std::collections::VecDeque;

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PENDING_EVENTS;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is easing in from outside the arena; no movement or collisions
    Entering { elapsed_ms: f32 },
    /// Active gameplay
    Playing,
    /// Out of lives (terminal)
    GameOver,
}

/// One-shot notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Intro finished, player has control
    EntryComplete,
    /// Player was hit by a hazard
    Damage { lives_left: u8 },
    /// A new energy field appeared
    HazardSpawned { id: u32 },
    /// The safe-zone set was replaced
    ZonesRegenerated { count: usize },
    /// Session ended
    GameOver { final_score: u64 },
}

/// The player-controlled dot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Units per second
    pub speed: f32,
    pub invulnerable: bool,
    /// Time spent in the current invulnerability window (ms)
    pub invulnerable_ms: f32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            pos,
            radius,
            speed,
            invulnerable: false,
            invulnerable_ms: 0.0,
        }
    }

    /// Start a fresh invulnerability window
    pub fn grant_invulnerability(&mut self) {
        self.invulnerable = true;
        self.invulnerable_ms = 0.0;
    }

    /// Advance the invulnerability window, clearing it once `duration_ms` has passed
    pub fn decay_invulnerability(&mut self, delta_ms: f32, duration_ms: f32) {
        if !self.invulnerable {
            return;
        }
        self.invulnerable_ms += delta_ms;
        if self.invulnerable_ms >= duration_ms {
            self.invulnerable = false;
            self.invulnerable_ms = 0.0;
        }
    }
}

/// An expanding energy field. Fixed in place, only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardField {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Units per second
    pub expansion_speed: f32,
    /// Visual only
    pub alpha: f32,
    pub color: u32,
}

impl HazardField {
    /// Grow by `expansion_speed * dt` and refresh the fade
    pub fn expand(&mut self, delta_ms: f32, max_radius: f32) {
        self.radius += self.expansion_speed * delta_ms / 1000.0;
        self.alpha = (1.0 - self.radius / max_radius).max(crate::consts::HAZARD_MIN_ALPHA);
    }
}

/// A circular area where the player is immune and scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
}

/// Trail point for player rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
}

/// Seeded RNG owned by the session
#[derive(Debug, Clone)]
pub struct RngState {
    pub seed: u64,
    rng: Pcg32,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Random element of a colour table (0 if the table is empty)
    pub fn pick(&mut self, table: &[u32]) -> u32 {
        table.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters this session was built with
    pub tuning: Tuning,
    pub rng: RngState,
    pub arena_center: Vec2,
    pub arena_radius: f32,
    pub phase: GamePhase,
    pub player: Player,
    /// Active hazards (spawn order)
    pub hazards: Vec<HazardField>,
    /// Current safe-zone set, replaced wholesale on regeneration
    pub zones: Vec<SafeZone>,
    /// Recent player positions, oldest first
    pub trail: VecDeque<TrailPoint>,
    /// Internal score (display value is the floor)
    pub score: f64,
    pub lives: u8,
    /// Elapsed unpaused game time (ms)
    pub elapsed_ms: f64,
    pub spawn_timer_ms: f32,
    pub spawn_delay_ms: f32,
    pub trail_timer_ms: f32,
    /// Pending one-shot events, oldest first. Hosts drain them every frame
    /// through `Snapshot::take` or `drain_events`; if nobody does, the queue
    /// stops at `MAX_PENDING_EVENTS` by dropping the oldest entries.
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session; the player starts above the arena and eases in
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let arena_center = Vec2::new(tuning.arena_center.0, tuning.arena_center.1);
        let entering = tuning.entry_duration_ms > 0.0;
        let start = if entering {
            Vec2::new(arena_center.x, tuning.entry_start_y)
        } else {
            arena_center
        };

        let mut state = Self {
            rng: RngState::new(seed),
            arena_center,
            arena_radius: tuning.arena_radius,
            phase: if entering {
                GamePhase::Entering { elapsed_ms: 0.0 }
            } else {
                GamePhase::Playing
            },
            player: Player::new(start, tuning.player_radius, tuning.player_speed),
            hazards: Vec::new(),
            zones: Vec::new(),
            trail: VecDeque::with_capacity(tuning.trail_length + 1),
            score: 0.0,
            lives: tuning.starting_lives,
            elapsed_ms: 0.0,
            spawn_timer_ms: 0.0,
            spawn_delay_ms: tuning.spawn_delay_start_ms,
            trail_timer_ms: 0.0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };

        super::tick::generate_safe_zones(&mut state);
        log::info!("Session started with seed {seed}");

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Queue a one-shot event, evicting the oldest non-terminal one when full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let oldest = self
                .events
                .iter()
                .position(|e| !matches!(e, GameEvent::GameOver { .. }))
                .unwrap_or(0);
            self.events.remove(oldest);
            log::warn!("Event queue full, dropped oldest event");
        }
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record a trail point, dropping the oldest past the cap
    pub fn record_trail(&mut self) {
        self.trail.push_back(TrailPoint { pos: self.player.pos });
        while self.trail.len() > self.tuning.trail_length {
            self.trail.pop_front();
        }
    }
}
