//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Variable frame delta, everything delta-scaled
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use geometry::{clamp_to_arena, find_hazard_hit, find_safe_zone, hazard_overlaps, inside_zone, sd_circle};
pub use snapshot::{HazardView, PlayerView, Snapshot, ZoneView};
pub use state::{GameEvent, GamePhase, GameState, HazardField, Player, RngState, SafeZone, TrailPoint};
pub use tick::{TickInput, generate_safe_zones, spawn_delay_for, spawn_hazard, tick, zone_count_for};
