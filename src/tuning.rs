//! Game balance tuning
//!
//! Every gameplay constant a session reads lives here. Loaded from JSON;
//! missing fields fall back to the arcade defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning load/validation failure
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning JSON: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Session balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_center: (f32, f32),
    pub arena_radius: f32,

    // === Player ===
    pub player_radius: f32,
    /// Units per second
    pub player_speed: f32,
    pub starting_lives: u8,
    pub invulnerable_ms: f32,
    /// Entry animation length (0 skips the intro)
    pub entry_duration_ms: f32,
    /// Where the entry animation starts (above the arena)
    pub entry_start_y: f32,

    // === Hazards ===
    pub hazard_spawn_radius: f32,
    pub hazard_max_radius: f32,
    pub hazard_speed_min: f32,
    pub hazard_speed_range: f32,
    /// Spawn distance from center is [inner, inner + arena_radius - outer_margin)
    pub hazard_spawn_inner: f32,
    pub hazard_spawn_outer_margin: f32,
    pub spawn_delay_start_ms: f32,
    pub spawn_delay_min_ms: f32,
    /// Spawn delay shrinks by 1ms per this many ms of play
    pub spawn_delay_decay: f32,
    /// Overlap (units) tolerated before a hit counts
    pub hazard_forgiveness: f32,

    // === Safe zones ===
    pub zone_base_count: u32,
    pub zone_growth_interval_ms: f32,
    pub zone_regen_interval_ms: f32,
    /// Random angular offset added to each evenly spaced zone (radians)
    pub zone_angle_jitter: f32,
    pub zone_dist_min: f32,
    pub zone_dist_range: f32,
    pub zone_radius_min: f32,
    pub zone_radius_range: f32,
    /// Gap kept between a zone's edge and the arena wall
    pub zone_wall_margin: f32,
    /// Player must be this far inside a zone's edge to count
    pub zone_containment_margin: f32,

    // === Scoring ===
    /// Score per ms spent inside a safe zone
    pub score_per_ms: f64,

    // === Trail ===
    pub trail_interval_ms: f32,
    pub trail_length: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_center: (ARENA_CENTER_X, ARENA_CENTER_Y),
            arena_radius: ARENA_RADIUS,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,
            invulnerable_ms: INVULNERABLE_DURATION_MS,
            entry_duration_ms: ENTRY_DURATION_MS,
            entry_start_y: ENTRY_START_Y,

            hazard_spawn_radius: HAZARD_SPAWN_RADIUS,
            hazard_max_radius: HAZARD_MAX_RADIUS,
            hazard_speed_min: HAZARD_SPEED_MIN,
            hazard_speed_range: HAZARD_SPEED_RANGE,
            hazard_spawn_inner: HAZARD_SPAWN_INNER,
            hazard_spawn_outer_margin: HAZARD_SPAWN_OUTER_MARGIN,
            spawn_delay_start_ms: HAZARD_SPAWN_DELAY_START_MS,
            spawn_delay_min_ms: HAZARD_SPAWN_DELAY_MIN_MS,
            spawn_delay_decay: HAZARD_SPAWN_DELAY_DECAY,
            hazard_forgiveness: HAZARD_FORGIVENESS,

            zone_base_count: ZONE_BASE_COUNT,
            zone_growth_interval_ms: ZONE_GROWTH_INTERVAL_MS,
            zone_regen_interval_ms: ZONE_REGEN_INTERVAL_MS,
            zone_angle_jitter: ZONE_ANGLE_JITTER,
            zone_dist_min: ZONE_DIST_MIN,
            zone_dist_range: ZONE_DIST_RANGE,
            zone_radius_min: ZONE_RADIUS_MIN,
            zone_radius_range: ZONE_RADIUS_RANGE,
            zone_wall_margin: ZONE_WALL_MARGIN,
            zone_containment_margin: ZONE_CONTAINMENT_MARGIN,

            score_per_ms: SCORE_PER_MS,

            trail_interval_ms: TRAIL_INTERVAL_MS,
            trail_length: TRAIL_LENGTH,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (partial documents allowed) and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("arena_radius", self.arena_radius),
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("hazard_spawn_radius", self.hazard_spawn_radius),
            ("hazard_max_radius", self.hazard_max_radius),
            ("spawn_delay_min_ms", self.spawn_delay_min_ms),
            ("zone_growth_interval_ms", self.zone_growth_interval_ms),
            ("zone_regen_interval_ms", self.zone_regen_interval_ms),
            ("trail_interval_ms", self.trail_interval_ms),
            ("spawn_delay_decay", self.spawn_delay_decay),
            ("zone_radius_min", self.zone_radius_min),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        let non_negative = [
            ("invulnerable_ms", self.invulnerable_ms),
            ("entry_duration_ms", self.entry_duration_ms),
            ("hazard_speed_min", self.hazard_speed_min),
            ("hazard_speed_range", self.hazard_speed_range),
            ("hazard_spawn_inner", self.hazard_spawn_inner),
            ("hazard_spawn_outer_margin", self.hazard_spawn_outer_margin),
            ("hazard_forgiveness", self.hazard_forgiveness),
            ("zone_angle_jitter", self.zone_angle_jitter),
            ("zone_dist_min", self.zone_dist_min),
            ("zone_dist_range", self.zone_dist_range),
            ("zone_radius_range", self.zone_radius_range),
            ("zone_wall_margin", self.zone_wall_margin),
            ("zone_containment_margin", self.zone_containment_margin),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("must be non-negative, got {value}"),
                });
            }
        }

        if self.player_radius >= self.arena_radius {
            return Err(TuningError::Invalid {
                field: "player_radius",
                reason: "player does not fit inside the arena".to_string(),
            });
        }
        if !self.entry_start_y.is_finite() {
            return Err(TuningError::Invalid {
                field: "entry_start_y",
                reason: format!("must be finite, got {}", self.entry_start_y),
            });
        }
        if !(self.score_per_ms.is_finite() && self.score_per_ms >= 0.0) {
            return Err(TuningError::Invalid {
                field: "score_per_ms",
                reason: format!("must be non-negative, got {}", self.score_per_ms),
            });
        }
        let widest_zone = self.zone_radius_min + self.zone_radius_range + self.zone_wall_margin;
        if self.arena_radius < widest_zone {
            return Err(TuningError::Invalid {
                field: "arena_radius",
                reason: format!("must fit the largest safe zone plus wall margin ({widest_zone})"),
            });
        }
        if self.zone_radius_min <= self.player_radius + self.zone_containment_margin {
            return Err(TuningError::Invalid {
                field: "zone_radius_min",
                reason: "the player could never fit inside a safe zone".to_string(),
            });
        }
        if self.hazard_spawn_radius >= self.hazard_max_radius {
            return Err(TuningError::Invalid {
                field: "hazard_spawn_radius",
                reason: "must be below hazard_max_radius".to_string(),
            });
        }
        if self.spawn_delay_min_ms > self.spawn_delay_start_ms {
            return Err(TuningError::Invalid {
                field: "spawn_delay_min_ms",
                reason: "must not exceed spawn_delay_start_ms".to_string(),
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "a session needs at least one life".to_string(),
            });
        }
        if self.zone_base_count == 0 {
            return Err(TuningError::Invalid {
                field: "zone_base_count",
                reason: "at least one safe zone is required".to_string(),
            });
        }
        Ok(())
    }
}
