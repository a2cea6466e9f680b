//! Arcade control mapping
//!
//! Physical keys map to arcade cabinet buttons through a static table that is
//! expanded into a lookup map once at startup. `InputState` tracks what is
//! held and which buttons were newly pressed since the last frame.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Cabinet buttons (player 1 + start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcadeButton {
    P1U,
    P1D,
    P1L,
    P1R,
    P1A,
    P1B,
    P1C,
    P1X,
    P1Y,
    P1Z,
    Start1,
}

/// Default cabinet wiring
pub const ARCADE_CONTROLS: &[(ArcadeButton, &[&str])] = &[
    (ArcadeButton::P1U, &["w", "ArrowUp"]),
    (ArcadeButton::P1D, &["s", "ArrowDown"]),
    (ArcadeButton::P1L, &["a", "ArrowLeft"]),
    (ArcadeButton::P1R, &["d", "ArrowRight"]),
    (ArcadeButton::P1A, &["u"]),
    (ArcadeButton::P1B, &["i"]),
    (ArcadeButton::P1C, &["o"]),
    (ArcadeButton::P1X, &["j"]),
    (ArcadeButton::P1Y, &["k"]),
    (ArcadeButton::P1Z, &["l"]),
    (ArcadeButton::Start1, &["1", "Enter"]),
];

/// Key name -> button lookup
#[derive(Debug, Clone)]
pub struct KeyMap {
    keys: HashMap<String, ArcadeButton>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_table(ARCADE_CONTROLS)
    }
}

impl KeyMap {
    pub fn from_table(table: &[(ArcadeButton, &[&str])]) -> Self {
        let keys = table
            .iter()
            .flat_map(|(button, keys)| keys.iter().map(move |k| (k.to_string(), *button)))
            .collect();
        Self { keys }
    }

    /// Resolve a key; single letters match either case
    pub fn lookup(&self, key: &str) -> Option<ArcadeButton> {
        self.keys.get(key).copied().or_else(|| {
            if key.chars().count() == 1 {
                self.keys.get(&key.to_lowercase()).copied()
            } else {
                None
            }
        })
    }
}

/// Held buttons plus newly pressed ones
#[derive(Debug, Clone, Default)]
pub struct InputState {
    map: KeyMap,
    held: HashSet<ArcadeButton>,
    pressed: Vec<ArcadeButton>,
}

impl InputState {
    pub fn new(map: KeyMap) -> Self {
        Self {
            map,
            held: HashSet::new(),
            pressed: Vec::new(),
        }
    }

    /// Key went down; auto-repeat of a held key is not a new press
    pub fn key_down(&mut self, key: &str) -> Option<ArcadeButton> {
        let button = self.map.lookup(key)?;
        self.button_down(button);
        Some(button)
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(button) = self.map.lookup(key) {
            self.button_up(button);
        }
    }

    pub fn button_down(&mut self, button: ArcadeButton) {
        if self.held.insert(button) {
            self.pressed.push(button);
        }
    }

    pub fn button_up(&mut self, button: ArcadeButton) {
        self.held.remove(&button);
    }

    pub fn is_held(&self, button: ArcadeButton) -> bool {
        self.held.contains(&button)
    }

    /// Buttons pressed since the last call
    pub fn take_pressed(&mut self) -> Vec<ArcadeButton> {
        std::mem::take(&mut self.pressed)
    }

    /// Directional intent for this frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.is_held(ArcadeButton::P1U),
            down: self.is_held(ArcadeButton::P1D),
            left: self.is_held(ArcadeButton::P1L),
            right: self.is_held(ArcadeButton::P1R),
            ..Default::default()
        }
    }
}
