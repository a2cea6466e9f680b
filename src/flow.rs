//! Screen flow
//!
//! Title -> Playing <-> Paused -> GameOver -> Playing (fresh session).
//! Plain state + handlers; the host calls `press` for button edges and
//! `frame` once per rendered frame.

use serde::Serialize;

use crate::input::ArcadeButton;
use crate::sim::{GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Title,
    Playing,
    Paused,
    GameOver { final_score: u64 },
}

/// Session lifecycle around the simulation
#[derive(Debug, Clone)]
pub struct Flow {
    screen: Screen,
    tuning: Tuning,
    next_seed: u64,
    session: Option<GameState>,
    /// Sessions started so far
    runs: u32,
}

impl Flow {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            screen: Screen::Title,
            tuning,
            next_seed: seed,
            session: None,
            runs: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Handle a newly pressed button
    pub fn press(&mut self, button: ArcadeButton) {
        self.screen = match (self.screen, button) {
            (Screen::Title, ArcadeButton::Start1 | ArcadeButton::P1A) => self.start_session(),
            (Screen::GameOver { .. }, ArcadeButton::Start1 | ArcadeButton::P1A) => {
                self.start_session()
            }
            (Screen::Playing, ArcadeButton::P1A) => {
                log::info!("Paused");
                Screen::Paused
            }
            (Screen::Paused, ArcadeButton::P1A) => {
                log::info!("Resumed");
                Screen::Playing
            }
            (screen, _) => screen,
        };
    }

    /// Advance one frame; returns the snapshot while a session is on screen
    pub fn frame(&mut self, delta_ms: f32, intent: &TickInput) -> Option<Snapshot> {
        let paused = self.screen == Screen::Paused;
        let state = self.session.as_mut()?;

        if self.screen == Screen::Playing || paused {
            let input = TickInput {
                paused: paused || intent.paused,
                ..intent.clone()
            };
            tick(state, &input, delta_ms);
        }

        let snapshot = Snapshot::take(state);
        if let Some(final_score) = snapshot.game_over {
            self.screen = Screen::GameOver { final_score };
        }
        Some(snapshot)
    }

    fn start_session(&mut self) -> Screen {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.runs += 1;
        log::info!("Starting run {} with seed {}", self.runs, seed);
        self.session = Some(GameState::with_tuning(seed, self.tuning.clone()));
        Screen::Playing
    }
}
