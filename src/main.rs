//! Pulse Fields entry point
//!
//! The real game is hosted by a rendering engine that feeds input and draws
//! snapshots. This binary runs a headless autopilot session instead, useful
//! for balance checks:
//!
//! ```text
//! pulse-fields [seed] [fps] [max_seconds] [tuning.json]
//! ```

use std::process::ExitCode;

use pulse_fields::sim::{Snapshot, TickInput};
use pulse_fields::{ArcadeButton, Flow, Screen, Tuning, TuningError};

struct RunArgs {
    seed: u64,
    fps: f32,
    max_seconds: f32,
    tuning_path: Option<String>,
}

impl RunArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let parse_num = |i: usize, name: &str, default: f64| -> Result<f64, String> {
            match args.get(i) {
                Some(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| format!("invalid {name}: {raw}")),
                None => Ok(default),
            }
        };
        let fps = parse_num(1, "fps", 60.0)? as f32;
        if fps.is_nan() || fps <= 0.0 {
            return Err(format!("fps must be positive, got {fps}"));
        }
        let max_seconds = parse_num(2, "max_seconds", 120.0)? as f32;
        if max_seconds.is_nan() || max_seconds <= 0.0 {
            return Err(format!("max_seconds must be positive, got {max_seconds}"));
        }
        Ok(Self {
            seed: match args.first() {
                Some(raw) => raw.parse().map_err(|_| format!("invalid seed: {raw}"))?,
                None => 12345,
            },
            fps,
            max_seconds,
            tuning_path: args.get(3).cloned(),
        })
    }
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, TuningError> {
    match path {
        Some(path) => Tuning::load(path),
        None => Ok(Tuning::default()),
    }
}

fn run(args: &RunArgs) -> Result<Option<Snapshot>, TuningError> {
    let tuning = load_tuning(args.tuning_path.as_deref())?;
    let mut flow = Flow::new(tuning, args.seed);
    flow.press(ArcadeButton::Start1);

    let delta_ms = 1000.0 / args.fps;
    let frames = (args.max_seconds * args.fps).ceil() as u64;
    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut last = None;
    for frame in 0..frames {
        let Some(snapshot) = flow.frame(delta_ms, &autopilot) else {
            break;
        };
        if snapshot.damage_event {
            log::info!(
                "Frame {frame}: hit! lives={} score={}",
                snapshot.lives,
                snapshot.score
            );
        }
        if frame % (args.fps as u64 * 10).max(1) == 0 {
            log::info!(
                "t={:.1}s score={} lives={} hazards={} zones={}",
                snapshot.elapsed_ms / 1000.0,
                snapshot.score,
                snapshot.lives,
                snapshot.hazards.len(),
                snapshot.zones.len()
            );
        }
        last = Some(snapshot);
        if matches!(flow.screen(), Screen::GameOver { .. }) {
            break;
        }
    }

    Ok(last)
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Pulse Fields starting (headless)...");

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match RunArgs::parse(&raw) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            eprintln!("usage: pulse-fields [seed] [fps] [max_seconds] [tuning.json]");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(None) => {
            log::warn!("No frames simulated");
            ExitCode::SUCCESS
        }
        Ok(Some(snapshot)) => {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    log::error!("Failed to serialize snapshot: {e}");
                    return ExitCode::FAILURE;
                }
            }
            log::info!(
                "Finished: score={} lives={} after {:.1}s",
                snapshot.score,
                snapshot.lives,
                snapshot.elapsed_ms / 1000.0
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
