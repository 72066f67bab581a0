#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless GestureStrike session.

mod log_backend;
mod scripted;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use gesture_strike_core::{GameConfig, GameState, LandmarkSource, TelemetrySummary};
use gesture_strike_game::{FrameInput, Game, Keys};
use gesture_strike_rendering::{CameraShake, Presentation, RenderingBackend};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    log_backend::LogBackend,
    scripted::{Script, ScriptedHands},
};

#[derive(Debug, Parser)]
#[command(
    name = "gesture-strike",
    version,
    about = "Runs a GestureStrike session driven by scripted hands"
)]
struct CliArgs {
    /// TOML file overriding any subset of the game configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for every random draw in the session.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    frames: u32,
    /// Simulated frame rate.
    #[arg(long)]
    fps: Option<u32>,
    /// Pose schedule for the scripted hands.
    #[arg(long, value_enum, default_value_t = Script::Cycle)]
    script: Script,
    /// Drive aiming and actions with a single hand.
    #[arg(long)]
    single_hand: bool,
    /// Log a frame line every N frames (0 logs only screen changes).
    #[arg(long, default_value_t = 60)]
    log_every: u32,
}

/// Digest printed once the session ends.
#[derive(Debug, Serialize)]
struct SessionReport {
    frames: u32,
    final_state: GameState,
    seed: u64,
    summary: TelemetrySummary,
}

/// Entry point for the GestureStrike command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&args)?;
    let report = run(&args, config)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialise session report")?
    );
    Ok(())
}

fn resolve_config(args: &CliArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    match args.fps {
        Some(0) => warn!(
            fallback = config.target_fps,
            "ignoring zero frame rate override"
        ),
        Some(fps) => config.target_fps = fps,
        None => {}
    }
    if args.single_hand {
        config.two_hand_mode = false;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse_config(contents: &str) -> Result<GameConfig> {
    if contents.trim().is_empty() {
        warn!("config file is empty, falling back to defaults");
        return Ok(GameConfig::default());
    }
    toml::from_str(contents).context("failed to parse game config toml contents")
}

fn run(args: &CliArgs, config: GameConfig) -> Result<SessionReport> {
    let seed = config.seed;
    let mut source = ScriptedHands::new(args.script, config.aim_hand, config.two_hand_mode, seed);
    let mut backend = LogBackend::new(args.log_every);
    let mut shake = CameraShake::new(seed);
    let mut game = Game::new(config).context("invalid game configuration")?;
    let dt = Duration::from_secs_f64(1.0 / f64::from(game.config().target_fps));

    info!(frames = args.frames, script = ?args.script, "starting headless session");
    let mut frames = 0;
    while frames < args.frames && !game.should_quit() {
        let output = game.tick(FrameInput {
            dt,
            hands: source.poll(),
            keys: Keys {
                start: frames == 0,
                ..Keys::default()
            },
        });
        frames += 1;

        shake.observe(&output.events);
        shake.update(dt);
        if let Some(intensity) = output.intensity {
            info!(?intensity, "music intensity changed");
        }

        let enemies = game.enemies();
        let bullets = game.bullets();
        let particles = game.particles();
        let presentation =
            Presentation::new(game.title(), output.hud, game.cursor(), game.display_gesture())
                .with_shake(shake.offset())
                .with_core(game.core().position, game.gun())
                .with_enemies(enemies.iter())
                .with_bullets(bullets.iter())
                .with_particles(particles.iter());
        backend.present(&presentation)?;

        if game.state() == GameState::GameOver {
            break;
        }
    }

    let summary = game
        .game_over_report()
        .cloned()
        .unwrap_or_else(|| game.summary());
    info!(
        frames,
        score = summary.score,
        wave = summary.wave,
        "session finished"
    );
    Ok(SessionReport {
        frames,
        final_state: game.state(),
        seed,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("gesture-strike").chain(extra.iter().copied()))
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = parse_config("seed = 9\nmax_ammo = 20\n").expect("valid toml");
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_ammo, 20);
        assert_eq!(config.max_health, GameConfig::default().max_health);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("lives = 3\n").is_err());
    }

    #[test]
    fn flags_override_the_config() {
        let config = resolve_config(&args(&["--seed", "11", "--fps", "30", "--single-hand"]))
            .expect("defaults resolve");
        assert_eq!(config.seed, 11);
        assert_eq!(config.target_fps, 30);
        assert!(!config.two_hand_mode);
    }

    #[test]
    fn zero_fps_falls_back_to_the_config() {
        let config = resolve_config(&args(&["--fps", "0"])).expect("defaults resolve");
        assert_eq!(config.target_fps, GameConfig::default().target_fps);
    }

    #[test]
    fn scripted_sessions_are_reproducible() {
        let cli = args(&["--frames", "900", "--seed", "5", "--log-every", "0"]);
        let first = run(&cli, resolve_config(&cli).expect("config")).expect("session runs");
        let second = run(&cli, resolve_config(&cli).expect("config")).expect("session runs");

        assert_eq!(first.summary, second.summary);
        assert_eq!(first.frames, second.frames);
        assert!(first.summary.total_shots > 0);
    }

    #[test]
    fn invalid_config_is_reported() {
        let cli = args(&[]);
        let config = GameConfig {
            confirmation_frames: 0,
            ..GameConfig::default()
        };
        assert!(run(&cli, config).is_err());
    }

    #[test]
    fn zero_frame_rate_in_the_config_file_is_reported() {
        let cli = args(&[]);
        let config = parse_config("target_fps = 0\n").expect("valid toml");
        let error = run(&cli, config).expect_err("zero frame rate must be rejected");
        assert!(
            format!("{error:#}").contains("target_fps"),
            "unexpected error: {error:#}"
        );
    }
}
