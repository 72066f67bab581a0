#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration for GestureStrike.
//!
//! [`Game`] owns the world and every system and advances them once per
//! [`Game::tick`]. Within a playing frame the order is fixed: confirmed
//! gestures steer and trigger the gun, time advances, combat resolves hits
//! and contact, enemies steer, difficulty is evaluated and finally the
//! spawner runs. Each system sees every event emitted earlier in the frame.

mod audio;

use std::time::Duration;

use gesture_strike_core::{
    AudioCue, BulletView, Command, ConfigError, ConfirmedCommand, CoreSnapshot, EnemyView, Event,
    GameConfig, GameState, GestureLabel, HandObservation, HudSnapshot, IntensityTier,
    ParticleSnapshot, TelemetrySummary, Vec2,
};
use gesture_strike_system_combat::Combat;
use gesture_strike_system_cursor::CursorSmoother;
use gesture_strike_system_difficulty::{DifficultyController, DifficultyTuning};
use gesture_strike_system_enemy_ai::{EnemyAi, Tuning};
use gesture_strike_system_gesture::{GestureEngine, GestureFrame};
use gesture_strike_system_spawning::{Config as SpawnConfig, Spawning};
use gesture_strike_world::{apply, query, World};
use thiserror::Error;
use tracing::{error, info};

use audio::AudioDirector;

/// Errors raised while constructing a session.
#[derive(Debug, Error)]
pub enum GameError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Edge-triggered key presses observed this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keys {
    /// Start key (SPACE) on the title screen.
    pub start: bool,
    /// Restart key (R) on the game-over screen.
    pub restart: bool,
    /// Quit key (ESC), honoured in every state.
    pub quit: bool,
}

/// Everything an adapter gathers before advancing one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    /// Wall-clock time since the previous frame.
    pub dt: Duration,
    /// Hands detected this frame; `None` when no new detection is ready.
    pub hands: Option<Vec<HandObservation>>,
    /// Key presses.
    pub keys: Keys,
}

/// Everything the collaborators need after one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    /// World events emitted during the frame, in order.
    pub events: Vec<Event>,
    /// Sound cues for the audio collaborator.
    pub cues: Vec<AudioCue>,
    /// New music intensity, present only when it changed.
    pub intensity: Option<IntensityTier>,
    /// HUD values after the frame.
    pub hud: HudSnapshot,
}

/// Top-level session driving the state machine and the simulation.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    world: World,
    cursor: CursorSmoother,
    gestures: GestureEngine,
    gesture_frame: GestureFrame,
    combat: Combat,
    enemy_ai: EnemyAi,
    difficulty: DifficultyController,
    spawning: Spawning,
    audio: AudioDirector,
    state: GameState,
    calibration_secs: f32,
    fps: f32,
    should_quit: bool,
    report: Option<TelemetrySummary>,
    confirmed: Vec<ConfirmedCommand>,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Game {
    /// Validates the configuration and creates a session on the title screen.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        info!(
            seed = config.seed,
            two_hand_mode = config.two_hand_mode,
            "session created"
        );
        Ok(Self {
            world: World::new(config.clone()),
            cursor: CursorSmoother::new(&config),
            gestures: GestureEngine::new(&config),
            gesture_frame: GestureFrame::default(),
            combat: Combat::new(),
            enemy_ai: EnemyAi::new(Tuning::from_config(&config)),
            difficulty: DifficultyController::new(DifficultyTuning::from_config(&config)),
            spawning: Spawning::new(SpawnConfig::from_game(&config)),
            audio: AudioDirector::new(config.seed, config.screen_width),
            state: GameState::Menu,
            calibration_secs: 0.0,
            fps: 0.0,
            should_quit: false,
            report: None,
            confirmed: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    /// Advances the session by one frame.
    pub fn tick(&mut self, input: FrameInput) -> FrameOutput {
        let raw_secs = input.dt.as_secs_f32();
        if raw_secs > 0.0 {
            self.fps = 1.0 / raw_secs;
        }
        let dt = input
            .dt
            .min(Duration::from_secs_f32(self.config.max_frame_secs));

        if input.keys.quit && !self.should_quit {
            info!(state = ?self.state, "quit requested");
            self.should_quit = true;
        }
        if let Some(hands) = input.hands {
            self.gesture_frame = self.gestures.update(&hands);
        }

        self.events.clear();
        let mut intensity = None;
        match self.state {
            GameState::Menu => {
                let frame = self.gesture_frame;
                if input.keys.start || (frame.hand_visible() && frame.any_confirmed()) {
                    self.begin_calibration(self.config.calibration_secs);
                }
            }
            GameState::Calibration => {
                self.calibration_secs -= dt.as_secs_f32();
                if self.calibration_secs <= 0.0 {
                    self.transition(GameState::Playing);
                    self.audio.reset();
                    intensity = self.audio.intensity(1, query::difficulty_level(&self.world));
                }
            }
            GameState::Playing => {
                self.play(dt);
                if let Some(tier) = self.audio.intensity(
                    query::wave(&self.world),
                    query::difficulty_level(&self.world),
                ) {
                    intensity = Some(tier);
                }
            }
            GameState::GameOver => {
                if input.keys.restart {
                    self.restart();
                }
            }
        }

        let mut cues = Vec::new();
        self.audio
            .cues(&self.events, query::cursor(&self.world), &mut cues);

        FrameOutput {
            events: self.events.clone(),
            cues,
            intensity,
            hud: self.hud(),
        }
    }

    fn play(&mut self, dt: Duration) {
        self.confirmed.clear();
        self.gesture_frame.push_commands(&mut self.confirmed);
        let mut aim = None;
        self.commands.clear();
        for confirmed in &self.confirmed {
            match *confirmed {
                ConfirmedCommand::Aim(point) => aim = Some(point),
                ConfirmedCommand::Shoot(true) => self.commands.push(Command::FireBullet),
                ConfirmedCommand::Shield(true) => self.commands.push(Command::ActivateShield),
                ConfirmedCommand::Shoot(false) | ConfirmedCommand::Shield(false) => {}
            }
        }
        let mut frame_commands = Vec::with_capacity(self.commands.len() + 2);
        self.cursor.handle(aim, &mut frame_commands);
        frame_commands.append(&mut self.commands);
        frame_commands.push(Command::Tick { dt });
        self.execute(frame_commands);

        let mut commands = Vec::new();
        self.combat.handle(
            GameState::Playing,
            &query::bullet_view(&self.world),
            &query::enemy_view(&self.world),
            query::core(&self.world),
            &mut commands,
        );
        self.execute(commands);

        let mut commands = Vec::new();
        self.enemy_ai.handle(
            &self.events,
            &query::enemy_view(&self.world),
            query::core(&self.world).position,
            query::cursor(&self.world),
            &mut commands,
        );
        self.execute(commands);

        let mut commands = Vec::new();
        self.difficulty
            .handle(&self.events, GameState::Playing, &mut commands);
        self.execute(commands);

        let mut commands = Vec::new();
        self.spawning
            .handle(&self.events, GameState::Playing, &mut commands);
        self.execute(commands);

        if self
            .events
            .iter()
            .any(|event| matches!(event, Event::PlayerDefeated))
        {
            let report = query::telemetry(&self.world).summary();
            info!(
                wave = report.wave,
                score = report.score,
                accuracy_pct = report.accuracy_pct,
                survival_secs = report.survival_secs,
                "core destroyed"
            );
            self.report = Some(report);
            self.transition(GameState::GameOver);
        }
    }

    fn execute(&mut self, commands: Vec<Command>) {
        for command in commands {
            apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Restarts after a defeat, skipping straight to a shorter calibration.
    ///
    /// Only valid on the game-over screen.
    pub fn restart(&mut self) {
        if self.state != GameState::GameOver {
            error!(state = ?self.state, "restart requested outside the game-over screen");
            debug_assert!(false, "restart is only valid from GameOver");
            return;
        }
        self.reset_session();
        self.begin_calibration(self.config.restart_calibration_secs);
    }

    /// Abandons the session and returns to the title screen.
    ///
    /// Bullets, enemies and particles are drained before this returns.
    pub fn return_to_menu(&mut self) {
        self.reset_session();
        self.transition(GameState::Menu);
    }

    fn reset_session(&mut self) {
        let mut events = Vec::new();
        apply(&mut self.world, Command::Reset, &mut events);
        let mut ignored = Vec::new();
        self.difficulty
            .handle(&events, self.state, &mut ignored);
        self.spawning.handle(&events, self.state, &mut ignored);
        self.cursor.reset();
        self.gestures.reset();
        self.gesture_frame = GestureFrame::default();
        self.audio.reset();
        self.report = None;
        self.events.append(&mut events);
    }

    fn begin_calibration(&mut self, secs: f32) {
        self.calibration_secs = secs;
        self.transition(GameState::Calibration);
    }

    fn transition(&mut self, next: GameState) {
        if self.state != next {
            info!(from = ?self.state, to = ?next, "game state changed");
        }
        self.state = next;
    }

    /// Current phase of the state machine.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Reports whether the player asked to quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Seconds of calibration left, zero outside calibration.
    #[must_use]
    pub fn calibration_secs_left(&self) -> f32 {
        if self.state == GameState::Calibration {
            self.calibration_secs.max(0.0)
        } else {
            0.0
        }
    }

    /// Summary frozen at the moment the core was destroyed.
    #[must_use]
    pub fn game_over_report(&self) -> Option<&TelemetrySummary> {
        self.report.as_ref()
    }

    /// Live session summary.
    #[must_use]
    pub fn summary(&self) -> TelemetrySummary {
        query::telemetry(&self.world).summary()
    }

    /// Configuration the session runs with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// HUD values for the current frame.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        query::hud(&self.world, self.state, self.fps)
    }

    /// Smoothed cursor in screen pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        query::cursor(&self.world)
    }

    /// Gesture the reticle should reflect.
    #[must_use]
    pub fn display_gesture(&self) -> GestureLabel {
        self.gesture_frame.display_gesture()
    }

    /// Latest debounced gesture state.
    #[must_use]
    pub const fn gesture_frame(&self) -> GestureFrame {
        self.gesture_frame
    }

    /// Defended core.
    #[must_use]
    pub fn core(&self) -> CoreSnapshot {
        query::core(&self.world)
    }

    /// Gun centre and unit heading.
    #[must_use]
    pub fn gun(&self) -> (Vec2, Vec2) {
        query::gun(&self.world)
    }

    /// Live enemies in id order.
    #[must_use]
    pub fn enemies(&self) -> EnemyView {
        query::enemy_view(&self.world)
    }

    /// Live bullets in id order.
    #[must_use]
    pub fn bullets(&self) -> BulletView {
        query::bullet_view(&self.world)
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> Vec<ParticleSnapshot> {
        query::particles(&self.world)
    }

    /// Title shown on the menu screen.
    #[must_use]
    pub fn title(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }
}
