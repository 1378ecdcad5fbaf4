//! Game state and phase transitions
//!
//! The whole run is reproducible from its seed: each level is generated
//! from a PCG stream keyed by the run seed and the restart counter.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Verdict;
use super::motion::{CameraMode, PlayerState};
use super::placement::{LevelState, generate_level};
use crate::config::GameConfig;
use crate::consts::SIM_DT;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player can move
    #[default]
    Playing,
    /// Target reached; frozen until restart
    Won,
    /// Obstacle touched; frozen until restart
    Lost,
}

impl GamePhase {
    /// Won or Lost
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Notifications for the frontend (HUD, audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Won,
    Lost { obstacle_id: u32 },
    Restarted { generation: u32 },
    CameraModeChanged(CameraMode),
}

/// Seed for the level of a given generation
pub fn level_seed(run_seed: u64, generation: u32) -> u64 {
    (generation as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(run_seed)
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Number of restarts so far
    pub generation: u32,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Simulation tick counter (drives obstacle oscillation)
    pub time_ticks: u64,
    pub camera_mode: CameraMode,
    pub player: PlayerState,
    pub level: LevelState,
    /// Pending notifications (not part of the snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New game with the default configuration
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    /// New game with a seed drawn from system entropy
    pub fn from_entropy(config: GameConfig) -> Self {
        Self::with_config(rand::random(), config)
    }

    pub fn with_config(seed: u64, config: GameConfig) -> Self {
        log::info!("New game: seed {}", seed);
        let level = Self::build_level(seed, 0, &config);
        Self {
            seed,
            generation: 0,
            player: PlayerState::at_start(&config),
            config,
            phase: GamePhase::Playing,
            time_ticks: 0,
            camera_mode: CameraMode::default(),
            level,
            events: Vec::new(),
        }
    }

    fn build_level(seed: u64, generation: u32, config: &GameConfig) -> LevelState {
        let mut rng = Pcg32::seed_from_u64(level_seed(seed, generation));
        generate_level(&mut rng, config)
    }

    /// Elapsed simulation time in seconds
    #[inline]
    pub fn time_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Discard the current level and start over on a fresh one
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.level = Self::build_level(self.seed, self.generation, &self.config);
        self.player = PlayerState::at_start(&self.config);
        self.phase = GamePhase::Playing;
        log::info!("Restarted: generation {}", self.generation);
        self.events.push(GameEvent::Restarted {
            generation: self.generation,
        });
    }

    pub fn toggle_camera_mode(&mut self) {
        self.camera_mode = self.camera_mode.toggled();
        log::info!("Camera mode: {:?}", self.camera_mode);
        self.events.push(GameEvent::CameraModeChanged(self.camera_mode));
    }

    /// Apply a collision verdict. Only Playing can transition.
    pub fn apply_verdict(&mut self, verdict: Verdict) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match verdict {
            Verdict::Clear => {}
            Verdict::Collided { obstacle_id } => {
                self.phase = GamePhase::Lost;
                log::info!("Lost: hit obstacle {} at tick {}", obstacle_id, self.time_ticks);
                self.events.push(GameEvent::Lost { obstacle_id });
            }
            Verdict::ReachedTarget => {
                self.phase = GamePhase::Won;
                log::info!("Won at tick {}", self.time_ticks);
                self.events.push(GameEvent::Won);
            }
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// JSON snapshot of the state (events excluded)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
