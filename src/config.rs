//! Game tuning configuration
//!
//! Fixed for the lifetime of a run. Loaded from JSON when a frontend wants
//! to override the shipped defaults; any missing field keeps its default.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Height of the rendered floor plane above the room's bottom face
pub const FLOOR_SKIN: f32 = 0.01;
/// Wall margin reserved on each side of the generation grid
pub const GRID_MARGIN: f32 = 1.0;
/// Distance the player is kept from the walls on X/Z
pub const WALL_CLAMP_MARGIN: f32 = 0.5;
/// Start position distance from the +Z wall
pub const START_WALL_OFFSET: f32 = 3.0;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Tuning constants for level generation and player physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the cubic room (centered at the origin)
    pub cube_size: f32,
    /// Cells per side of the generation lattice
    pub grid_size: i32,
    /// Chance that a free cell receives an obstacle attempt
    pub obstacle_fill_prob: f32,
    /// Placement tries per cell before giving up
    pub obstacle_attempts_per_cell: u32,
    pub min_obstacle_size: f32,
    pub max_obstacle_size: f32,
    /// Fraction of placed obstacles that oscillate
    pub moving_obstacle_ratio: f32,

    // === Player physics (per tick) ===
    pub base_move_speed: f32,
    pub jump_strength: f32,
    pub gravity: f32,
    pub player_radius: f32,

    /// Target cube edge length
    pub target_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cube_size: CUBE_SIZE,
            grid_size: GRID_SIZE,
            obstacle_fill_prob: OBSTACLE_FILL_PROB,
            obstacle_attempts_per_cell: OBSTACLE_ATTEMPTS_PER_CELL,
            min_obstacle_size: MIN_OBSTACLE_SIZE,
            max_obstacle_size: MAX_OBSTACLE_SIZE,
            moving_obstacle_ratio: MOVING_OBSTACLE_RATIO,
            base_move_speed: BASE_MOVE_SPEED,
            jump_strength: JUMP_STRENGTH,
            gravity: GRAVITY,
            player_radius: PLAYER_RADIUS,
            target_size: TARGET_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: cube={} grid={} fill={}",
            config.cube_size,
            config.grid_size,
            config.obstacle_fill_prob
        );
        Ok(config)
    }

    /// Check the invariants the generators rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cube_size > 2.0 * GRID_MARGIN) {
            return Err(invalid(
                "cube_size",
                format!("must exceed {} (wall margins)", 2.0 * GRID_MARGIN),
            ));
        }
        if self.grid_size < 1 {
            return Err(invalid("grid_size", "must be at least 1"));
        }
        for (field, p) in [
            ("obstacle_fill_prob", self.obstacle_fill_prob),
            ("moving_obstacle_ratio", self.moving_obstacle_ratio),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("{p} is not a probability")));
            }
        }
        if self.obstacle_attempts_per_cell == 0 {
            return Err(invalid("obstacle_attempts_per_cell", "must be at least 1"));
        }
        if !(self.min_obstacle_size > 0.0) {
            return Err(invalid("min_obstacle_size", "must be positive"));
        }
        if self.min_obstacle_size > self.max_obstacle_size {
            return Err(invalid(
                "max_obstacle_size",
                format!(
                    "{} is smaller than min_obstacle_size {}",
                    self.max_obstacle_size, self.min_obstacle_size
                ),
            ));
        }
        if !(self.player_radius > 0.0) {
            return Err(invalid("player_radius", "must be positive"));
        }
        if !(self.target_size > 0.0) {
            return Err(invalid("target_size", "must be positive"));
        }
        Ok(())
    }

    /// Half the room edge
    #[inline]
    pub fn half(&self) -> f32 {
        self.cube_size / 2.0
    }

    /// Bottom face of the room
    #[inline]
    pub fn floor_y(&self) -> f32 {
        -self.half()
    }

    /// Rendered floor plane height
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.floor_y() + FLOOR_SKIN
    }

    /// Height of the player's center when resting on the floor
    #[inline]
    pub fn player_rest_y(&self) -> f32 {
        self.ground_y() + self.player_radius
    }

    #[inline]
    pub fn player_height(&self) -> f32 {
        self.player_radius * 2.0
    }

    /// Fixed start pose of the player sphere
    pub fn start_position(&self) -> Vec3 {
        Vec3::new(0.0, self.player_rest_y(), self.half() - START_WALL_OFFSET)
    }

    /// Player X/Z limits: (min, max)
    #[inline]
    pub fn clamp_limits(&self) -> (f32, f32) {
        let limit = self.half() - WALL_CLAMP_MARGIN;
        (-limit, limit)
    }
}
