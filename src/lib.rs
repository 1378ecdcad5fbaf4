//! Cube Maze - roll a sphere to a small target cube inside a closed cubic room
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, motion, collisions, game state)
//! - `config`: Tuning constants, JSON loading and validation
//! - `camera`: Follow / top-down camera rig feeding camera-relative movement
//! - `controls`: Key bindings to per-tick input
//! - `hud`: Status and camera-mode strings

pub mod camera;
pub mod config;
pub mod controls;
pub mod hud;
pub mod sim;

pub use camera::{CameraPose, CameraRig};
pub use config::{ConfigError, GameConfig};
pub use controls::KeyBindings;
pub use hud::HudStatus;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (movement constants are per tick at this rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions
    pub const CUBE_SIZE: f32 = 60.0;
    /// Cells per side of the generation lattice
    pub const GRID_SIZE: i32 = 12;

    /// Obstacle generation
    pub const OBSTACLE_FILL_PROB: f32 = 0.50;
    pub const OBSTACLE_ATTEMPTS_PER_CELL: u32 = 3;
    pub const MIN_OBSTACLE_SIZE: f32 = 2.0;
    pub const MAX_OBSTACLE_SIZE: f32 = 5.0;
    pub const MOVING_OBSTACLE_RATIO: f32 = 0.18;

    /// Player movement (units per tick)
    pub const BASE_MOVE_SPEED: f32 = 0.16;
    pub const JUMP_STRENGTH: f32 = 0.36;
    pub const GRAVITY: f32 = -0.03;

    /// Player sphere
    pub const PLAYER_RADIUS: f32 = 0.6;
    /// Target cube edge length
    pub const TARGET_SIZE: f32 = 1.2;
}

/// Wrap an angle to [-π, π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0)).abs() < 1e-6);
        // Odd multiples of π land on the seam
        assert!((wrap_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI / 2.0 - 2.0 * PI) - (-PI / 2.0)).abs() < 1e-5);
        assert!(wrap_angle(PI) < PI);
    }
}
