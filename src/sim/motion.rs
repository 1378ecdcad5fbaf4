//! Player movement: input flags to a snapped direction, then integration
//!
//! Horizontal movement is always one of 8 compass directions relative to
//! the active reference frame (camera yaw in follow mode, world axes in
//! top-down mode). Vertical movement is a simple per-tick jump/gravity
//! integration against the floor.

use std::f32::consts::FRAC_PI_4;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::wrap_angle;

/// Grounded tolerance above the floor contact height
pub const GROUND_EPSILON: f32 = 0.001;
/// Spin added per moving tick (radians, visual only)
const SPIN_PER_TICK: f32 = 0.08;
/// Idle bob amplitude and frequency (visual only)
const BOB_AMPLITUDE: f32 = 0.06;
const BOB_FREQUENCY: f32 = 6.0;

/// Which frame horizontal input is interpreted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Relative to the orbiting follow camera's facing
    #[default]
    Follow,
    /// Relative to fixed world axes (camera looks straight down)
    TopDown,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::TopDown,
            CameraMode::TopDown => CameraMode::Follow,
        }
    }
}

/// Held movement flags for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveInput {
    /// Forward axis: +1 forward, -1 back
    pub fn forward_axis(&self) -> f32 {
        self.forward as i32 as f32 - self.back as i32 as f32
    }

    /// Strafe axis: +1 for the left key, -1 for the right key
    pub fn strafe_axis(&self) -> f32 {
        self.left as i32 as f32 - self.right as i32 as f32
    }
}

/// The player sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec3,
    /// Vertical velocity (units per tick)
    pub vel_y: f32,
    pub radius: f32,
    /// Idle height the bob animation oscillates above
    pub base_y: f32,
    /// Accumulated roll angle (visual)
    pub spin: f32,
    /// Whether the last tick moved horizontally
    pub moving: bool,
}

impl PlayerState {
    /// Fixed start pose
    pub fn at_start(config: &GameConfig) -> Self {
        let pos = config.start_position();
        Self {
            pos,
            vel_y: 0.0,
            radius: config.player_radius,
            base_y: pos.y,
            spin: 0.0,
            moving: false,
        }
    }

    /// Resting on (or within epsilon of) the floor
    pub fn is_grounded(&self, config: &GameConfig) -> bool {
        self.pos.y <= config.player_rest_y() + GROUND_EPSILON
    }

    /// Position to draw at time `t` (seconds): adds the bob while moving
    pub fn render_position(&self, t: f32) -> Vec3 {
        if self.moving {
            let bob = ((t * BOB_FREQUENCY).sin() * BOB_AMPLITUDE).abs();
            Vec3::new(self.pos.x, self.base_y.max(self.pos.y) + bob, self.pos.z)
        } else {
            self.pos
        }
    }
}

/// Horizontal unit direction (or zero) for the given input.
///
/// `camera_forward` is only used in follow mode; its vertical component is
/// ignored and a degenerate vector falls back to -Z.
pub fn movement_direction(input: &MoveInput, mode: CameraMode, camera_forward: Vec3) -> Vec3 {
    let forward = input.forward_axis();
    let strafe = input.strafe_axis();

    match mode {
        CameraMode::Follow => {
            let mut facing = Vec3::new(camera_forward.x, 0.0, camera_forward.z);
            if facing.length_squared() < 1e-6 {
                facing = Vec3::NEG_Z;
            }
            let facing = facing.normalize();
            // up × facing
            let right = Vec3::Y.cross(facing).normalize();
            let raw = facing * forward + right * strafe;
            if raw.length_squared() == 0.0 {
                return Vec3::ZERO;
            }

            let cam_yaw = facing.x.atan2(facing.z);
            let rel = wrap_angle(raw.x.atan2(raw.z) - cam_yaw);
            let angle = cam_yaw + snap_angle(rel);
            Vec3::new(angle.sin(), 0.0, angle.cos())
        }
        CameraMode::TopDown => {
            let raw = Vec3::NEG_Z * forward + Vec3::X * strafe;
            if raw.length_squared() == 0.0 {
                return Vec3::ZERO;
            }
            let angle = snap_angle(raw.z.atan2(raw.x));
            Vec3::new(angle.cos(), 0.0, angle.sin())
        }
    }
}

/// Round an angle to the nearest multiple of 45°
#[inline]
pub fn snap_angle(angle: f32) -> f32 {
    (angle / FRAC_PI_4).round() * FRAC_PI_4
}

/// Keep a position inside the walls on X/Z
pub fn clamp_to_arena(pos: Vec3, config: &GameConfig) -> Vec3 {
    let (min, max) = config.clamp_limits();
    Vec3::new(pos.x.clamp(min, max), pos.y, pos.z.clamp(min, max))
}

/// Produce the candidate next state for one tick
pub fn step_player(
    player: &PlayerState,
    input: &MoveInput,
    direction: Vec3,
    config: &GameConfig,
) -> PlayerState {
    let mut next = *player;

    next.moving = direction.length_squared() > 0.0;
    if next.moving {
        next.pos += direction * config.base_move_speed;
        next.spin += SPIN_PER_TICK;
    }
    next.pos = clamp_to_arena(next.pos, config);

    if input.jump && player.is_grounded(config) {
        next.vel_y = config.jump_strength;
    }
    next.vel_y += config.gravity;
    next.pos.y += next.vel_y;

    let rest_y = config.player_rest_y();
    if next.pos.y < rest_y {
        next.pos.y = rest_y;
        next.base_y = rest_y;
        next.vel_y = 0.0;
    }

    next
}
