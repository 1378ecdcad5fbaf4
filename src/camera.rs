//! Camera rig: orbiting follow camera and top-down view
//!
//! Pure math; the renderer only reads the resulting pose. The rig's
//! horizontal facing drives camera-relative movement in follow mode.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::CameraMode;
use crate::wrap_angle;

/// Radians per pixel of pointer movement
pub const MOUSE_SENSITIVITY: f32 = 0.0026;
/// Distance change per wheel delta unit
pub const ZOOM_RATE: f32 = 0.02;
pub const MIN_DISTANCE: f32 = 4.0;
pub const MAX_DISTANCE: f32 = 40.0;
/// Pitch stays this far from straight up/down
const PITCH_LIMIT_MARGIN: f32 = 0.12;
/// Fraction of the remaining gap closed per frame
const SMOOTHING: f32 = 0.12;
/// Eye keeps this far from the walls
const WALL_PADDING: f32 = 0.45;
/// Additional clearance above the floor
const FLOOR_CLEARANCE: f32 = 0.2;
/// Follow mode: eye lift and look-at lift above the player
const FOLLOW_EYE_LIFT: f32 = 0.6;
const FOLLOW_LOOK_LIFT: f32 = 0.8;
/// Top-down eye height as a fraction of the room size
const TOP_DOWN_HEIGHT: f32 = 0.6;
/// Tiny Z nudge so the top-down view has a defined up direction
const TOP_DOWN_NUDGE: f32 = 0.1;

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
}

/// Orbit camera state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pose: CameraPose,
}

impl CameraRig {
    /// Start slightly behind and above the player
    pub fn new(player_pos: Vec3) -> Self {
        Self {
            yaw: PI,
            pitch: 0.28,
            distance: 10.0,
            pose: CameraPose {
                eye: player_pos + Vec3::new(0.0, 3.0, 8.0),
                look_at: player_pos,
            },
        }
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Apply pointer movement (pixels)
    pub fn look(&mut self, dx: f32, dy: f32) {
        let limit = FRAC_PI_2 - PITCH_LIMIT_MARGIN;
        self.yaw = wrap_angle(self.yaw - dx * MOUSE_SENSITIVITY);
        self.pitch = (self.pitch - dy * MOUSE_SENSITIVITY).clamp(-limit, limit);
    }

    /// Apply a wheel delta
    pub fn zoom(&mut self, delta_y: f32) {
        self.distance = (self.distance + delta_y * ZOOM_RATE).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Eye position the rig is heading toward, kept inside the room
    pub fn desired_eye(&self, mode: CameraMode, player_pos: Vec3, cube_size: f32) -> Vec3 {
        let eye = match mode {
            CameraMode::Follow => {
                let offset = Vec3::new(
                    self.distance * self.pitch.cos() * self.yaw.sin(),
                    self.distance * self.pitch.sin() + FOLLOW_EYE_LIFT,
                    self.distance * self.pitch.cos() * self.yaw.cos(),
                );
                player_pos + offset
            }
            CameraMode::TopDown => {
                player_pos + Vec3::new(0.0, cube_size * TOP_DOWN_HEIGHT, TOP_DOWN_NUDGE)
            }
        };
        clamp_to_room(eye, cube_size)
    }

    /// Ease toward the desired eye and aim at the player
    pub fn update(&mut self, mode: CameraMode, player_pos: Vec3, cube_size: f32) -> CameraPose {
        let desired = self.desired_eye(mode, player_pos, cube_size);
        self.pose.eye = self.pose.eye.lerp(desired, SMOOTHING);
        self.pose.look_at = match mode {
            CameraMode::Follow => player_pos + Vec3::Y * FOLLOW_LOOK_LIFT,
            CameraMode::TopDown => player_pos,
        };
        self.pose
    }

    /// Horizontal unit facing (eye toward look-at); -Z when looking straight down
    pub fn forward(&self) -> Vec3 {
        let dir = self.pose.look_at - self.pose.eye;
        let flat = Vec3::new(dir.x, 0.0, dir.z);
        if flat.length_squared() < 1e-6 {
            Vec3::NEG_Z
        } else {
            flat.normalize()
        }
    }
}

/// Keep a camera position inside the room walls
pub fn clamp_to_room(pos: Vec3, cube_size: f32) -> Vec3 {
    let half = cube_size / 2.0;
    let lo = -half + WALL_PADDING;
    let hi = half - WALL_PADDING;
    Vec3::new(
        pos.x.clamp(lo, hi),
        pos.y.clamp(lo + FLOOR_CLEARANCE, hi),
        pos.z.clamp(lo, hi),
    )
}
