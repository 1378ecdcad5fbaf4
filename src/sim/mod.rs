//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (cells row-major, obstacles by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod motion;
pub mod obstacle;
pub mod path;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{Resolution, Verdict, resolve};
pub use geometry::Aabb;
pub use grid::{GridCell, GridMapper};
pub use motion::{
    CameraMode, MoveInput, PlayerState, clamp_to_arena, movement_direction, step_player,
};
pub use obstacle::{Axis, Obstacle, ObstacleKind, Oscillation};
pub use path::{Path, carve_path, protected_cells};
pub use placement::{LevelState, Placement, generate_level, place_obstacles, select_target};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
