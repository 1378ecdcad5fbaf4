//! Level generation: target selection, route carving, obstacle placement
//!
//! Obstacles are rejection-sampled per free cell against everything placed
//! so far plus the start zone and the target cube. A cell that runs out of
//! attempts simply stays empty.

use std::collections::HashSet;
use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::grid::{GridCell, GridMapper};
use super::obstacle::{Axis, Obstacle, ObstacleKind, Oscillation};
use super::path::{Path, carve_path, protected_cells};
use crate::config::GameConfig;

/// Minimum Manhattan distance between start and target cells
pub const MIN_TARGET_DISTANCE: i32 = 3;
/// Obstacle height range
pub const OBSTACLE_HEIGHT_RANGE: (f32, f32) = (2.0, 6.0);
/// Gap kept between an obstacle and its cell edge when jittering
const CELL_EDGE_GAP: f32 = 0.1;
/// Gap kept between an obstacle and the arena walls
const WALL_SAFETY_MARGIN: f32 = 0.2;
/// Oscillation amplitude lower bound and cap
const MIN_AMPLITUDE: f32 = 1.5;
const MAX_AMPLITUDE: f32 = 6.0;
/// Oscillation angular speed range (radians per second)
const OSCILLATION_SPEED_RANGE: (f32, f32) = (0.008, 0.03);

/// Output of one obstacle placement pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub obstacles: Vec<Obstacle>,
    pub target_volume: Aabb,
    pub start_zone: Aabb,
    pub protected: HashSet<GridCell>,
}

/// Everything one generation pass produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    pub mapper: GridMapper,
    pub start_cell: GridCell,
    pub target_cell: GridCell,
    pub path: Path,
    pub protected: HashSet<GridCell>,
    pub obstacles: Vec<Obstacle>,
    pub target_volume: Aabb,
    pub start_zone: Aabb,
}

impl LevelState {
    pub fn moving_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.is_oscillating()).count()
    }
}

/// Generate a complete level from scratch
pub fn generate_level<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> LevelState {
    let mapper = GridMapper::from_config(config);
    let start_world = config.start_position();
    let start_cell = mapper.world_to_grid(start_world.x, start_world.z);
    let target_cell = select_target(rng, &mapper, start_cell);

    let path = carve_path(rng, &mapper, start_cell, target_cell);
    let placement = place_obstacles(rng, config, &mapper, &path, start_cell, target_cell);

    let level = LevelState {
        mapper,
        start_cell,
        target_cell,
        path,
        protected: placement.protected,
        obstacles: placement.obstacles,
        target_volume: placement.target_volume,
        start_zone: placement.start_zone,
    };
    log::info!(
        "Level generated: start {:?}, target {:?}, path {} cells, {} protected, {} obstacles ({} moving)",
        level.start_cell,
        level.target_cell,
        level.path.len(),
        level.protected.len(),
        level.obstacles.len(),
        level.moving_count()
    );
    level
}

/// Pick a target cell at least `MIN_TARGET_DISTANCE` (Manhattan) from the
/// start, uniformly among qualifying cells. Falls back to the farthest cell
/// when the grid is too small to have any.
pub fn select_target<R: Rng + ?Sized>(rng: &mut R, mapper: &GridMapper, start: GridCell) -> GridCell {
    let eligible: Vec<GridCell> = mapper
        .cells()
        .filter(|c| c.manhattan(start) >= MIN_TARGET_DISTANCE)
        .collect();
    if eligible.is_empty() {
        let farthest = mapper
            .cells()
            .max_by_key(|c| c.manhattan(start))
            .unwrap_or(start);
        log::warn!(
            "No cell {} steps from {:?}; using farthest {:?}",
            MIN_TARGET_DISTANCE,
            start,
            farthest
        );
        return farthest;
    }
    eligible[rng.random_range(0..eligible.len())]
}

/// Target cube resting on the floor at a cell's center
pub fn target_volume(config: &GameConfig, mapper: &GridMapper, cell: GridCell) -> Aabb {
    let (x, z) = mapper.grid_to_world(cell);
    let center = Vec3::new(x, config.ground_y() + config.target_size / 2.0, z);
    Aabb::from_center_size(center, Vec3::splat(config.target_size))
}

/// Generously sized keep-out box around the player's start pose
pub fn start_zone(config: &GameConfig) -> Aabb {
    let start = config.start_position();
    let height = config.player_height();
    let center = Vec3::new(start.x, config.ground_y() + height / 2.0, start.z);
    let size = Vec3::new(config.player_radius * 4.0, height * 2.0, config.player_radius * 4.0);
    Aabb::from_center_size(center, size)
}

/// Fill non-protected cells with randomly sized, non-overlapping boxes
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    mapper: &GridMapper,
    path: &Path,
    start: GridCell,
    target: GridCell,
) -> Placement {
    let protected = protected_cells(mapper, path, start, target);
    let target_volume = target_volume(config, mapper, target);
    let start_zone = start_zone(config);

    let mut obstacles: Vec<Obstacle> = Vec::new();
    let mut next_id = 1;

    for cell in mapper.cells() {
        if protected.contains(&cell) {
            continue;
        }
        if !rng.random_bool(config.obstacle_fill_prob as f64) {
            continue;
        }

        let mut placed = false;
        for _ in 0..config.obstacle_attempts_per_cell {
            let Some(candidate) = sample_obstacle(rng, config, mapper, cell, next_id) else {
                continue;
            };
            let bounds = candidate.placed_bounds();
            let blocked = bounds.intersects(&start_zone)
                || bounds.intersects(&target_volume)
                || obstacles.iter().any(|o| o.placed_bounds().intersects(&bounds));
            if blocked {
                continue;
            }

            let kind = if rng.random_bool(config.moving_obstacle_ratio as f64) {
                ObstacleKind::Oscillating(sample_oscillation(rng, mapper.cell_size))
            } else {
                ObstacleKind::Static
            };
            obstacles.push(Obstacle { kind, ..candidate });
            next_id += 1;
            placed = true;
            break;
        }

        if !placed {
            log::debug!(
                "Cell {:?} left empty after {} attempts",
                cell,
                config.obstacle_attempts_per_cell
            );
        }
    }

    Placement {
        obstacles,
        target_volume,
        start_zone,
        protected,
    }
}

/// Sample one box jittered inside `cell`, or `None` if it would reach the walls
fn sample_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    mapper: &GridMapper,
    cell: GridCell,
    id: u32,
) -> Option<Obstacle> {
    let size_range = config.min_obstacle_size..=config.max_obstacle_size;
    let width = rng.random_range(size_range.clone());
    let depth = rng.random_range(size_range);
    let height = rng.random_range(OBSTACLE_HEIGHT_RANGE.0..=OBSTACLE_HEIGHT_RANGE.1);

    let max_offset = ((mapper.cell_size - width.max(depth)) / 2.0 - CELL_EDGE_GAP).max(0.0);
    let mut jitter = || {
        if max_offset > 0.0 {
            rng.random_range(-max_offset..=max_offset)
        } else {
            0.0
        }
    };
    let (offset_x, offset_z) = (jitter(), jitter());

    let (cx, cz) = mapper.grid_to_world(cell);
    let center = Vec3::new(cx + offset_x, config.floor_y() + height / 2.0, cz + offset_z);

    let limit = config.half() - WALL_SAFETY_MARGIN;
    if center.x.abs() + width / 2.0 > limit || center.z.abs() + depth / 2.0 > limit {
        return None;
    }

    Some(Obstacle::new(
        id,
        center,
        Vec3::new(width, height, depth),
        ObstacleKind::Static,
    ))
}

fn sample_oscillation<R: Rng + ?Sized>(rng: &mut R, cell_size: f32) -> Oscillation {
    let axis = if rng.random_bool(0.5) { Axis::X } else { Axis::Z };
    let max_amplitude = (cell_size * 1.5).min(MAX_AMPLITUDE).max(MIN_AMPLITUDE);
    Oscillation {
        axis,
        amplitude: rng.random_range(MIN_AMPLITUDE..=max_amplitude),
        speed: rng.random_range(OSCILLATION_SPEED_RANGE.0..=OSCILLATION_SPEED_RANGE.1),
        phase: rng.random::<f32>() * TAU,
    }
}
