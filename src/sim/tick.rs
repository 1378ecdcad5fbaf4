//! Fixed timestep simulation tick
//!
//! One strict per-frame sequence: events, clock, motion, collision,
//! phase transition.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::resolve;
use super::motion::{MoveInput, movement_direction, step_player};
use super::state::GameState;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement flags
    pub movement: MoveInput,
    /// Camera's current facing, used in follow mode
    pub camera_forward: Vec3,
    /// Regenerate the level and reset the player (one-shot)
    pub restart: bool,
    /// Switch follow / top-down camera (one-shot)
    pub toggle_camera: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.toggle_camera {
        state.toggle_camera_mode();
    }
    if input.restart {
        state.restart();
        return;
    }

    // Obstacles keep sliding in every phase
    state.time_ticks += 1;

    if state.phase.is_over() {
        return;
    }

    let prev = state.player;
    let direction = movement_direction(&input.movement, state.camera_mode, input.camera_forward);
    let candidate = step_player(&prev, &input.movement, direction, &state.config);

    let resolution = resolve(
        &prev,
        candidate,
        &state.level.obstacles,
        state.time_secs(),
        &state.level.target_volume,
    );
    state.player = resolution.player;
    state.apply_verdict(resolution.verdict);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::geometry::Aabb;
    use crate::sim::motion::CameraMode;
    use crate::sim::obstacle::{Obstacle, ObstacleKind};
    use crate::sim::state::{GameEvent, GamePhase};

    /// Empty arena, target parked far away
    fn open_arena(seed: u64) -> GameState {
        let config = GameConfig {
            obstacle_fill_prob: 0.0,
            ..GameConfig::default()
        };
        let mut state = GameState::with_config(seed, config);
        state.level.target_volume = Aabb::from_center_size(Vec3::new(-25.0, -29.0, -25.0), Vec3::ONE);
        state
    }

    fn forward() -> TickInput {
        TickInput {
            movement: MoveInput {
                forward: true,
                ..Default::default()
            },
            camera_forward: Vec3::NEG_Z,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_tick_keeps_player_still() {
        let mut state = open_arena(1);
        let start = state.player.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, start);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_forward_moves_along_camera() {
        let mut state = open_arena(1);
        let start = state.player.pos;
        tick(&mut state, &forward());
        assert!((state.player.pos.z - (start.z - state.config.base_move_speed)).abs() < 1e-5);
        assert!((state.player.pos.x - start.x).abs() < 1e-5);
    }

    #[test]
    fn test_walking_into_target_wins() {
        let mut state = open_arena(2);
        let p = state.player.pos;
        state.level.target_volume = Aabb::from_center_size(
            Vec3::new(p.x, state.config.ground_y() + 0.6, p.z - 3.0),
            Vec3::splat(1.2),
        );
        for _ in 0..40 {
            tick(&mut state, &forward());
        }
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.drain_events(), vec![GameEvent::Won]);
    }

    #[test]
    fn test_walking_into_obstacle_loses_and_freezes() {
        let mut state = open_arena(3);
        let p = state.player.pos;
        state.level.obstacles.push(Obstacle::new(
            42,
            Vec3::new(p.x, state.config.floor_y() + 1.0, p.z - 4.0),
            Vec3::splat(2.0),
            ObstacleKind::Static,
        ));

        let mut last_pos = p;
        while state.phase == GamePhase::Playing && state.time_ticks < 100 {
            last_pos = state.player.pos;
            tick(&mut state, &forward());
        }
        assert_eq!(state.phase, GamePhase::Lost);
        // Rolled back to the last accepted position
        assert_eq!(state.player.pos, last_pos);
        assert_eq!(state.player.vel_y, 0.0);

        // No motion while lost, but the clock runs
        let ticks = state.time_ticks;
        tick(&mut state, &forward());
        assert_eq!(state.player.pos, last_pos);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_restart_input_resets() {
        let mut state = GameState::new(77);
        state.phase = GamePhase::Lost;
        state.player.pos.x = 12.0;
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.generation, 1);
        assert_eq!(state.player.pos, state.config.start_position());
    }

    #[test]
    fn test_restart_and_toggle_same_tick() {
        let mut state = GameState::new(5);
        let input = TickInput {
            restart: true,
            toggle_camera: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.camera_mode, CameraMode::TopDown);
        assert_eq!(state.generation, 1);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::CameraModeChanged(CameraMode::TopDown),
                GameEvent::Restarted { generation: 1 },
            ]
        );
    }

    #[test]
    fn test_toggle_camera_input() {
        let mut state = open_arena(4);
        let input = TickInput {
            toggle_camera: true,
            movement: MoveInput {
                left: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let start = state.player.pos;
        tick(&mut state, &input);
        assert_eq!(state.camera_mode, CameraMode::TopDown);
        // Top-down: the left key maps to +X
        assert!(state.player.pos.x > start.x);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            forward(),
            TickInput {
                movement: MoveInput {
                    left: true,
                    jump: true,
                    ..Default::default()
                },
                camera_forward: Vec3::new(0.3, -0.2, -1.0),
                ..Default::default()
            },
            TickInput::default(),
            forward(),
        ];

        for input in &inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.phase, state2.phase);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn player_stays_inside_arena(
                seed in any::<u64>(),
                moves in proptest::collection::vec((0u8..32, -3.2f32..3.2), 10..120),
            ) {
                let mut state = GameState::new(seed);
                let (min, max) = state.config.clamp_limits();
                for (mask, yaw) in moves {
                    let input = TickInput {
                        movement: MoveInput {
                            forward: mask & 1 != 0,
                            back: mask & 2 != 0,
                            left: mask & 4 != 0,
                            right: mask & 8 != 0,
                            jump: mask & 16 != 0,
                        },
                        camera_forward: Vec3::new(yaw.sin(), 0.0, yaw.cos()),
                        ..Default::default()
                    };
                    tick(&mut state, &input);
                    let p = state.player.pos;
                    prop_assert!(p.x >= min && p.x <= max);
                    prop_assert!(p.z >= min && p.z <= max);
                    prop_assert!(p.y >= state.config.player_rest_y());
                }
            }
        }
    }
}
