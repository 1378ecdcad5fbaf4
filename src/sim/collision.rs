//! Player sphere vs. obstacle boxes and the target cube
//!
//! Collision is lethal: the first touch of any obstacle rolls the move back
//! and ends the attempt. Obstacle boxes are re-derived from the obstacle
//! parameters and the current time on every call.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::motion::PlayerState;
use super::obstacle::Obstacle;

/// Shrink factor for the collision sphere, eases false hits on box edges
pub const COLLISION_RADIUS_SCALE: f32 = 0.95;

/// Outcome of validating one candidate move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Move accepted, nothing touched
    Clear,
    /// Move rejected: hit the obstacle with this id
    Collided { obstacle_id: u32 },
    /// Move accepted and the target was touched
    ReachedTarget,
}

/// Resolved player state plus what happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub player: PlayerState,
    pub verdict: Verdict,
}

impl Resolution {
    /// Whether the candidate position was kept
    pub fn accepted(&self) -> bool {
        !matches!(self.verdict, Verdict::Collided { .. })
    }

    pub fn won(&self) -> bool {
        self.verdict == Verdict::ReachedTarget
    }
}

/// First obstacle (in list order) whose box at time `t` touches the sphere
pub fn first_hit<'a>(
    obstacles: &'a [Obstacle],
    t: f32,
    center: Vec3,
    radius: f32,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|ob| ob.bounds_at(t).intersects_sphere(center, radius))
}

/// Validate `candidate` against the obstacles (at time `t`) and the target.
///
/// On a hit the returned player is `prev` with its position untouched and
/// vertical velocity zeroed.
pub fn resolve(
    prev: &PlayerState,
    candidate: PlayerState,
    obstacles: &[Obstacle],
    t: f32,
    target: &Aabb,
) -> Resolution {
    let radius = candidate.radius * COLLISION_RADIUS_SCALE;

    if let Some(hit) = first_hit(obstacles, t, candidate.pos, radius) {
        let mut player = *prev;
        player.vel_y = 0.0;
        return Resolution {
            player,
            verdict: Verdict::Collided { obstacle_id: hit.id },
        };
    }

    let verdict = if target.intersects_sphere(candidate.pos, radius) {
        Verdict::ReachedTarget
    } else {
        Verdict::Clear
    };
    Resolution {
        player: candidate,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::obstacle::{Axis, ObstacleKind, Oscillation};

    fn player_at(pos: Vec3) -> PlayerState {
        let mut p = PlayerState::at_start(&GameConfig::default());
        p.pos = pos;
        p
    }

    fn far_target() -> Aabb {
        Aabb::from_center_size(Vec3::new(100.0, 0.0, 100.0), Vec3::ONE)
    }

    fn wall(id: u32, center: Vec3) -> Obstacle {
        Obstacle::new(id, center, Vec3::splat(2.0), ObstacleKind::Static)
    }

    #[test]
    fn test_clear_move_accepted() {
        let prev = player_at(Vec3::ZERO);
        let candidate = player_at(Vec3::new(0.1, 0.0, 0.0));
        let res = resolve(&prev, candidate, &[wall(1, Vec3::new(5.0, 0.0, 0.0))], 0.0, &far_target());
        assert_eq!(res.verdict, Verdict::Clear);
        assert!(res.accepted());
        assert_eq!(res.player, candidate);
    }

    #[test]
    fn test_collision_rolls_back() {
        let mut prev = player_at(Vec3::new(0.0, 0.5, 0.0));
        prev.vel_y = 0.2;
        let mut candidate = player_at(Vec3::new(1.5, 0.7, 0.0));
        candidate.vel_y = 0.17;
        let obstacles = [wall(1, Vec3::new(10.0, 0.0, 0.0)), wall(7, Vec3::new(2.5, 0.0, 0.0))];
        let res = resolve(&prev, candidate, &obstacles, 0.0, &far_target());
        assert_eq!(res.verdict, Verdict::Collided { obstacle_id: 7 });
        assert!(!res.accepted());
        assert_eq!(res.player.pos, prev.pos);
        assert_eq!(res.player.vel_y, 0.0);
    }

    #[test]
    fn test_collision_beats_target() {
        let prev = player_at(Vec3::ZERO);
        let candidate = player_at(Vec3::new(1.0, 0.0, 0.0));
        let target = Aabb::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);
        let res = resolve(&prev, candidate, &[wall(2, Vec3::new(2.0, 0.0, 0.0))], 0.0, &target);
        assert!(matches!(res.verdict, Verdict::Collided { .. }));
        assert!(!res.won());
    }

    #[test]
    fn test_target_reached() {
        let prev = player_at(Vec3::ZERO);
        let candidate = player_at(Vec3::new(0.3, 0.0, 0.0));
        let target = Aabb::from_center_size(Vec3::new(1.2, 0.0, 0.0), Vec3::splat(1.2));
        let res = resolve(&prev, candidate, &[], 0.0, &target);
        assert!(res.won());
        assert!(res.accepted());
    }

    #[test]
    fn test_shrunk_radius_grazes_edge() {
        // Gap of 0.58: inside the full radius (0.6), outside the shrunk one (0.57)
        let prev = player_at(Vec3::ZERO);
        let candidate = player_at(Vec3::new(-0.58, 0.0, 0.0));
        let obstacles = [wall(1, Vec3::new(-2.16, 0.0, 0.0))];
        let res = resolve(&prev, candidate, &obstacles, 0.0, &far_target());
        assert_eq!(res.verdict, Verdict::Clear);
    }

    #[test]
    fn test_oscillating_obstacle_uses_current_time() {
        let ob = Obstacle::new(
            3,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::splat(2.0),
            ObstacleKind::Oscillating(Oscillation {
                axis: Axis::X,
                amplitude: 3.0,
                speed: 1.0,
                phase: 0.0,
            }),
        );
        let prev = player_at(Vec3::ZERO);
        let candidate = player_at(Vec3::new(0.2, 0.0, 0.0));
        let obstacles = [ob];
        // t = 0: box spans [3, 5], clear
        let res = resolve(&prev, candidate, &obstacles, 0.0, &far_target());
        assert_eq!(res.verdict, Verdict::Clear);
        // t = -π/2: center at x = 1, box spans [0, 2], hit
        let t = -std::f32::consts::FRAC_PI_2;
        let res = resolve(&prev, candidate, &obstacles, t, &far_target());
        assert_eq!(res.verdict, Verdict::Collided { obstacle_id: 3 });
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn collision_restores_previous_position(
                px in -5.0f32..5.0, pz in -5.0f32..5.0,
                ox in -1.0f32..1.0, oz in -1.0f32..1.0,
                vel in -1.0f32..1.0,
            ) {
                let mut prev = player_at(Vec3::new(px, 0.0, pz));
                prev.vel_y = vel;
                let candidate = player_at(Vec3::new(ox, 0.0, oz));
                let res = resolve(&prev, candidate, &[wall(1, Vec3::ZERO)], 0.0, &far_target());
                prop_assert!(!res.accepted());
                prop_assert_eq!(res.player.pos, prev.pos);
                prop_assert_eq!(res.player.vel_y, 0.0);
            }
        }
    }
}
