//! Obstacle boxes, static or oscillating
//!
//! An oscillating obstacle's center is a closed-form function of elapsed
//! time, so bounds are recomputed from scratch every tick and never drift.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;

/// Horizontal axis an obstacle slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Sinusoidal sliding parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub axis: Axis,
    /// Peak displacement from the base center
    pub amplitude: f32,
    /// Angular speed (radians per second)
    pub speed: f32,
    /// Phase offset (radians)
    pub phase: f32,
}

impl Oscillation {
    /// Displacement from the base center at time `t` (seconds)
    #[inline]
    pub fn offset_at(&self, t: f32) -> Vec3 {
        self.axis.unit() * ((t * self.speed + self.phase).sin() * self.amplitude)
    }
}

/// Obstacle behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Static,
    Oscillating(Oscillation),
}

/// A lethal box in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Placement center; the base point for oscillating obstacles
    pub center: Vec3,
    pub half_extents: Vec3,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(id: u32, center: Vec3, size: Vec3, kind: ObstacleKind) -> Self {
        Self {
            id,
            center,
            half_extents: size / 2.0,
            kind,
        }
    }

    #[inline]
    pub fn is_oscillating(&self) -> bool {
        matches!(self.kind, ObstacleKind::Oscillating(_))
    }

    /// Full edge lengths (width, height, depth)
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Current center at time `t` (seconds)
    pub fn center_at(&self, t: f32) -> Vec3 {
        match self.kind {
            ObstacleKind::Static => self.center,
            ObstacleKind::Oscillating(osc) => self.center + osc.offset_at(t),
        }
    }

    /// Box at placement time
    pub fn placed_bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }

    /// Current box at time `t` (seconds)
    pub fn bounds_at(&self, t: f32) -> Aabb {
        Aabb::from_center_half_extents(self.center_at(t), self.half_extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn sliding(axis: Axis, phase: f32) -> Obstacle {
        Obstacle::new(
            1,
            Vec3::new(2.0, 1.0, -3.0),
            Vec3::new(2.0, 2.0, 2.0),
            ObstacleKind::Oscillating(Oscillation {
                axis,
                amplitude: 3.0,
                speed: 0.5,
                phase,
            }),
        )
    }

    #[test]
    fn test_static_never_moves() {
        let ob = Obstacle::new(1, Vec3::new(1.0, 2.0, 3.0), Vec3::ONE, ObstacleKind::Static);
        assert_eq!(ob.center_at(0.0), ob.center_at(1234.5));
        assert!(!ob.is_oscillating());
        assert_eq!(ob.bounds_at(99.0), ob.placed_bounds());
    }

    #[test]
    fn test_oscillation_peak() {
        let ob = sliding(Axis::X, FRAC_PI_2);
        let c = ob.center_at(0.0);
        assert!((c.x - 5.0).abs() < 1e-5);
        assert_eq!(c.y, 1.0);
        assert_eq!(c.z, -3.0);
    }

    #[test]
    fn test_oscillation_is_closed_form() {
        let ob = sliding(Axis::Z, 0.3);
        // Same time gives same center regardless of history
        let t = 17.25;
        let a = ob.center_at(t);
        let _ = ob.center_at(3.0);
        assert_eq!(ob.center_at(t), a);
        assert_eq!(a.x, 2.0);
        assert!((a.z - (-3.0)).abs() <= 3.0 + 1e-5);
    }

    #[test]
    fn test_bounds_follow_center() {
        let ob = sliding(Axis::X, FRAC_PI_2);
        let b = ob.bounds_at(0.0);
        assert!((b.center().x - 5.0).abs() < 1e-5);
        assert_eq!(b.size(), ob.size());
    }
}
