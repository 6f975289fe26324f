//! Time-parameterized motion for animated entities
//!
//! Positions are recomputed from elapsed time every frame; no velocity is
//! persisted, so animation is restart-safe and deterministic given `t`.

use glam::Vec3;

/// Circular swim path with a small vertical bob, used for tank occupants.
#[derive(Debug, Clone, Copy)]
pub struct SwimPath {
    /// Fixed center of the circle (water level on Y).
    pub center: Vec3,
    /// Radius of the circular path.
    pub radius: f32,
    /// Angular speed in radians per time unit.
    pub speed: f32,
    /// Phase offset so schools don't move in lockstep.
    pub phase: f32,
    /// Amplitude of the vertical bob.
    pub bob_amplitude: f32,
}

impl SwimPath {
    pub fn position_at(&self, t: f32) -> Vec3 {
        let angle = t * self.speed + self.phase;
        Vec3::new(
            self.center.x + angle.cos() * self.radius,
            self.center.y + (t * 2.0 + self.phase).sin() * self.bob_amplitude,
            self.center.z + angle.sin() * self.radius,
        )
    }

    /// Yaw facing the instantaneous direction of motion.
    pub fn heading_at(&self, t: f32) -> f32 {
        let angle = t * self.speed + self.phase;
        angle.cos().atan2(angle.sin())
    }
}

/// Linear drift along X with wrap-around, used for clouds.
#[derive(Debug, Clone, Copy)]
pub struct DriftPath {
    /// Spawn position; Y and Z stay fixed apart from the sway term.
    pub origin: Vec3,
    /// Signed drift speed in units per time unit.
    pub speed: f32,
    /// Drift wraps to the opposite side at +/- this X extent.
    pub half_extent: f32,
    /// Amplitude of the vertical sway.
    pub sway_amplitude: f32,
}

impl DriftPath {
    pub fn position_at(&self, t: f32) -> Vec3 {
        let span = self.half_extent * 2.0;
        let x = self.origin.x + self.speed * t + self.half_extent;
        let wrapped = x.rem_euclid(span) - self.half_extent;
        Vec3::new(
            wrapped,
            self.origin.y + (t * 0.2 + self.origin.x * 0.05).sin() * self.sway_amplitude,
            self.origin.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swim() -> SwimPath {
        SwimPath {
            center: Vec3::new(1.0, 0.1, -2.0),
            radius: 0.3,
            speed: 0.7,
            phase: 1.3,
            bob_amplitude: 0.05,
        }
    }

    #[test]
    fn test_swim_stays_on_circle() {
        let path = swim();
        for step in 0..100 {
            let p = path.position_at(step as f32 * 0.37);
            let planar =
                ((p.x - path.center.x).powi(2) + (p.z - path.center.z).powi(2)).sqrt();
            assert!((planar - path.radius).abs() < 1e-4);
            assert!((p.y - path.center.y).abs() <= path.bob_amplitude + 1e-5);
        }
    }

    #[test]
    fn test_swim_deterministic() {
        let path = swim();
        assert_eq!(path.position_at(4.2), path.position_at(4.2));
        assert_eq!(path.heading_at(4.2), path.heading_at(4.2));
    }

    #[test]
    fn test_drift_wraps_within_extent() {
        let path = DriftPath {
            origin: Vec3::new(10.0, 12.0, -5.0),
            speed: 3.0,
            half_extent: 80.0,
            sway_amplitude: 0.2,
        };
        for step in 0..500 {
            let p = path.position_at(step as f32);
            assert!(p.x >= -path.half_extent && p.x <= path.half_extent);
            assert_eq!(p.z, path.origin.z);
        }
    }

    #[test]
    fn test_drift_moves_in_speed_direction() {
        let path = DriftPath {
            origin: Vec3::ZERO,
            speed: -2.0,
            half_extent: 80.0,
            sway_amplitude: 0.0,
        };
        let a = path.position_at(0.0);
        let b = path.position_at(1.0);
        assert!(b.x < a.x);
    }
}
