//! Camera pose representation

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A camera pose: where the camera sits and the point it looks at.
///
/// Owned by the scene lifecycle; written either by the orbit controller
/// (steady states) or the transition controller (during a transition),
/// never both in the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Linear interpolation of both endpoints.
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 1.75, 5.0),
            target: Vec3::new(0.0, 0.5, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::X);
        let b = CameraPose::new(Vec3::new(2.0, 4.0, 6.0), Vec3::new(1.0, 1.0, 1.0));

        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);

        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
