//! Hinged door and window panels

use serde::{Deserialize, Serialize};

/// Which edge of the opening the panel pivots around, seen from inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HingeSide {
    Left,
    Right,
}

impl HingeSide {
    /// Sign applied to the panel offset and open angle.
    pub fn sign(self) -> f32 {
        match self {
            HingeSide::Left => 1.0,
            HingeSide::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    Door,
    Window,
}

/// Fraction of the remaining angle closed per easing step.
pub const EASE_FACTOR: f32 = 0.12;

/// Remaining delta below which the angle snaps to its target.
pub const SNAP_EPSILON: f32 = 0.001;

/// A door or window: a flat panel offset from a pivot, rotated around the
/// pivot to open. Closed (angle 0) is the canonical untouched state.
#[derive(Debug, Clone)]
pub struct HingedPanel {
    pub kind: PanelKind,
    pub hinge: HingeSide,
    pub width: f32,
    pub height: f32,
    /// Full open angle in radians, already signed by the hinge side.
    pub open_angle: f32,
    pub current_angle: f32,
    pub target_angle: f32,
}

impl HingedPanel {
    pub fn new(kind: PanelKind, hinge: HingeSide, width: f32, height: f32, open_angle: f32) -> Self {
        Self {
            kind,
            hinge,
            width,
            height,
            open_angle: open_angle * hinge.sign(),
            current_angle: 0.0,
            target_angle: 0.0,
        }
    }

    pub fn is_closed_target(&self) -> bool {
        self.target_angle.abs() < SNAP_EPSILON
    }

    /// Flip the target between closed and fully open.
    pub fn toggle(&mut self) {
        self.target_angle = if self.is_closed_target() {
            self.open_angle
        } else {
            0.0
        };
    }

    /// Ease the current angle toward the target by a fixed fraction of the
    /// remaining delta, snapping when close enough. Returns the new angle.
    pub fn ease_step(&mut self) -> f32 {
        let delta = self.target_angle - self.current_angle;
        if delta.abs() > SNAP_EPSILON {
            self.current_angle += delta * EASE_FACTOR;
        } else {
            self.current_angle = self.target_angle;
        }
        self.current_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn door() -> HingedPanel {
        HingedPanel::new(PanelKind::Door, HingeSide::Left, 2.2, 3.2, PI * 0.6)
    }

    #[test]
    fn test_toggle_opens_then_closes() {
        let mut panel = door();
        assert_eq!(panel.target_angle, 0.0);

        panel.toggle();
        assert_eq!(panel.target_angle, PI * 0.6);

        panel.toggle();
        assert_eq!(panel.target_angle, 0.0);
    }

    #[test]
    fn test_right_hinge_opens_negative() {
        let mut panel = HingedPanel::new(PanelKind::Window, HingeSide::Right, 2.0, 1.2, PI * 0.5);
        panel.toggle();
        assert_eq!(panel.target_angle, -PI * 0.5);
    }

    #[test]
    fn test_easing_converges_and_snaps() {
        let mut panel = door();
        panel.toggle();

        let mut last = panel.current_angle;
        for _ in 0..200 {
            let angle = panel.ease_step();
            assert!(angle >= last, "opening should be monotonic");
            last = angle;
        }
        assert_eq!(panel.current_angle, panel.target_angle);
    }

    #[test]
    fn test_double_toggle_restores_closed_state() {
        let mut panel = door();
        panel.toggle();
        for _ in 0..200 {
            panel.ease_step();
        }
        panel.toggle();
        for _ in 0..200 {
            panel.ease_step();
        }
        assert_eq!(panel.current_angle, 0.0);
        assert_eq!(panel.target_angle, 0.0);
    }
}
