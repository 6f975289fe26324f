//! Exterior-to-interior camera transition
//!
//! A single-shot, time-driven path interpolator. The camera first approaches
//! the clicked building at ground level, then slips through the entrance and
//! travels to the fixed interior starting pose. Partway through the traverse
//! the controller raises `enter_interior`, which is the one signal the scene
//! lifecycle uses to swap the environment while the camera is still moving.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::pose::CameraPose;

/// Tuning constants for the transition path.
///
/// The phase split, enter/traverse subdivision, and reveal threshold are
/// tuned for visual feel; they are kept as configuration rather than
/// derived from geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Total duration of the transition in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Camera offset from the building anchor at the end of the approach.
    #[serde(default = "default_approach_offset")]
    pub approach_offset: [f32; 3],
    /// Height above the anchor the approach phase looks at.
    #[serde(default = "default_approach_look_lift")]
    pub approach_look_lift: f32,
    /// Height above the anchor when the camera is "in the doorway".
    #[serde(default = "default_entry_lift")]
    pub entry_lift: f32,
    /// Share of the second phase spent moving into the doorway.
    #[serde(default = "default_enter_fraction")]
    pub enter_fraction: f32,
    /// Traverse progress past which the interior scene is revealed.
    #[serde(default = "default_reveal_fraction")]
    pub reveal_fraction: f32,
    /// Camera pose once the transition completes.
    #[serde(default = "default_interior_pose")]
    pub interior_pose: CameraPose,
}

fn default_duration_ms() -> f64 {
    2000.0
}

fn default_approach_offset() -> [f32; 3] {
    [1.5, 0.2, 1.5]
}

fn default_approach_look_lift() -> f32 {
    0.1
}

fn default_entry_lift() -> f32 {
    0.5
}

fn default_enter_fraction() -> f32 {
    0.3
}

fn default_reveal_fraction() -> f32 {
    0.1
}

fn default_interior_pose() -> CameraPose {
    CameraPose::new(Vec3::new(0.0, 2.0, 3.0), Vec3::ZERO)
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            approach_offset: default_approach_offset(),
            approach_look_lift: default_approach_look_lift(),
            entry_lift: default_entry_lift(),
            enter_fraction: default_enter_fraction(),
            reveal_fraction: default_reveal_fraction(),
            interior_pose: default_interior_pose(),
        }
    }
}

/// Per-tick output of [`TransitionController::update`].
#[derive(Debug, Clone, Copy)]
pub struct TransitionFrame {
    /// Camera pose for this tick.
    pub pose: CameraPose,
    /// Raw progress through the whole transition, clamped to [0, 1].
    pub progress: f32,
    /// True once the traverse sub-phase has passed the reveal threshold.
    /// Monotonic in time, so it flips false-to-true at most once per run.
    pub enter_interior: bool,
    /// True on the tick that completes the transition.
    pub finished: bool,
}

/// Captured state of a running transition.
#[derive(Debug, Clone)]
struct Running {
    start_ms: f64,
    start_pose: CameraPose,
    anchor: Vec3,
}

/// Time-driven camera path interpolator between the exterior and interior
/// views.
///
/// Single-shot: Idle -> Running -> Idle. Callers must check [`is_active`]
/// before calling [`start`] again; starting while running restarts the
/// path from the new pose.
///
/// [`is_active`]: TransitionController::is_active
/// [`start`]: TransitionController::start
#[derive(Debug, Clone)]
pub struct TransitionController {
    config: TransitionConfig,
    running: Option<Running>,
}

impl TransitionController {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    /// Begin a transition from `pose` toward the building at `anchor`.
    pub fn start(&mut self, now_ms: f64, pose: CameraPose, anchor: Vec3) {
        self.running = Some(Running {
            start_ms: now_ms,
            start_pose: pose,
            anchor,
        });
    }

    /// Abort a running transition without completing it.
    pub fn cancel(&mut self) {
        self.running = None;
    }

    /// Advance the transition to `now_ms`.
    ///
    /// Returns `None` when idle. On the completing tick the returned frame
    /// has `finished = true` and the controller goes back to idle.
    pub fn update(&mut self, now_ms: f64) -> Option<TransitionFrame> {
        let running = self.running.as_ref()?;

        let raw = ((now_ms - running.start_ms) / self.config.duration_ms).clamp(0.0, 1.0) as f32;
        let eased = ease_in_out(raw);

        let anchor = running.anchor;
        let approach = CameraPose::new(
            anchor + Vec3::from(self.config.approach_offset),
            anchor + Vec3::new(0.0, self.config.approach_look_lift, 0.0),
        );

        let mut enter_interior = false;
        let pose = if raw < 0.5 {
            // Approach: swing down from the orbit pose to just outside the
            // entrance, leveling off near the ground.
            running.start_pose.lerp(&approach, eased * 2.0)
        } else {
            let second = (eased - 0.5) * 2.0;
            let entry_position = anchor + Vec3::new(0.0, self.config.entry_lift, 0.0);

            if second < self.config.enter_fraction {
                // Slip from the approach point into the doorway while still
                // looking at the entrance.
                let t = second / self.config.enter_fraction;
                CameraPose::new(approach.position.lerp(entry_position, t), approach.target)
            } else {
                // Traverse from the doorway to the interior start pose.
                let t = (second - self.config.enter_fraction) / (1.0 - self.config.enter_fraction);
                enter_interior = t > self.config.reveal_fraction;
                CameraPose::new(
                    entry_position.lerp(self.config.interior_pose.position, t),
                    approach.target.lerp(self.config.interior_pose.target, t),
                )
            }
        };

        let finished = raw >= 1.0;
        if finished {
            self.running = None;
        }

        Some(TransitionFrame {
            pose,
            progress: raw,
            enter_interior,
            finished,
        })
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}

/// Quadratic ease-in-out: accelerate to the midpoint, decelerate after.
fn ease_in_out(p: f32) -> f32 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_pose() -> CameraPose {
        CameraPose::new(Vec3::new(5.0, 1.75, 5.0), Vec3::new(0.0, 1.0, 0.0))
    }

    fn running_controller() -> TransitionController {
        let mut controller = TransitionController::default();
        controller.start(1000.0, start_pose(), Vec3::ZERO);
        controller
    }

    #[test]
    fn test_idle_returns_none() {
        let mut controller = TransitionController::default();
        assert!(!controller.is_active());
        assert!(controller.update(0.0).is_none());
    }

    #[test]
    fn test_endpoints() {
        let mut controller = running_controller();

        let first = controller.update(1000.0).unwrap();
        assert_eq!(first.progress, 0.0);
        assert_eq!(first.pose, start_pose());
        assert!(!first.enter_interior);
        assert!(!first.finished);

        let last = controller.update(3000.0).unwrap();
        assert_eq!(last.progress, 1.0);
        let interior = TransitionConfig::default().interior_pose;
        assert!((last.pose.position - interior.position).length() < 1e-5);
        assert!((last.pose.target - interior.target).length() < 1e-5);
        assert!(last.finished);
        assert!(!controller.is_active());
    }

    #[test]
    fn test_progress_monotonic() {
        let mut controller = running_controller();

        let mut previous = -1.0_f32;
        for step in 0..=200 {
            let now = 1000.0 + f64::from(step) * 10.0;
            let frame = controller.update(now).unwrap();
            assert!(
                frame.progress >= previous,
                "progress regressed at t={now}: {} < {previous}",
                frame.progress
            );
            previous = frame.progress;
        }
    }

    #[test]
    fn test_reveal_fires_once_in_traverse() {
        let mut controller = running_controller();
        let config = controller.config().clone();

        let mut transitions = 0;
        let mut last = false;
        let mut first_reveal_raw = None;
        for step in 0..=2000 {
            let now = 1000.0 + f64::from(step);
            let frame = controller.update(now).unwrap();
            if frame.enter_interior && !last {
                transitions += 1;
                first_reveal_raw = Some(frame.progress);
            }
            last = frame.enter_interior;
        }

        assert_eq!(transitions, 1);
        // The reveal can only happen after the enter sub-phase is done:
        // eased progress past 0.5 + 0.5 * enter_fraction.
        let raw = first_reveal_raw.unwrap();
        let eased = ease_in_out(raw);
        assert!(eased > 0.5 + 0.5 * config.enter_fraction);
        assert!(last, "signal should stay true through completion");
    }

    #[test]
    fn test_times_before_start_clamp_to_zero() {
        let mut controller = running_controller();
        let frame = controller.update(500.0).unwrap();
        assert_eq!(frame.progress, 0.0);
        assert_eq!(frame.pose, start_pose());
    }

    #[test]
    fn test_phase_boundary_is_continuous() {
        let mut a = running_controller();
        let mut b = running_controller();
        let before = a.update(1999.0).unwrap();
        let after = b.update(2001.0).unwrap();
        assert!((before.pose.position - after.pose.position).length() < 0.05);
    }

    #[test]
    fn test_ease_curve_shape() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }
}
