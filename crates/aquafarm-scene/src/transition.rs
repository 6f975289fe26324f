//! Per-frame driver for the exterior-to-interior camera transition
//!
//! The core controller is polled once per frame; the discrete
//! `enter_interior` signal it reports is what flips the scene state while
//! the camera is still in flight, so the interior geometry is already
//! visible before the motion completes.

use bevy::prelude::*;
use tracing::info;

use aquafarm_core::{CameraPose, TransitionController};

use crate::camera::{MainCamera, OrbitCamera};
use crate::lifecycle::{FacilitySettings, SceneMode};
use crate::EngineSet;

/// Wrapper resource owning the transition state machine.
#[derive(Resource)]
pub struct TransitionDriver {
    pub controller: TransitionController,
    /// Whether this run has already flipped the scene to interior.
    entered: bool,
}

impl TransitionDriver {
    pub fn new(controller: TransitionController) -> Self {
        Self {
            controller,
            entered: false,
        }
    }

    /// Start a transition run. Guarded: a second start while running is
    /// ignored rather than restarting the path.
    pub fn begin(&mut self, now_ms: f64, pose: CameraPose, anchor: Vec3) {
        if self.controller.is_active() {
            return;
        }
        self.entered = false;
        self.controller.start(now_ms, pose, anchor);
    }
}

impl FromWorld for TransitionDriver {
    fn from_world(world: &mut World) -> Self {
        let settings = world
            .get_resource::<FacilitySettings>()
            .cloned()
            .unwrap_or_default();
        Self::new(TransitionController::new(settings.0.transition.clone()))
    }
}

/// Run condition: no transition in flight (the orbit camera may write).
pub fn transition_idle(driver: Res<TransitionDriver>) -> bool {
    !driver.controller.is_active()
}

/// Run condition: a transition is in flight (the driver writes the camera).
pub fn transition_active(driver: Res<TransitionDriver>) -> bool {
    driver.controller.is_active()
}

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TransitionDriver>().add_systems(
            Update,
            drive_transition
                .in_set(EngineSet::Camera)
                .run_if(transition_active),
        );
    }
}

/// Advance the transition and apply its pose to the camera. Keeps running
/// after the mode flip until the path completes, then hands the camera back
/// to the orbit controller anchored at the interior pose.
fn drive_transition(
    mut driver: ResMut<TransitionDriver>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    state: Res<State<SceneMode>>,
    mut next_state: ResMut<NextState<SceneMode>>,
    mut orbit: ResMut<OrbitCamera>,
    settings: Res<FacilitySettings>,
    time: Res<Time>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    let Some(frame) = driver.controller.update(now_ms) else {
        return;
    };

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = frame.pose.position;
        transform.look_at(frame.pose.target, Vec3::Y);
    }

    if frame.enter_interior && !driver.entered {
        driver.entered = true;
        if *state.get() == SceneMode::Transitioning {
            next_state.set(SceneMode::Interior);
        }
    }

    if frame.finished {
        info!("Transition complete");
        orbit.apply_preset(&settings.0.camera.interior);
    }
}
