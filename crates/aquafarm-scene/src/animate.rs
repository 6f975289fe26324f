//! Per-frame animation: drifting clouds, swimming fish, easing panels
//!
//! All motion is recomputed from elapsed time, so animation survives scene
//! rebuilds without carrying velocity state.

use bevy::prelude::*;

use aquafarm_core::motion::{DriftPath, SwimPath};

use crate::camera::MainCamera;
use crate::lifecycle::{FacilitySettings, SceneMode};
use crate::picking::PanelPivot;
use crate::EngineSet;

/// A drifting cloud billboard.
#[derive(Component)]
pub struct Cloud(pub DriftPath);

/// A swimming tank occupant.
#[derive(Component)]
pub struct Swimmer(pub SwimPath);

pub struct AnimatePlugin;

impl Plugin for AnimatePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                drift_clouds
                    .in_set(EngineSet::Animate)
                    .run_if(in_state(SceneMode::Exterior)),
                swim_fish
                    .in_set(EngineSet::Animate)
                    .run_if(in_state(SceneMode::Interior)),
                ease_panels
                    .in_set(EngineSet::Animate)
                    .run_if(in_state(SceneMode::Interior)),
            ),
        );
    }
}

/// Drift clouds along their wrap-around paths and keep them facing the
/// camera.
fn drift_clouds(
    time: Res<Time>,
    camera_query: Query<&Transform, With<MainCamera>>,
    mut clouds: Query<(&Cloud, &mut Transform), Without<MainCamera>>,
) {
    let t = time.elapsed_secs();
    let camera_rotation = camera_query.single().map(|c| c.rotation).ok();

    for (cloud, mut transform) in clouds.iter_mut() {
        transform.translation = cloud.0.position_at(t);
        if let Some(rotation) = camera_rotation {
            transform.rotation = rotation;
        }
    }
}

/// Move each fish along its circular path, facing the direction of motion.
fn swim_fish(
    time: Res<Time>,
    settings: Res<FacilitySettings>,
    mut fish: Query<(&Swimmer, &mut Transform)>,
) {
    let t = time.elapsed_secs() * settings.0.interior.animation_speed;
    for (swimmer, mut transform) in fish.iter_mut() {
        transform.translation = swimmer.0.position_at(t);
        transform.rotation = Quat::from_rotation_y(swimmer.0.heading_at(t));
    }
}

/// Ease every panel toward its target angle and rotate its pivot.
fn ease_panels(mut pivots: Query<(&mut PanelPivot, &mut Transform)>) {
    for (mut pivot, mut transform) in pivots.iter_mut() {
        if pivot.0.current_angle == pivot.0.target_angle {
            continue;
        }
        let angle = pivot.0.ease_step();
        transform.rotation = Quat::from_rotation_y(angle);
    }
}
