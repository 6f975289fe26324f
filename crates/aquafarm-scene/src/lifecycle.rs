//! Scene lifecycle state machine and host command handling

use bevy::prelude::*;
use tracing::{debug, info};

use aquafarm_core::{CameraPose, FacilityConfig};

use crate::camera::{MainCamera, OrbitCamera};
use crate::loader::ModelCache;
use crate::picking::{Structure, StructureRegistry};
use crate::transition::TransitionDriver;
use crate::ModeEntrySet;

/// Which environment the engine is currently presenting.
///
/// Transitions are one-directional (Exterior -> Transitioning -> Interior);
/// `EngineCommand::Reset` is the only way back to Exterior.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneMode {
    #[default]
    Exterior,
    Transitioning,
    Interior,
}

/// Marker for entities that belong to the exterior environment.
#[derive(Component, Clone)]
pub struct ExteriorObject;

/// Marker for entities that belong to the interior environment.
#[derive(Component, Clone)]
pub struct InteriorObject;

/// Facility configuration as a resource.
#[derive(Resource, Clone, Default)]
pub struct FacilitySettings(pub FacilityConfig);

/// Imperative commands from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Start the interior transition against the first registered building.
    /// Valid only in Exterior mode.
    EnterInterior,
    /// Snap to the aerial overview preset. Valid only in Exterior mode.
    AerialView,
    /// Snap back to the normal view preset. Valid only in Exterior mode.
    NormalView,
    /// Full reset: tear everything down and rebuild the exterior.
    Reset,
}

/// Command queue written by the host UI and drained once per frame.
#[derive(Resource, Default)]
pub struct PendingCommands(pub Vec<EngineCommand>);

/// Mode-change notifications for the host, appended on every state change.
#[derive(Resource, Default)]
pub struct ModeChanges(pub Vec<SceneMode>);

pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneMode>()
            .init_resource::<PendingCommands>()
            .init_resource::<ModeChanges>()
            .add_systems(Update, (drain_commands, announce_mode_changes))
            .add_systems(
                OnEnter(SceneMode::Interior),
                teardown_exterior.in_set(ModeEntrySet::Teardown),
            )
            .add_systems(
                OnEnter(SceneMode::Exterior),
                teardown_for_exterior.in_set(ModeEntrySet::Teardown),
            );
    }
}

/// Despawn every exterior-scoped entity once the interior takes over, so no
/// stale exterior objects persist into interior mode.
fn teardown_exterior(
    mut commands: Commands,
    mut registry: ResMut<StructureRegistry>,
    exterior: Query<Entity, With<ExteriorObject>>,
) {
    let count = exterior.iter().count();
    for entity in exterior.iter() {
        // try_despawn: despawning a marked parent already removed its
        // marked children.
        commands.entity(entity).try_despawn();
    }
    registry.0.clear();
    info!("Exterior scene cleared ({count} entities)");
}

/// Clear everything on the way (back) into the exterior. A reset can fire
/// mid-transition, while exterior entities still exist, so both scopes are
/// swept before the exterior builder runs.
fn teardown_for_exterior(
    mut commands: Commands,
    mut registry: ResMut<StructureRegistry>,
    interior: Query<Entity, With<InteriorObject>>,
    exterior: Query<Entity, With<ExteriorObject>>,
) {
    let count = interior.iter().count() + exterior.iter().count();
    for entity in interior.iter().chain(exterior.iter()) {
        commands.entity(entity).try_despawn();
    }
    registry.0.clear();
    if count > 0 {
        info!("Scene cleared for exterior rebuild ({count} entities)");
    }
}

/// Drain the host command queue, ignoring commands that are invalid for the
/// current mode.
#[allow(clippy::too_many_arguments)]
fn drain_commands(
    mut queue: ResMut<PendingCommands>,
    state: Res<State<SceneMode>>,
    mut next_state: ResMut<NextState<SceneMode>>,
    settings: Res<FacilitySettings>,
    registry: Res<StructureRegistry>,
    structures: Query<&GlobalTransform, With<Structure>>,
    camera_query: Query<&Transform, With<MainCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mut driver: ResMut<TransitionDriver>,
    mut cache: ResMut<ModelCache>,
    time: Res<Time>,
) {
    for command in queue.0.drain(..) {
        match (command, *state.get()) {
            (EngineCommand::EnterInterior, SceneMode::Exterior) => {
                // Synthesize a hit against the first registered building.
                let Some(&first) = registry.0.first() else {
                    debug!("EnterInterior ignored: no buildings registered yet");
                    continue;
                };
                let Ok(anchor_transform) = structures.get(first) else {
                    continue;
                };
                let Ok(camera_transform) = camera_query.single() else {
                    continue;
                };
                if driver.controller.is_active() {
                    continue;
                }

                info!("Interior entry triggered programmatically");
                let pose = CameraPose::new(camera_transform.translation, orbit.target);
                driver.begin(
                    time.elapsed_secs_f64() * 1000.0,
                    pose,
                    anchor_transform.translation(),
                );
                next_state.set(SceneMode::Transitioning);
            }
            (EngineCommand::AerialView, SceneMode::Exterior) => {
                orbit.apply_preset(&settings.0.camera.aerial);
            }
            (EngineCommand::NormalView, SceneMode::Exterior) => {
                orbit.apply_preset(&settings.0.camera.normal);
            }
            (EngineCommand::Reset, mode) if mode != SceneMode::Exterior => {
                info!("Resetting to exterior");
                driver.controller.cancel();
                cache.clear();
                next_state.set(SceneMode::Exterior);
            }
            (command, mode) => {
                // Invalid-mode calls are a no-op, not an error.
                debug!("Ignoring {command:?} in {mode:?}");
            }
        }
    }
}

/// Append every mode change to the host notification queue.
fn announce_mode_changes(
    state: Res<State<SceneMode>>,
    mut changes: ResMut<ModeChanges>,
    mut last: Local<Option<SceneMode>>,
) {
    let current = *state.get();
    if *last != Some(current) {
        if last.is_some() {
            info!("Scene mode changed: {current:?}");
        }
        changes.0.push(current);
        *last = Some(current);
    }
}
