//! Pointer picking against buildings and hinged panels
//!
//! A pointer-down casts a camera ray against the registry relevant to the
//! current mode only: building bounds in Exterior, panel bounds in
//! Interior, nothing while Transitioning. The first intersection along the
//! ray wins.

use bevy::prelude::*;
use tracing::info;

use aquafarm_core::ray::{nearest_hit, Aabb, Ray};
use aquafarm_core::{CameraPose, HingedPanel};

use crate::camera::{MainCamera, OrbitCamera};
use crate::lifecycle::SceneMode;
use crate::transition::TransitionDriver;
use crate::EngineSet;

/// Set by the host UI when the pointer is over UI chrome; picking and
/// camera input are suppressed while true.
#[derive(Resource, Default)]
pub struct UiPointerCapture(pub bool);

/// A clickable exterior building: pickable bounds relative to the entity's
/// translation.
#[derive(Component)]
pub struct Structure {
    pub half_extents: Vec3,
    pub center_offset: Vec3,
}

/// Clickable buildings in registration order; the first entry is the target
/// of the programmatic interior trigger.
#[derive(Resource, Default)]
pub struct StructureRegistry(pub Vec<Entity>);

/// Animation state for one door or window, kept on the pivot entity rather
/// than on the panel mesh.
#[derive(Component)]
pub struct PanelPivot(pub HingedPanel);

/// The visible panel mesh, pointing back at its pivot.
#[derive(Component)]
pub struct PanelBody {
    pub pivot: Entity,
}

/// Margin added around panel rectangles so thin panes remain clickable.
const PANEL_PICK_MARGIN: f32 = 0.05;

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiPointerCapture>()
            .init_resource::<StructureRegistry>()
            .add_systems(Update, handle_pointer_clicks.in_set(EngineSet::Animate));
    }
}

/// Resolve a pointer-down to a building (exterior) or panel (interior) hit.
#[allow(clippy::too_many_arguments)]
fn handle_pointer_clicks(
    mouse_button: Res<ButtonInput<MouseButton>>,
    pointer_capture: Res<UiPointerCapture>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    state: Res<State<SceneMode>>,
    structures: Query<(Entity, &Structure, &GlobalTransform)>,
    bodies: Query<(&PanelBody, &GlobalTransform)>,
    mut pivots: Query<&mut PanelPivot>,
    orbit: Res<OrbitCamera>,
    mut driver: ResMut<TransitionDriver>,
    mut next_state: ResMut<NextState<SceneMode>>,
    time: Res<Time>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) || pointer_capture.0 {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    // Cursor positions with no valid camera ray produce zero intersections.
    let Ok(view_ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    let ray = Ray {
        origin: view_ray.origin,
        direction: *view_ray.direction,
    };

    match state.get() {
        SceneMode::Exterior => {
            let candidates = structures.iter().map(|(entity, structure, transform)| {
                let center = transform.translation() + structure.center_offset;
                (
                    (entity, transform.translation()),
                    Aabb::from_center_half_extents(center, structure.half_extents),
                )
            });

            if let Some(((_, anchor), _)) = nearest_hit(&ray, candidates) {
                if driver.controller.is_active() {
                    return;
                }
                info!("Building clicked, starting transition");
                let pose = CameraPose::new(camera_transform.translation(), orbit.target);
                driver.begin(time.elapsed_secs_f64() * 1000.0, pose, anchor);
                next_state.set(SceneMode::Transitioning);
            }
        }
        SceneMode::Interior => {
            let candidates = bodies.iter().filter_map(|(body, transform)| {
                let panel = &pivots.get(body.pivot).ok()?.0;
                Some((body.pivot, panel_bounds(panel, transform)))
            });

            if let Some((pivot_entity, _)) = nearest_hit(&ray, candidates) {
                if let Ok(mut pivot) = pivots.get_mut(pivot_entity) {
                    pivot.0.toggle();
                }
            }
        }
        SceneMode::Transitioning => {
            // Picking is disabled mid-transition.
        }
    }
}

/// World-space bounds of a panel rectangle at its current angle.
fn panel_bounds(panel: &HingedPanel, transform: &GlobalTransform) -> Aabb {
    let hw = panel.width / 2.0;
    let hh = panel.height / 2.0;
    let corners = [
        transform.transform_point(Vec3::new(-hw, -hh, 0.0)),
        transform.transform_point(Vec3::new(hw, -hh, 0.0)),
        transform.transform_point(Vec3::new(-hw, hh, 0.0)),
        transform.transform_point(Vec3::new(hw, hh, 0.0)),
    ];
    Aabb::from_points(&corners).inflated(PANEL_PICK_MARGIN)
}
