//! Orbit camera controls and view presets

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use aquafarm_core::config::{CameraConfig, ViewPreset};
use aquafarm_core::CameraPose;

use crate::lifecycle::FacilitySettings;
use crate::picking::UiPointerCapture;
use crate::transition::transition_idle;
use crate::EngineSet;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Orbit camera state: spherical coordinates around a focus point with
/// exponential smoothing of zoom and re-centering.
///
/// The orbit controller is the camera writer in steady states; during a
/// transition the transition driver writes instead and this controller's
/// update system is suspended.
#[derive(Debug, Clone, Resource)]
pub struct OrbitCamera {
    pub distance: f32,
    pub target_distance: f32,
    pub azimuth: f32,
    pub elevation: f32,
    pub target: Vec3,
    pub target_focus: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut orbit = Self {
            distance: 1.0,
            target_distance: 1.0,
            azimuth: 0.0,
            elevation: 0.5,
            target: Vec3::ZERO,
            target_focus: Vec3::ZERO,
            min_distance: 0.1,
            max_distance: 100.0,
            min_elevation: 0.0,
            max_elevation: std::f32::consts::FRAC_PI_2,
            sensitivity: config.sensitivity,
            zoom_speed: config.zoom_speed,
            smooth_factor: config.smooth_factor,
        };
        orbit.apply_preset(&config.normal);
        orbit
    }

    /// Snap to a preset pose and adopt its orbit limits, without smoothing.
    pub fn apply_preset(&mut self, preset: &ViewPreset) {
        self.min_distance = preset.min_distance;
        self.max_distance = preset.max_distance;
        self.min_elevation = preset.min_elevation;
        self.max_elevation = preset.max_elevation;
        self.anchor_to(&preset.pose);
    }

    /// Recompute spherical coordinates so the orbit continues from `pose`.
    pub fn anchor_to(&mut self, pose: &CameraPose) {
        let offset = pose.position - pose.target;
        let distance = offset.length().max(1e-3);

        self.azimuth = offset.x.atan2(offset.z);
        self.elevation = (offset.y / distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(self.min_elevation, self.max_elevation);
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.target_distance = self.distance;
        self.target = pose.target;
        self.target_focus = pose.target;
    }

    /// Camera position for the current spherical coordinates.
    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.elevation.cos() * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                self.distance * self.elevation.cos() * self.azimuth.cos(),
            )
    }
}

impl FromWorld for OrbitCamera {
    fn from_world(world: &mut World) -> Self {
        let settings = world
            .get_resource::<FacilitySettings>()
            .cloned()
            .unwrap_or_default();
        Self::from_config(&settings.0.camera)
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                update_orbit_camera
                    .in_set(EngineSet::Camera)
                    .run_if(transition_idle),
            );
    }
}

fn spawn_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(orbit.eye()).looking_at(orbit.target, Vec3::Y),
        MainCamera,
    ));
}

/// Drag to orbit, scroll to zoom; zoom and focus approach their targets
/// exponentially for damped motion.
fn update_orbit_camera(
    mut orbit: ResMut<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    pointer_capture: Res<UiPointerCapture>,
    time: Res<Time>,
) {
    let mut total_motion = Vec2::ZERO;
    for motion in mouse_motion.read() {
        total_motion += motion.delta;
    }

    if mouse_button.pressed(MouseButton::Left) && !pointer_capture.0 {
        orbit.azimuth -= total_motion.x * orbit.sensitivity;
        orbit.elevation = (orbit.elevation + total_motion.y * orbit.sensitivity)
            .clamp(orbit.min_elevation, orbit.max_elevation);
    }

    if !pointer_capture.0 {
        for scroll in mouse_wheel.read() {
            let zoom_factor = 1.0 - scroll.y * orbit.zoom_speed * 0.3;
            orbit.target_distance =
                (orbit.target_distance * zoom_factor).clamp(orbit.min_distance, orbit.max_distance);
        }
    } else {
        // Drain the scroll events even when the UI owns the pointer.
        for _ in mouse_wheel.read() {}
    }

    let dt = time.delta_secs();
    let lerp_factor = 1.0 - (-orbit.smooth_factor * 60.0 * dt).exp();
    orbit.distance = orbit.distance + (orbit.target_distance - orbit.distance) * lerp_factor;
    orbit.target = orbit.target + (orbit.target_focus - orbit.target) * lerp_factor;

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = orbit.eye();
        let target = orbit.target;
        transform.look_at(target, Vec3::Y);
    }
}
