//! AquaFarm Scene - 3D scene orchestration and transition engine
//!
//! This crate provides the Bevy side of the facility viewer:
//! - Scene lifecycle state machine (exterior / transitioning / interior)
//! - Outdoor and indoor environment builders with procedural fallbacks
//! - Model cache with asynchronous glTF loading
//! - Procedural surface texture synthesis
//! - Pointer picking against buildings and hinged panels
//! - Per-frame animation of clouds, fish, and door/window easing

pub mod animate;
pub mod camera;
pub mod indoor;
pub mod lifecycle;
pub mod lighting;
pub mod loader;
pub mod outdoor;
pub mod picking;
pub mod textures;
pub mod transition;

use bevy::prelude::*;

pub use lifecycle::{EngineCommand, FacilitySettings, ModeChanges, PendingCommands, SceneMode};
pub use loader::{AssetLoadError, ModelCache};
pub use picking::UiPointerCapture;

/// Per-frame ordering: animation and picking run before the camera writers,
/// which run before rendering, so visual state is self-consistent.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSet {
    Animate,
    Camera,
}

/// Mode-entry ordering: the previous environment is torn down before the
/// next one is built.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeEntrySet {
    Teardown,
    Build,
}

/// Plugin that sets up the full scene engine.
pub struct AquafarmScenePlugin;

impl Plugin for AquafarmScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FacilitySettings>()
            .configure_sets(Update, (EngineSet::Animate, EngineSet::Camera).chain())
            .configure_sets(
                OnEnter(SceneMode::Exterior),
                (ModeEntrySet::Teardown, ModeEntrySet::Build).chain(),
            )
            .configure_sets(
                OnEnter(SceneMode::Interior),
                (ModeEntrySet::Teardown, ModeEntrySet::Build).chain(),
            )
            .add_plugins(lifecycle::LifecyclePlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(loader::LoaderPlugin)
            .add_plugins(transition::TransitionPlugin)
            .add_plugins(picking::PickingPlugin)
            .add_plugins(outdoor::OutdoorPlugin)
            .add_plugins(indoor::IndoorPlugin)
            .add_plugins(animate::AnimatePlugin);
    }
}
