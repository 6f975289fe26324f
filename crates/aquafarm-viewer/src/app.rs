//! Bevy application setup

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::{prelude::MeshPickingPlugin, DefaultPickingPlugins};

use aquafarm_core::FacilityConfig;
use aquafarm_scene::{AquafarmScenePlugin, FacilitySettings};

use crate::ui::UiPlugin;

/// Run the Bevy application with the given facility configuration.
pub fn run(config: FacilityConfig) {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.0, 0.07, 0.13)))
        .insert_resource(FacilitySettings(config))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "AquaFarm Facility Viewer".to_string(),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    // Don't look for .meta files next to the models.
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                }),
        )
        // DefaultPickingPlugins provides core picking; MeshPickingPlugin must
        // be added separately for 3D mesh raycasting. Both must be added
        // BEFORE EguiPlugin so it can detect PickingPlugin.
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .add_plugins(AquafarmScenePlugin)
        .add_plugins(UiPlugin)
        .run();
}
