//! Control panel overlay using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use tracing::info;

use aquafarm_scene::{
    EngineCommand, ModeChanges, ModelCache, PendingCommands, SceneMode, UiPointerCapture,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, consume_mode_changes)
            // Main UI runs in EguiPrimaryContextPass for proper input
            // handling (bevy_egui 0.38+).
            .add_systems(EguiPrimaryContextPass, ui_system);
    }
}

/// Drain engine mode notifications; this is where a host application would
/// hook its own onModeChange handling.
fn consume_mode_changes(mut changes: ResMut<ModeChanges>) {
    for mode in changes.0.drain(..) {
        info!("Host notified of mode change: {mode:?}");
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    state: Res<State<SceneMode>>,
    mut queue: ResMut<PendingCommands>,
    cache: Res<ModelCache>,
    mut pointer_capture: ResMut<UiPointerCapture>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::SidePanel::left("controls")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("AquaFarm");

            let mode_label = match state.get() {
                SceneMode::Exterior => "Exterior view",
                SceneMode::Transitioning => "Entering building...",
                SceneMode::Interior => "Interior view",
            };
            ui.label(mode_label);
            ui.separator();

            match state.get() {
                SceneMode::Exterior => {
                    if ui.button("Enter facility").clicked() {
                        queue.0.push(EngineCommand::EnterInterior);
                    }
                    if ui.button("Aerial view").clicked() {
                        queue.0.push(EngineCommand::AerialView);
                    }
                    if ui.button("Normal view").clicked() {
                        queue.0.push(EngineCommand::NormalView);
                    }
                    ui.add_space(8.0);
                    ui.label("Click a building to go inside.");
                }
                SceneMode::Transitioning => {
                    ui.spinner();
                }
                SceneMode::Interior => {
                    if ui.button("Back to exterior").clicked() {
                        queue.0.push(EngineCommand::Reset);
                    }
                    ui.add_space(8.0);
                    ui.label("Click a door or window to open it.");
                }
            }

            ui.separator();
            egui::CollapsingHeader::new("Models")
                .default_open(false)
                .show(ui, |ui| {
                    ui.label(format!("Loaded: {}", cache.models.len()));
                    ui.label(format!("Loading: {}", cache.loading.len()));
                    for path in cache.failed.keys() {
                        ui.colored_label(
                            egui::Color32::LIGHT_RED,
                            format!("{path} (fallback in use)"),
                        );
                    }
                });
        });

    // Suppress scene picking and camera drag while the pointer is over UI.
    pointer_capture.0 = ctx.wants_pointer_input();
}
