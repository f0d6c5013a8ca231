use bevy::prelude::*;
use bevy_egui::egui::{ComboBox, Slider};
use bevy_egui::{egui, EguiContexts};
use orrery::Num;
use smooth_bevy_cameras::controllers::orbit::OrbitCameraController;

use crate::config::SYSTEM_ENV;
use crate::Orrery;

const MIN_DIVISOR: Num = 1.0;
const MAX_DIVISOR: Num = 2000.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusMode {
    #[default]
    Star,
    // By identifier
    Body(String),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct UiState {
    pub focus_mode: FocusMode,
    settings_visible: bool,
    focus_visible: bool,
    about_visible: bool,
}

pub fn render(
    mut ui_state: ResMut<UiState>,
    mut egui_context: EguiContexts,
    orrery: Res<Orrery>,
    mut camera: Query<&mut OrbitCameraController>,
) {
    let ctx = egui_context.ctx_mut();
    let ui_state = ui_state.as_mut();
    let state = orrery.0.state();

    egui::TopBottomPanel::top("Top").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Settings").clicked() {
                ui_state.settings_visible = !ui_state.settings_visible;
            }

            if ui.button("Focus").clicked() {
                ui_state.focus_visible = !ui_state.focus_visible;
            }

            if ui.button("About").clicked() {
                ui_state.about_visible = !ui_state.about_visible;
            }
        });
    });

    egui::TopBottomPanel::bottom("Bottom").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let camera = orrery.0.camera().0;
            ui.label(format!(
                "Camera: ({:.1}, {:.1}, {:.1})",
                camera.eye.x, camera.eye.y, camera.eye.z
            ));
            ui.label(format!("Frames: {}", orrery.0.ticks()));
        });
    });

    egui::Window::new("Settings")
        .open(&mut ui_state.settings_visible)
        .show(ctx, |ui| {
            let mut divisor = state.time_scale_divisor();
            let slider = Slider::new(&mut divisor, MIN_DIVISOR..=MAX_DIVISOR)
                .logarithmic(true)
                .text("Time scale divisor");
            if ui.add(slider).changed() {
                if let Err(err) = state.set_time_scale_divisor(divisor) {
                    warn!("{err}");
                }
            }

            let mut orbit = state.orbit_enabled();
            if ui.checkbox(&mut orbit, "Orbit").changed() {
                state.set_orbit_enabled(orbit);
            }

            let mut rotation = state.rotation_enabled();
            if ui.checkbox(&mut rotation, "Rotation").changed() {
                state.set_rotation_enabled(rotation);
            }

            if let Ok(mut camera) = camera.get_single_mut() {
                ui.separator();
                ui.checkbox(&mut camera.enabled, "Camera controls");
                ui.add(
                    Slider::new(&mut camera.smoothing_weight, 0.0..=0.99)
                        .text("Camera smoothing"),
                );
            }
        });

    egui::Window::new("Focus")
        .open(&mut ui_state.focus_visible)
        .show(ctx, |ui| {
            let Some(scene) = orrery.0.scene() else {
                ui.label("No scene loaded");
                return;
            };

            let current = match &ui_state.focus_mode {
                FocusMode::Star => scene.star.identifier.clone(),
                FocusMode::Body(identifier) => identifier.clone(),
            };

            ComboBox::from_label("Choose focus")
                .selected_text(current.as_str())
                .show_ui(ui, |ui| {
                    let star = scene.star.identifier.as_str();
                    if ui.selectable_label(current == star, star).clicked() {
                        ui_state.focus_mode = FocusMode::Star;
                    }

                    for identifier in scene.registry.identifiers() {
                        if ui
                            .selectable_label(current == identifier, identifier)
                            .clicked()
                        {
                            ui_state.focus_mode =
                                FocusMode::Body(identifier.to_string());
                        }
                    }
                });

            ui.separator();
            for (identifier, entry) in scene.registry.iter() {
                let position = entry.instance.position;
                ui.label(format!(
                    "{identifier}: ({:.2}, {:.2})",
                    position.x, position.z
                ));
            }
        });

    egui::Window::new("About")
        .open(&mut ui_state.about_visible)
        .show(ctx, |ui| {
            ui.heading("Orrery");

            ui.label("Planets on circular orbits around a star.");
            ui.label("Moons ride along on their planets.");
            ui.label("Sizes and distances are not to scale.");

            ui.heading("Controls");
            ui.label("Hold Ctrl and drag the mouse to rotate the viewport");
            ui.label("Settings change the speed or pause orbits and spin");
            ui.label(format!("Set {SYSTEM_ENV} to load a JSON system table"));
        });
}
