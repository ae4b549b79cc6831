//! Egui control panel: every [`Params`] field plus live flow statistics.

use crate::input::Action;
use crate::params::{Params, AIR_SPEED_MAX};
use crate::simulation::FlowStats;

/// Read-only figures shown under the controls.
pub struct PanelStatus<'a> {
    pub stats: &'a FlowStats,
    pub fps: f32,
    pub paused: bool,
}

/// Draw the panel. Edits go straight into `params`; buttons come back as
/// [`Action`]s.
pub fn params_panel(ctx: &egui::Context, params: &mut Params, status: PanelStatus<'_>) -> Vec<Action> {
    let mut actions = Vec::new();

    egui::Window::new("HVAC Controls")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Climate");
            ui.checkbox(&mut params.evaporator_on, "A/C (evaporator)");
            ui.checkbox(&mut params.heater_on, "Heater");
            ui.add(egui::Slider::new(&mut params.blend_door, 0.0..=1.0).text("Temp blend"));
            ui.add(egui::Slider::new(&mut params.air_speed, 0.0..=AIR_SPEED_MAX).text("Fan speed"));

            ui.add_space(4.0);
            ui.separator();

            ui.heading("Outlets");
            ui.checkbox(&mut params.mode_defrost, "Defrost (windshield)");
            ui.checkbox(&mut params.mode_face, "Face (dashboard)");
            ui.checkbox(&mut params.mode_foot, "Foot (floor)");

            ui.add_space(4.0);
            ui.separator();

            ui.horizontal(|ui| {
                let label = if status.paused { "Resume" } else { "Pause" };
                if ui.button(label).clicked() {
                    actions.push(Action::TogglePause);
                }
                if ui.button("Respawn").clicked() {
                    actions.push(Action::Respawn);
                }
            });

            ui.add_space(4.0);
            ui.separator();

            let stats = status.stats;
            egui::Grid::new("flow_stats").num_columns(2).show(ui, |ui| {
                ui.label("Bypass / heater");
                ui.label(format!("{} / {}", stats.bypass, stats.through_heater));
                ui.end_row();
                ui.label("Defrost / face / foot");
                ui.label(format!("{} / {} / {}", stats.defrost, stats.face, stats.foot));
                ui.end_row();
                ui.label("Neutral / cold / hot");
                ui.label(format!("{} / {} / {}", stats.neutral, stats.cold, stats.hot));
                ui.end_row();
                ui.label("FPS");
                ui.label(format!("{:.0}", status.fps));
                ui.end_row();
            });
        });

    actions
}
