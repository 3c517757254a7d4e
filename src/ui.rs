// ui.rs - Top-level frame: exercise picker, force-rerender, active panel

use eframe::egui;
use tracing::debug;

use crate::{Exercise, Workbench};

impl eframe::App for Workbench {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Render Performance Workbench");

            // Controls
            ui.horizontal(|ui| {
                ui.label("Exercise:");
                egui::ComboBox::from_id_source("exercise_selector")
                    .selected_text(self.exercise.name())
                    .show_ui(ui, |ui| {
                        for exercise in Exercise::ALL {
                            ui.selectable_value(&mut self.exercise, exercise, exercise.name());
                        }
                    });

                ui.separator();

                if ui.button("🔄 Force rerender").clicked() {
                    self.forced_renders += 1;
                    debug!(count = self.forced_renders, "forced rerender");
                    ctx.request_repaint();
                }
                ui.label(format!("Forced: {}", self.forced_renders));
            });

            ui.separator();

            match self.exercise {
                Exercise::Globe => self.globe.show(ui),
                Exercise::Cities => self.cities.show(ui),
                Exercise::Grid => self.grid.show(ui),
            }
        });
    }
}
