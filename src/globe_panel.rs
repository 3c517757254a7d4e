// globe_panel.rs - Globe behind a checkbox, loaded lazily with a hover prefetch

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Align2, Color32, FontId, Sense, Stroke, Vec2};
use perf_core::globe::GlobeModel;
use perf_core::lazy::{LazyModule, LoadState};
use tokio::runtime::Handle;

const GLOBE_SIZE: f32 = 400.0;
const DEGREES_PER_SEC: f64 = 20.0;

pub struct GlobePanel {
    show_globe: bool,
    module: LazyModule<GlobeModel>,
    rotation: f64,
    last_frame: Instant,
}

impl GlobePanel {
    pub fn new(runtime: Handle) -> Self {
        Self {
            show_globe: false,
            module: LazyModule::new("globe", GlobeModel::build, runtime),
            rotation: 0.0,
            last_frame: Instant::now(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let checkbox = ui.checkbox(&mut self.show_globe, "show globe");
        // Start fetching as soon as the user looks like they might click
        if checkbox.hovered() || checkbox.has_focus() {
            self.module.prefetch();
        }
        self.module.poll();

        let status = match self.module.state() {
            LoadState::Unloaded => "not loaded".to_string(),
            LoadState::Loading => "loading".to_string(),
            LoadState::Ready(globe) => format!("ready ({} points)", globe.len()),
            LoadState::Failed(err) => err.to_string(),
        };
        ui.label(format!("Globe module: {status}"));
        ui.separator();

        let (response, painter) = ui.allocate_painter(Vec2::splat(GLOBE_SIZE), Sense::hover());
        let rect = response.rect;
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        if !self.show_globe {
            return;
        }

        let Some(globe) = self.module.get() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Loading ...",
                FontId::proportional(18.0),
                ui.visuals().text_color(),
            );
            ui.ctx().request_repaint_after(Duration::from_millis(50));
            return;
        };

        self.rotation = (self.rotation + dt * DEGREES_PER_SEC) % 360.0;
        let radius = rect.width().min(rect.height()) * 0.5 - 4.0;
        let center = rect.center();

        painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::from_gray(90)));
        for (x, y) in globe.project(self.rotation) {
            let pos = center + Vec2::new(x * radius, -y * radius);
            painter.circle_filled(pos, 0.6, Color32::from_rgb(70, 140, 220));
        }

        ui.ctx().request_repaint();
    }
}
