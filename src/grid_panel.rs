// grid_panel.rs - Grid store and dog store kept apart, every cell behind a gate

use std::time::Instant;

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Sense, Stroke, Vec2};
use perf_core::config::GridConfig;
use perf_core::debounce::Debounced;
use perf_core::store::{DogAction, DogState, DogStore, GridAction, GridState, GridStore};
use perf_core::{CellRenderInput, ContentKey, GateStats, GridError, ItemId, RenderGate, with_render_gate};
use tracing::warn;

const CELL_SIZE: f32 = 16.0;
const SPACING: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
struct CellVisual {
    label: String,
    fill: Color32,
    text: Color32,
    stroke: Stroke,
}

type CellGate = RenderGate<CellRenderInput, CellVisual, fn(&CellRenderInput) -> CellVisual>;

fn cell_visual(input: &CellRenderInput) -> CellVisual {
    let value = f64::from_bits(input.content.0);
    let alpha = (value / 100.0 * 255.0).clamp(0.0, 255.0) as u8;
    let stroke = if input.selected_item == Some(ItemId(input.index as u64)) {
        Stroke::new(2.0, Color32::from_rgb(60, 120, 255))
    } else if input.is_highlighted() {
        Stroke::new(1.5, Color32::YELLOW)
    } else {
        Stroke::new(0.2, Color32::from_gray(60))
    };
    CellVisual {
        label: format!("{}", value.floor() as u32),
        fill: Color32::from_black_alpha(alpha),
        text: if value > 50.0 { Color32::WHITE } else { Color32::BLACK },
        stroke,
    }
}

fn new_gate() -> CellGate {
    with_render_gate(cell_visual as fn(&CellRenderInput) -> CellVisual)
}

pub struct GridPanel {
    config: GridConfig,
    grid: GridStore,
    dog: DogStore,
    rows: Debounced<usize>,
    columns: Debounced<usize>,
    gates: Vec<CellGate>,
    hovered: Option<usize>,
    selected: Option<ItemId>,
    stats: GateStats,
    dog_input: String,
    last_error: Option<GridError>,
}

impl Default for GridPanel {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridPanel {
    pub fn new(config: GridConfig) -> Self {
        let grid = GridStore::new("grid", GridState::new(&config));
        let cell_count = grid.state().grid.cells().len();
        Self {
            config,
            grid,
            dog: DogStore::new("dog", DogState::default()),
            rows: Debounced::new(config.view_rows, config.debounce),
            columns: Debounced::new(config.view_columns, config.debounce),
            gates: (0..cell_count).map(|_| new_gate()).collect(),
            hovered: None,
            selected: None,
            stats: GateStats::default(),
            dog_input: String::new(),
            last_error: None,
        }
    }

    fn dispatch_grid(&mut self, action: GridAction) {
        match self.grid.dispatch(action) {
            Ok(()) => self.last_error = None,
            Err(err) => {
                warn!(%err, ?action, "grid action rejected");
                self.last_error = Some(err);
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        ui.horizontal(|ui| {
            if ui.button("🎲 Update grid data").clicked() {
                self.dispatch_grid(GridAction::UpdateGrid);
            }
            if ui.button("New dispatcher").clicked() {
                self.grid.rebuild_dispatch();
            }

            ui.separator();

            ui.label("Rows:");
            let mut rows = *self.rows.pending();
            if ui.add(egui::Slider::new(&mut rows, 1..=self.config.rows)).changed() {
                self.rows.set(rows, now);
            }
            ui.label("Columns:");
            let mut columns = *self.columns.pending();
            if ui.add(egui::Slider::new(&mut columns, 1..=self.config.columns)).changed() {
                self.columns.set(columns, now);
            }
        });

        self.rows.poll(now);
        self.columns.poll(now);
        if let Some(wait) = self.rows.remaining(now).max(self.columns.remaining(now)) {
            ui.ctx().request_repaint_after(wait);
        }
    }

    fn dog_name_input(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Dog Name");
            let edit = ui.add(egui::TextEdit::singleline(&mut self.dog_input).hint_text("Toto"));
            if edit.changed() {
                let action = DogAction::TypedInDogInput(self.dog_input.clone());
                if let Err(never) = self.dog.dispatch(action) {
                    match never {}
                }
            }
        });
        let dog_name = &self.dog.state().dog_name;
        if !dog_name.is_empty() {
            ui.label(format!("{dog_name}, I've a feeling we're not in Kansas anymore"));
        }
    }

    fn cells(&mut self, ui: &mut egui::Ui) {
        let grid = &self.grid.state().grid;
        let (rows, columns) = self.config.clamp_view(*self.rows.value(), *self.columns.value());
        let (rows, columns) = (rows.min(grid.rows()), columns.min(grid.columns()));
        let dispatch = self.grid.dispatch_handle();
        let pitch = CELL_SIZE + SPACING;

        let size = Vec2::new(pitch * columns as f32, pitch * rows as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let origin = response.rect.min;

        let mut stats = GateStats::default();
        for row in 0..rows {
            for column in 0..columns {
                let (Some(index), Some(value)) = (grid.offset(row, column), grid.get(row, column)) else {
                    continue;
                };
                let input = CellRenderInput {
                    row,
                    column,
                    index,
                    content: ContentKey::from_value(value),
                    highlighted_index: self.hovered,
                    selected_item: self.selected,
                    dispatch,
                };
                let gate = &mut self.gates[index];
                gate.evaluate(input);
                stats.record(gate.last_verdict());
                let Some(visual) = gate.output() else {
                    continue;
                };

                let min = origin + Vec2::new(column as f32 * pitch, row as f32 * pitch);
                let rect = Rect::from_min_size(min, Vec2::splat(CELL_SIZE));
                painter.rect_filled(rect, 1.0, Color32::WHITE);
                painter.rect_filled(rect, 1.0, visual.fill);
                painter.rect_stroke(rect, 1.0, visual.stroke);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    &visual.label,
                    FontId::monospace(8.0),
                    visual.text,
                );
            }
        }
        self.stats = stats;

        // Map the pointer back to a cell
        let cell_at = |pos: egui::Pos2| {
            let local = pos - origin;
            let (row, column) = ((local.y / pitch) as usize, (local.x / pitch) as usize);
            (local.x >= 0.0 && local.y >= 0.0 && row < rows && column < columns).then_some((row, column))
        };

        let hovered = response.hover_pos().and_then(cell_at);
        let hovered_index = hovered.and_then(|(r, c)| grid.offset(r, c));

        let clicked = if response.clicked() {
            response.interact_pointer_pos().and_then(cell_at)
        } else {
            None
        };
        let right_clicked = if response.secondary_clicked() {
            response.interact_pointer_pos().and_then(cell_at).and_then(|(r, c)| grid.offset(r, c))
        } else {
            None
        };

        self.hovered = hovered_index;
        if let Some((row, column)) = clicked {
            self.dispatch_grid(GridAction::UpdateGridCell { row, column });
        }
        if let Some(index) = right_clicked {
            let id = ItemId(index as u64);
            self.selected = if self.selected == Some(id) { None } else { Some(id) };
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        self.controls(ui);

        ui.label("Click a cell to refresh its value, right-click to select it.");
        ui.label(format!(
            "Grid version {}  cells evaluated {}  recomputed {}  skipped {}",
            self.grid.version(),
            self.stats.evaluated,
            self.stats.recomputed,
            self.stats.skipped(),
        ));
        if let Some(err) = &self.last_error {
            ui.colored_label(Color32::RED, err.to_string());
        }

        ui.separator();

        egui::ScrollArea::both().max_height(700.0).show(ui, |ui| {
            self.cells(ui);
        });

        ui.separator();

        self.dog_name_input(ui);
    }
}
