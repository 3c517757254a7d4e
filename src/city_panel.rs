// city_panel.rs - Filterable city combobox with gated list items

use eframe::egui;
use egui::{Key, RichText};
use perf_core::cities::{City, city_by_id};
use perf_core::combobox::{Combobox, SelectionChange};
use perf_core::config::MAX_VISIBLE_ITEMS;
use perf_core::filter::{Memo, filter_cities};
use perf_core::task::{AsyncFilter, AsyncStatus};
use perf_core::{CellRenderInput, DispatchHandle, GateStats, ItemId, RenderGate, with_render_gate};
use tokio::runtime::Handle;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemVisual {
    label: String,
    selected: bool,
    highlighted: bool,
}

type ItemGate = RenderGate<CellRenderInput, ItemVisual, fn(&CellRenderInput) -> ItemVisual>;

fn item_visual(input: &CellRenderInput) -> ItemVisual {
    let id = ItemId(input.content.0);
    let label = city_by_id(id)
        .map(|city| format!("{} ({})", city.name, city.country))
        .unwrap_or_default();
    ItemVisual {
        label,
        selected: input.selected_item == Some(id),
        highlighted: input.is_highlighted(),
    }
}

fn new_gate() -> ItemGate {
    with_render_gate(item_visual as fn(&CellRenderInput) -> ItemVisual)
}

pub struct CityPanel {
    combobox: Combobox,
    input: String,
    offload: bool,
    task: AsyncFilter,
    memo: Memo<String, Vec<City>>,
    gates: Vec<ItemGate>,
    dispatch: DispatchHandle,
    stats: GateStats,
    message: Option<String>,
}

impl CityPanel {
    pub fn new(runtime: Handle) -> Self {
        let mut task = AsyncFilter::new(runtime);
        task.run("");
        Self {
            combobox: Combobox::new(),
            input: String::new(),
            offload: true,
            task,
            memo: Memo::new(),
            gates: Vec::new(),
            dispatch: DispatchHandle::fresh(),
            stats: GateStats::default(),
            message: None,
        }
    }

    fn refilter(&mut self) {
        if self.offload {
            self.task.run(&self.input);
        }
    }

    fn visible_items(&mut self) -> Vec<City> {
        let all = if self.offload {
            self.task.poll();
            self.task.data()
        } else {
            // Recomputed only when the input changed
            self.memo.get_or_compute(&self.input, |query| filter_cities(query)).as_slice()
        };
        all.iter().take(MAX_VISIBLE_ITEMS).copied().collect()
    }

    fn apply_selection(&mut self, change: Option<SelectionChange>) {
        let Some(change) = change else {
            return;
        };
        let message = match change {
            SelectionChange::Selected(id) => match city_by_id(id) {
                Some(city) => format!("You selected {}", city.name),
                None => "You selected an unknown city".to_string(),
            },
            SelectionChange::Cleared => "Selection Cleared".to_string(),
        };
        info!(%message, "selection changed");
        self.message = Some(message);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let mut input_focused = false;
        ui.horizontal(|ui| {
            ui.label("Find a city");
            let edit = ui.text_edit_singleline(&mut self.input);
            input_focused = edit.has_focus();
            if edit.changed() && self.combobox.set_input(&self.input) {
                self.refilter();
            }
            if ui.button("✕").on_hover_text("clear selection").clicked() {
                let change = self.combobox.clear_selection();
                self.apply_selection(change);
            }
        });

        ui.horizontal(|ui| {
            if ui.checkbox(&mut self.offload, "filter on background task").changed() {
                self.refilter();
            }
            ui.separator();
            let status = match self.task.status() {
                AsyncStatus::Idle => "idle".to_string(),
                AsyncStatus::Pending => "pending".to_string(),
                AsyncStatus::Resolved => "resolved".to_string(),
                AsyncStatus::Rejected(err) => err.to_string(),
            };
            if self.offload {
                ui.label(format!("Task: {status} (run #{})", self.task.generation()));
            } else {
                ui.label(format!("Memo computations: {}", self.memo.compute_count()));
            }
        });

        let items = self.visible_items();
        self.combobox.set_item_count(items.len());
        if self.task.status() == &AsyncStatus::Pending {
            ui.ctx().request_repaint();
        }

        if input_focused {
            ui.input(|i| {
                if i.key_pressed(Key::ArrowDown) {
                    self.combobox.highlight_next();
                }
                if i.key_pressed(Key::ArrowUp) {
                    self.combobox.highlight_prev();
                }
            });
            if ui.input(|i| i.key_pressed(Key::Enter)) {
                if let Some(city) = self.combobox.highlighted_index().and_then(|i| items.get(i)) {
                    let change = self.combobox.select(city.id);
                    self.apply_selection(change);
                }
            }
        }

        if let Some(message) = &self.message {
            ui.label(message.as_str());
        }
        ui.label(format!(
            "Items: {}  evaluated {}  recomputed {}  skipped {}",
            items.len(),
            self.stats.evaluated,
            self.stats.recomputed,
            self.stats.skipped(),
        ));
        ui.separator();

        if self.gates.len() < items.len() {
            self.gates.resize_with(items.len(), new_gate);
        }

        let highlighted_index = self.combobox.highlighted_index();
        let selected_item = self.combobox.selected_item();
        let mut hovered = None;
        let mut clicked = None;
        let mut stats = GateStats::default();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, city) in items.iter().enumerate() {
                let input = CellRenderInput {
                    row: index,
                    column: 0,
                    index,
                    content: city.id.into(),
                    highlighted_index,
                    selected_item,
                    dispatch: self.dispatch,
                };
                let gate = &mut self.gates[index];
                gate.evaluate(input);
                stats.record(gate.last_verdict());
                let Some(visual) = gate.output() else {
                    continue;
                };

                let mut text = RichText::new(visual.label.as_str());
                if visual.selected {
                    text = text.strong();
                }
                let response = ui.selectable_label(visual.highlighted, text);
                if response.hovered() {
                    hovered = Some(index);
                }
                if response.clicked() {
                    clicked = Some(city.id);
                }
            }
        });
        self.stats = stats;

        if hovered.is_some() && hovered != highlighted_index {
            self.combobox.highlight(hovered);
        }
        if let Some(id) = clicked {
            let change = self.combobox.select(id);
            self.apply_selection(change);
        }
    }
}
