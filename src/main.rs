// main.rs - Render-performance workbench
// Three exercises sharing one tokio runtime: deferred globe, city filter, grid

use eframe::egui;
use tracing_subscriber::EnvFilter;

mod city_panel;   // Memoized/offloaded filtering with gated list items
mod globe_panel;  // Deferred loading of the globe module
mod grid_panel;   // Grid store, dog store and gated cells
mod ui;           // eframe::App impl

use city_panel::CityPanel;
use globe_panel::GlobePanel;
use grid_panel::GridPanel;

const DEFAULT_LOG_FILTER: &str = "perf_grid=info,perf_core=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Render Performance Workbench",
        options,
        Box::new(move |_cc| Box::new(Workbench::new(runtime))),
    )?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exercise {
    Globe,
    Cities,
    Grid,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [Exercise::Globe, Exercise::Cities, Exercise::Grid];

    pub fn name(self) -> &'static str {
        match self {
            Exercise::Globe => "Code splitting",
            Exercise::Cities => "Expensive list filtering",
            Exercise::Grid => "Death by a thousand cuts",
        }
    }
}

pub struct Workbench {
    pub exercise: Exercise,
    pub forced_renders: u64,
    pub globe: GlobePanel,
    pub cities: CityPanel,
    pub grid: GridPanel,

    // Kept alive for the panels' task handles
    _runtime: tokio::runtime::Runtime,
}

impl Workbench {
    fn new(runtime: tokio::runtime::Runtime) -> Self {
        let handle = runtime.handle().clone();
        Self {
            exercise: Exercise::Grid,
            forced_renders: 0,
            globe: GlobePanel::new(handle.clone()),
            cities: CityPanel::new(handle),
            grid: GridPanel::default(),
            _runtime: runtime,
        }
    }
}
