use eframe::egui;

use crate::fetch;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrimscopeApp {
    pub state: AppState,
}

impl Default for TrimscopeApp {
    fn default() -> Self {
        let mut state = AppState::default();

        // The fetcher writes the default snapshot; load it if present.
        let path = fetch::snapshot_path("engines");
        if path.exists() {
            state.load_from(&path);
        } else {
            state.status_message = Some(format!(
                "No snapshot at {} – run fetch_trims or use File → Open",
                path.display()
            ));
        }

        Self { state }
    }
}

impl eframe::App for TrimscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::filter_panel(ui, &mut self.state);
            });

        // ---- Central panel: the two charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::charts_panel(ui, &self.state);
        });
    }
}
