use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, FilterField};

// ---------------------------------------------------------------------------
// Left side panel – the four filter dropdowns
// ---------------------------------------------------------------------------

/// Render the filter panel: engine type, price range, make, fuel type.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No snapshot loaded.");
        return;
    };

    // Option lists are fixed at load; clone so we can mutate state below.
    let engine_types = table.engine_types.clone();
    let price_labels = table.price_labels();
    let makes = table.makes.clone();
    let fuel_types = table.fuel_types.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            filter_dropdown(ui, state, "Engine type", FilterField::EngineType, &engine_types);
            filter_dropdown(ui, state, "Price range", FilterField::PriceLabel, &price_labels);
            filter_dropdown(ui, state, "Make", FilterField::Make, &makes);
            filter_dropdown(ui, state, "Fuel type", FilterField::FuelType, &fuel_types);

            ui.add_space(8.0);
            if ui.button("Clear all filters").clicked() {
                state.clear_all_filters();
            }
        });
}

/// One multi-select dropdown. An empty selection means "no filter".
fn filter_dropdown(
    ui: &mut Ui,
    state: &mut AppState,
    title: &str,
    field: FilterField,
    options: &[String],
) {
    let n_selected = state.selected(field).len();
    let header = if n_selected == 0 {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({n_selected} selected)")
    };

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                state.clear_filter(field);
            }
            for value in options {
                let mut checked = state.selected(field).contains(value);
                if ui.checkbox(&mut checked, value).changed() {
                    state.toggle_filter_value(field, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / banner bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open snapshot…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("2020 Vehicles");
        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} trims loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open trim snapshot")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}
