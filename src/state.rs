use std::path::Path;

use crate::color::MakeColorMap;
use crate::data::chart::ChartData;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader;
use crate::data::model::VehicleTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which dropdown a toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    EngineType,
    PriceLabel,
    Make,
    FuelType,
}

/// The full UI state, independent of rendering.
///
/// `table` is the immutable base table; everything else is derived from
/// it and the current filter selection. Changing any dropdown rebuilds
/// `visible_indices` and `chart_data` in full.
pub struct AppState {
    /// Loaded base table (None until a snapshot is loaded).
    pub table: Option<VehicleTable>,

    /// Current dropdown selections (empty set = no filter).
    pub selection: FilterSelection,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart specifications for the current view (cached).
    pub chart_data: ChartData,

    /// Stable make → colour assignment from the full table.
    pub make_colors: Option<MakeColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            chart_data: ChartData::default(),
            make_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: reset filters, show everything.
    pub fn set_table(&mut self, table: VehicleTable) {
        self.selection.clear();
        self.visible_indices = (0..table.len()).collect();
        self.chart_data = ChartData::build(&table, &self.visible_indices);
        self.make_colors = Some(MakeColorMap::new(&table.makes));
        self.table = Some(table);
        self.status_message = None;
    }

    /// Load a snapshot file, replacing the table on success and showing
    /// the error in the top bar otherwise.
    pub fn load_from(&mut self, path: &Path) {
        match loader::load_snapshot(path) {
            Ok(table) => {
                log::info!(
                    "loaded {} trims across {} makes from {}",
                    table.len(),
                    table.makes.len(),
                    path.display()
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("failed to load snapshot: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute the view and both chart specs after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.selection);
            self.chart_data = ChartData::build(table, &self.visible_indices);
        }
    }

    /// Current selection for one dropdown.
    pub fn selected(&self, field: FilterField) -> &std::collections::BTreeSet<String> {
        match field {
            FilterField::EngineType => &self.selection.engine_types,
            FilterField::PriceLabel => &self.selection.price_labels,
            FilterField::Make => &self.selection.makes,
            FilterField::FuelType => &self.selection.fuel_types,
        }
    }

    fn field_set(&mut self, field: FilterField) -> &mut std::collections::BTreeSet<String> {
        match field {
            FilterField::EngineType => &mut self.selection.engine_types,
            FilterField::PriceLabel => &mut self.selection.price_labels,
            FilterField::Make => &mut self.selection.makes,
            FilterField::FuelType => &mut self.selection.fuel_types,
        }
    }

    /// Toggle one value in a dropdown's selection.
    pub fn toggle_filter_value(&mut self, field: FilterField, value: &str) {
        let selected = self.field_set(field);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Clear one dropdown (back to "no filter").
    pub fn clear_filter(&mut self, field: FilterField) {
        self.field_set(field).clear();
        self.refilter();
    }

    /// Clear every dropdown.
    pub fn clear_all_filters(&mut self) {
        self.selection.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::VehicleTrim;
    use crate::data::stats;

    /// 500 rows, msrp spread over $18,000–$95,000, mixed engine types.
    fn scenario_table() -> VehicleTable {
        let makes = ["Acura", "BMW", "Chevrolet", "Dodge", "Elantra"];
        let rows: Vec<VehicleTrim> = (0..500)
            .map(|i| {
                let msrp = 18_000.0 + (i as f64 / 499.0) * 77_000.0;
                let hp = 120.0 + (i % 37) as f64 * 10.0;
                let engine = if i % 3 == 0 { "V6" } else { "I4" };
                VehicleTrim {
                    make: makes[i % makes.len()].to_string(),
                    model: format!("Model{}", i % 11),
                    trim: "Base".to_string(),
                    year: 2020,
                    description: String::new(),
                    msrp,
                    invoice: msrp * 0.95,
                    engine_type: engine.to_string(),
                    fuel_type: "Gas".to_string(),
                    horsepower_hp: hp,
                    hp_per_100_dollars: hp / msrp * 100.0,
                    price_bucket: 0,
                    price_label: String::new(),
                }
            })
            .collect();
        VehicleTable::from_rows(rows)
    }

    #[test]
    fn v6_filter_scenario() {
        let mut state = AppState::default();
        state.set_table(scenario_table());
        assert_eq!(state.visible_indices.len(), 500);

        state.toggle_filter_value(FilterField::EngineType, "V6");

        let table = state.table.as_ref().unwrap();
        assert!(!state.visible_indices.is_empty());
        for &i in &state.visible_indices {
            assert_eq!(table.rows[i].engine_type, "V6");
        }

        // Reference line = median ratio among V6 rows only.
        let v6_ratios: Vec<f64> = table
            .rows
            .iter()
            .filter(|r| r.engine_type == "V6")
            .map(|r| r.hp_per_100_dollars)
            .collect();
        assert_eq!(
            state.chart_data.overall_median,
            stats::median(&v6_ratios)
        );
    }

    #[test]
    fn price_bucket_scenario() {
        let mut state = AppState::default();
        state.set_table(scenario_table());
        let bucket = state.table.as_ref().unwrap().price_buckets[0].clone();

        state.toggle_filter_value(FilterField::PriceLabel, &bucket.label);

        let table = state.table.as_ref().unwrap();
        assert_eq!(state.visible_indices.len(), bucket.count);
        for &i in &state.visible_indices {
            let msrp = table.rows[i].msrp;
            assert!(msrp >= bucket.min_msrp && msrp <= bucket.max_msrp);
        }
    }

    #[test]
    fn toggling_twice_restores_the_full_view() {
        let mut state = AppState::default();
        state.set_table(scenario_table());

        state.toggle_filter_value(FilterField::Make, "Acura");
        assert!(state.visible_indices.len() < 500);
        state.toggle_filter_value(FilterField::Make, "Acura");
        assert_eq!(state.visible_indices.len(), 500);
    }

    #[test]
    fn clear_all_resets_the_view() {
        let mut state = AppState::default();
        state.set_table(scenario_table());
        state.toggle_filter_value(FilterField::FuelType, "Diesel");
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.chart_data.overall_median, None);

        state.clear_all_filters();
        assert_eq!(state.visible_indices.len(), 500);
        assert!(state.chart_data.overall_median.is_some());
    }

    #[test]
    fn load_failure_sets_status_message() {
        let mut state = AppState::default();
        state.load_from(Path::new("no/such/snapshot.json"));
        assert!(state.table.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }
}
