use std::collections::BTreeSet;

use super::model::VehicleTable;

// ---------------------------------------------------------------------------
// Filter predicate: the four multi-select dropdowns
// ---------------------------------------------------------------------------

/// Selected values per dropdown. An empty set means "no filter" for that
/// dropdown (every row passes), matching multi-select pickers that start
/// out blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub engine_types: BTreeSet<String>,
    pub price_labels: BTreeSet<String>,
    pub makes: BTreeSet<String>,
    pub fuel_types: BTreeSet<String>,
}

impl FilterSelection {
    /// True when no dropdown has a selection (view = full table).
    pub fn is_empty(&self) -> bool {
        self.engine_types.is_empty()
            && self.price_labels.is_empty()
            && self.makes.is_empty()
            && self.fuel_types.is_empty()
    }

    /// Clear every dropdown.
    pub fn clear(&mut self) {
        self.engine_types.clear();
        self.price_labels.clear();
        self.makes.clear();
        self.fuel_types.clear();
    }
}

/// Return indices of rows passing all active filters (logical AND).
///
/// A row passes a dropdown when:
/// * The dropdown's selection is empty → passes (no constraint)
/// * The row's value is in the selected set → passes
pub fn filtered_indices(table: &VehicleTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            (selection.engine_types.is_empty()
                || selection.engine_types.contains(&row.engine_type))
                && (selection.price_labels.is_empty()
                    || selection.price_labels.contains(&row.price_label))
                && (selection.makes.is_empty() || selection.makes.contains(&row.make))
                && (selection.fuel_types.is_empty()
                    || selection.fuel_types.contains(&row.fuel_type))
        })
        .map(|(i, _)| i)
        .collect()
}
