use crate::data::stats::{self, PriceBucket};

/// Number of equal-frequency price buckets over msrp.
pub const PRICE_BUCKETS: usize = 5;

// ---------------------------------------------------------------------------
// VehicleTrim – one row of the flattened table
// ---------------------------------------------------------------------------

/// A single trim configuration (one row per make/model/year/trim).
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleTrim {
    pub make: String,
    pub model: String,
    pub trim: String,
    pub year: i32,
    pub description: String,
    /// Manufacturer's suggested retail price. Always > 0 for retained rows.
    pub msrp: f64,
    pub invoice: f64,
    /// Title-cased, e.g. "V6".
    pub engine_type: String,
    /// Title-cased, e.g. "Gas".
    pub fuel_type: String,
    pub horsepower_hp: f64,
    /// horsepower_hp / msrp * 100 – how much power $100 buys.
    pub hp_per_100_dollars: f64,
    /// Index into [`VehicleTable::price_buckets`], ascending by price.
    pub price_bucket: usize,
    /// Human-readable bucket label, e.g. "$18,120 to $27,600".
    pub price_label: String,
}

impl VehicleTrim {
    /// Hover text shown on individual chart markers.
    pub fn hover_label(&self) -> String {
        format!(
            "{}: {} {:.0}hp ${:.0}",
            self.model, self.trim, self.horsepower_hp, self.msrp
        )
    }
}

// ---------------------------------------------------------------------------
// VehicleTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable base table plus option lists computed once at load.
///
/// Filtered views are `Vec<usize>` index lists derived per interaction;
/// the table itself never changes for the life of the session.
#[derive(Debug, Clone)]
pub struct VehicleTable {
    /// All retained rows, in snapshot (page/arrival) order.
    pub rows: Vec<VehicleTrim>,
    /// Sorted unique engine types.
    pub engine_types: Vec<String>,
    /// Sorted unique makes.
    pub makes: Vec<String>,
    /// Sorted unique fuel types.
    pub fuel_types: Vec<String>,
    /// The five price buckets in ascending order, with their labels.
    pub price_buckets: Vec<PriceBucket>,
}

impl VehicleTable {
    /// Assign price buckets and build the option lists from cleaned rows.
    ///
    /// Rows must already have valid msrp (> 0); bucket boundaries are
    /// fixed here from the full dataset and never recomputed per filter.
    pub fn from_rows(mut rows: Vec<VehicleTrim>) -> Self {
        let price_buckets = stats::assign_price_buckets(&mut rows, PRICE_BUCKETS);

        let mut engine_types: Vec<String> =
            rows.iter().map(|r| r.engine_type.clone()).collect();
        engine_types.sort();
        engine_types.dedup();

        let mut makes: Vec<String> = rows.iter().map(|r| r.make.clone()).collect();
        makes.sort();
        makes.dedup();

        let mut fuel_types: Vec<String> =
            rows.iter().map(|r| r.fuel_type.clone()).collect();
        fuel_types.sort();
        fuel_types.dedup();

        VehicleTable {
            rows,
            engine_types,
            makes,
            fuel_types,
            price_buckets,
        }
    }

    /// Bucket labels in ascending price order (dropdown option list).
    pub fn price_labels(&self) -> Vec<String> {
        self.price_buckets.iter().map(|b| b.label.clone()).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
