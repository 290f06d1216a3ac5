use crate::data::model::VehicleTable;
use crate::data::stats::{self, BoxStats};

// ---------------------------------------------------------------------------
// Chart specifications – pure data, no egui types
// ---------------------------------------------------------------------------

/// Box statistics for one make, placed at `slot` on the category axis.
#[derive(Debug, Clone, PartialEq)]
pub struct MakeBox {
    pub make: String,
    pub slot: usize,
    pub stats: BoxStats,
}

/// One marker on the ratio chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioPoint {
    pub slot: usize,
    pub ratio: f64,
    pub hover: String,
}

/// One marker on the horsepower range chart.
#[derive(Debug, Clone, PartialEq)]
pub struct HorsepowerPoint {
    pub slot: usize,
    pub horsepower_hp: f64,
    pub hover: String,
}

/// Everything both charts need for one filtered view.
///
/// Built as a pure function of (base table, view); the UI layer only
/// maps this onto plot elements. Rebuilt from scratch on every filter
/// change – each build fully supersedes the previous one.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    /// Makes ascending by median hp_per_100_dollars within the view.
    /// Slot `i` on the box chart's x axis is `make_order[i]`.
    pub make_order: Vec<String>,
    pub boxes: Vec<MakeBox>,
    pub ratio_points: Vec<RatioPoint>,
    /// Median hp_per_100_dollars across the whole view; `None` for an
    /// empty view, which suppresses the reference line.
    pub overall_median: Option<f64>,
    /// Horsepower scatter, slotted against the reversed make order.
    pub hp_points: Vec<HorsepowerPoint>,
}

impl ChartData {
    /// Compute both chart specifications for the given filtered view.
    pub fn build(table: &VehicleTable, view: &[usize]) -> ChartData {
        let make_order = stats::makes_by_median_ratio(table, view);
        let slot_of = |make: &str| make_order.iter().position(|m| m == make);
        let last = make_order.len().saturating_sub(1);

        let mut boxes = Vec::with_capacity(make_order.len());
        for (slot, make) in make_order.iter().enumerate() {
            let values: Vec<f64> = view
                .iter()
                .map(|&i| &table.rows[i])
                .filter(|r| r.make == *make)
                .map(|r| r.hp_per_100_dollars)
                .collect();
            if let Some(stats) = BoxStats::from_values(&values) {
                boxes.push(MakeBox {
                    make: make.clone(),
                    slot,
                    stats,
                });
            }
        }

        let mut ratio_points = Vec::with_capacity(view.len());
        let mut hp_points = Vec::with_capacity(view.len());
        for &i in view {
            let row = &table.rows[i];
            let Some(slot) = slot_of(&row.make) else {
                continue;
            };
            ratio_points.push(RatioPoint {
                slot,
                ratio: row.hp_per_100_dollars,
                hover: row.hover_label(),
            });
            // The horsepower chart runs its category axis in reverse.
            hp_points.push(HorsepowerPoint {
                slot: last - slot,
                horsepower_hp: row.horsepower_hp,
                hover: row.hover_label(),
            });
        }

        let ratios: Vec<f64> = view
            .iter()
            .map(|&i| table.rows[i].hp_per_100_dollars)
            .collect();
        let overall_median = stats::median(&ratios);

        ChartData {
            make_order,
            boxes,
            ratio_points,
            overall_median,
            hp_points,
        }
    }

    /// Make order for the horsepower chart (reverse of the box chart).
    pub fn reversed_make_order(&self) -> Vec<String> {
        self.make_order.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterSelection};
    use crate::data::model::{VehicleTable, VehicleTrim};
    use crate::data::stats;

    fn row(make: &str, engine: &str, msrp: f64, hp: f64) -> VehicleTrim {
        VehicleTrim {
            make: make.to_string(),
            model: "M".to_string(),
            trim: "T".to_string(),
            year: 2020,
            description: String::new(),
            msrp,
            invoice: msrp,
            engine_type: engine.to_string(),
            fuel_type: "Gas".to_string(),
            horsepower_hp: hp,
            hp_per_100_dollars: hp / msrp * 100.0,
            price_bucket: 0,
            price_label: String::new(),
        }
    }

    fn sample_table() -> VehicleTable {
        VehicleTable::from_rows(vec![
            row("Pricey", "V6", 90_000.0, 300.0), // ratio 0.333
            row("Value", "I4", 20_000.0, 200.0),  // ratio 1.0
            row("Mid", "V6", 40_000.0, 250.0),    // ratio 0.625
            row("Mid", "V6", 50_000.0, 250.0),    // ratio 0.5
        ])
    }

    #[test]
    fn make_order_matches_median_ranking_and_reverses() {
        let table = sample_table();
        let view: Vec<usize> = (0..table.len()).collect();
        let data = ChartData::build(&table, &view);

        assert_eq!(data.make_order, stats::makes_by_median_ratio(&table, &view));
        assert_eq!(data.make_order, vec!["Pricey", "Mid", "Value"]);
        assert_eq!(data.reversed_make_order(), vec!["Value", "Mid", "Pricey"]);
    }

    #[test]
    fn every_view_row_appears_on_both_charts() {
        let table = sample_table();
        let view: Vec<usize> = (0..table.len()).collect();
        let data = ChartData::build(&table, &view);

        assert_eq!(data.ratio_points.len(), view.len());
        assert_eq!(data.hp_points.len(), view.len());
        // Horsepower slots mirror the ratio slots.
        for (rp, hp) in data.ratio_points.iter().zip(&data.hp_points) {
            assert_eq!(hp.slot, data.make_order.len() - 1 - rp.slot);
        }
    }

    #[test]
    fn empty_view_has_no_reference_line() {
        let table = sample_table();
        let data = ChartData::build(&table, &[]);
        assert!(data.make_order.is_empty());
        assert!(data.boxes.is_empty());
        assert!(data.ratio_points.is_empty());
        assert!(data.hp_points.is_empty());
        assert_eq!(data.overall_median, None);
    }

    #[test]
    fn reference_median_reflects_the_filtered_view_only() {
        let table = sample_table();
        let mut selection = FilterSelection::default();
        selection.engine_types.insert("V6".to_string());
        let view = filtered_indices(&table, &selection);
        let data = ChartData::build(&table, &view);

        // V6 rows only: ratios 0.333…, 0.625, 0.5 → median 0.5.
        for &i in &view {
            assert_eq!(table.rows[i].engine_type, "V6");
        }
        assert_eq!(data.overall_median, Some(0.5));
        assert!(!data.make_order.contains(&"Value".to_string()));
    }

    #[test]
    fn one_box_per_make_in_view() {
        let table = sample_table();
        let view: Vec<usize> = (0..table.len()).collect();
        let data = ChartData::build(&table, &view);
        assert_eq!(data.boxes.len(), 3);
        for (i, b) in data.boxes.iter().enumerate() {
            assert_eq!(b.slot, i);
            assert_eq!(b.make, data.make_order[i]);
        }
    }
}
