use crate::data::model::{VehicleTable, VehicleTrim};

// ---------------------------------------------------------------------------
// Basic order statistics
// ---------------------------------------------------------------------------

/// Median of a slice. `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Linearly interpolated percentile over an ascending-sorted slice.
/// `q` in [0, 1].
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = q * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Box-plot statistics (Tukey)
// ---------------------------------------------------------------------------

/// Five-number summary with whiskers clamped to 1.5×IQR fences.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub quartile1: f64,
    pub median: f64,
    pub quartile3: f64,
    pub upper_whisker: f64,
    /// Points beyond the whisker fences.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Compute box statistics for a non-empty set of values.
    pub fn from_values(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let quartile1 = percentile_sorted(&sorted, 0.25);
        let med = percentile_sorted(&sorted, 0.50);
        let quartile3 = percentile_sorted(&sorted, 0.75);
        let iqr = quartile3 - quartile1;
        let lower_fence = quartile1 - 1.5 * iqr;
        let upper_fence = quartile3 + 1.5 * iqr;

        // Whiskers sit on the most extreme observations inside the fences.
        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| *v >= lower_fence)
            .unwrap_or(quartile1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= upper_fence)
            .unwrap_or(quartile3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_fence || *v > upper_fence)
            .collect();

        Some(BoxStats {
            lower_whisker,
            quartile1,
            median: med,
            quartile3,
            upper_whisker,
            outliers,
        })
    }
}

// ---------------------------------------------------------------------------
// Equal-frequency price buckets
// ---------------------------------------------------------------------------

/// One of the ascending price buckets, with its observed msrp range.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBucket {
    /// "$<min> to $<max>", whole dollars with thousands separators.
    pub label: String,
    pub min_msrp: f64,
    pub max_msrp: f64,
    /// Number of rows assigned to this bucket.
    pub count: usize,
}

/// Format a dollar amount as whole dollars with comma separators.
pub fn format_dollars(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if whole < 0 {
        format!("-${out}")
    } else {
        format!("${out}")
    }
}

/// Partition rows into `n` equal-frequency buckets by msrp and stamp
/// each row's `price_bucket` / `price_label` in place.
///
/// Assignment is rank based: the row at sorted position `p` of `len`
/// goes to bucket `p * n / len`, so bucket sizes differ by at most one
/// row from an exact even split. Rows sharing an msrp value may land on
/// either side of a boundary.
pub fn assign_price_buckets(rows: &mut [VehicleTrim], n: usize) -> Vec<PriceBucket> {
    if rows.is_empty() || n == 0 {
        return Vec::new();
    }

    let len = rows.len();
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_by(|&a, &b| rows[a].msrp.total_cmp(&rows[b].msrp));

    // First pass: bucket index per row, plus observed min/max per bucket.
    let mut ranges: Vec<Option<(f64, f64, usize)>> = vec![None; n];
    for (pos, &row_idx) in order.iter().enumerate() {
        let bucket = pos * n / len;
        let msrp = rows[row_idx].msrp;
        rows[row_idx].price_bucket = bucket;
        let entry = ranges[bucket].get_or_insert((msrp, msrp, 0));
        entry.0 = entry.0.min(msrp);
        entry.1 = entry.1.max(msrp);
        entry.2 += 1;
    }

    // Fewer rows than buckets leaves gaps; compact and remap indices.
    let mut remap = vec![0usize; n];
    let mut buckets = Vec::new();
    for (i, range) in ranges.iter().enumerate() {
        if let Some((min_msrp, max_msrp, count)) = range {
            remap[i] = buckets.len();
            buckets.push(PriceBucket {
                label: format!(
                    "{} to {}",
                    format_dollars(*min_msrp),
                    format_dollars(*max_msrp)
                ),
                min_msrp: *min_msrp,
                max_msrp: *max_msrp,
                count: *count,
            });
        }
    }
    for row in rows.iter_mut() {
        row.price_bucket = remap[row.price_bucket];
        row.price_label = buckets[row.price_bucket].label.clone();
    }

    buckets
}

// ---------------------------------------------------------------------------
// Per-make median ordering for the chart category axes
// ---------------------------------------------------------------------------

/// Makes present in `view`, sorted ascending by their median
/// hp_per_100_dollars within the view. Ties break alphabetically so the
/// ordering is deterministic. Recomputed on every filter change.
pub fn makes_by_median_ratio(table: &VehicleTable, view: &[usize]) -> Vec<String> {
    let mut by_make: Vec<(String, Vec<f64>)> = Vec::new();
    for &idx in view {
        let row = &table.rows[idx];
        match by_make.iter_mut().find(|(make, _)| *make == row.make) {
            Some((_, vals)) => vals.push(row.hp_per_100_dollars),
            None => by_make.push((row.make.clone(), vec![row.hp_per_100_dollars])),
        }
    }

    let mut ranked: Vec<(String, f64)> = by_make
        .into_iter()
        .map(|(make, vals)| {
            let med = median(&vals).unwrap_or(f64::NAN);
            (make, med)
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().map(|(make, _)| make).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::VehicleTable;

    fn row(make: &str, msrp: f64, hp: f64) -> VehicleTrim {
        VehicleTrim {
            make: make.to_string(),
            model: "M".to_string(),
            trim: "T".to_string(),
            year: 2020,
            description: String::new(),
            msrp,
            invoice: msrp,
            engine_type: "V6".to_string(),
            fuel_type: "Gas".to_string(),
            horsepower_hp: hp,
            hp_per_100_dollars: hp / msrp * 100.0,
            price_bucket: 0,
            price_label: String::new(),
        }
    }

    #[test]
    fn median_odd_even_empty() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn box_stats_quartiles() {
        let vals = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = BoxStats::from_values(&vals).unwrap();
        assert_eq!(stats.quartile1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.quartile3, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 5.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn box_stats_clamps_whiskers_and_flags_outliers() {
        // IQR = 2, fences at -1 and 7; 100 is an outlier.
        let vals = [1.0, 2.0, 3.0, 4.0, 100.0];
        let stats = BoxStats::from_values(&vals).unwrap();
        assert_eq!(stats.upper_whisker, 4.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn dollar_formatting() {
        assert_eq!(format_dollars(950.0), "$950");
        assert_eq!(format_dollars(18_120.4), "$18,120");
        assert_eq!(format_dollars(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn buckets_split_evenly_with_nondecreasing_bounds() {
        // 23 rows over 5 buckets: sizes must be 4 or 5.
        let mut rows: Vec<VehicleTrim> = (0..23)
            .map(|i| row("A", 18_000.0 + i as f64 * 3_000.0, 200.0))
            .collect();
        let buckets = assign_price_buckets(&mut rows, 5);

        assert_eq!(buckets.len(), 5);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 23);
        for b in &buckets {
            assert!(b.count == 4 || b.count == 5, "uneven bucket: {}", b.count);
        }
        for pair in buckets.windows(2) {
            assert!(pair[0].max_msrp <= pair[1].min_msrp);
        }
        // Every row carries the label of its bucket.
        for r in &rows {
            assert_eq!(r.price_label, buckets[r.price_bucket].label);
            assert!(r.msrp >= buckets[r.price_bucket].min_msrp);
            assert!(r.msrp <= buckets[r.price_bucket].max_msrp);
        }
    }

    #[test]
    fn bucket_labels_use_observed_range() {
        let mut rows = vec![row("A", 18_120.0, 200.0), row("A", 27_600.0, 200.0)];
        let buckets = assign_price_buckets(&mut rows, 2);
        assert_eq!(buckets[0].label, "$18,120 to $18,120");
        assert_eq!(buckets[1].label, "$27,600 to $27,600");
    }

    #[test]
    fn make_order_ascending_by_median() {
        // Cheap-power make first: higher ratio sorts later.
        let rows = vec![
            row("Pricey", 90_000.0, 300.0), // ratio 0.333
            row("Value", 20_000.0, 200.0),  // ratio 1.0
            row("Mid", 40_000.0, 250.0),    // ratio 0.625
        ];
        let table = VehicleTable::from_rows(rows);
        let view: Vec<usize> = (0..table.len()).collect();
        let order = makes_by_median_ratio(&table, &view);
        assert_eq!(order, vec!["Pricey", "Mid", "Value"]);
    }

    #[test]
    fn make_order_only_covers_view() {
        let rows = vec![
            row("A", 20_000.0, 200.0),
            row("B", 30_000.0, 200.0),
        ];
        let table = VehicleTable::from_rows(rows);
        let order = makes_by_median_ratio(&table, &[1]);
        assert_eq!(order, vec!["B"]);
    }
}
