use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::model::{VehicleTable, VehicleTrim};

// ---------------------------------------------------------------------------
// Raw snapshot schema
// ---------------------------------------------------------------------------

/// One raw record as the catalog API returns it. Identifier and audit
/// fields (ids, created/modified timestamps) are not declared here, so
/// serde drops them during deserialization.
#[derive(Debug, Deserialize)]
struct RawEngineRecord {
    engine_type: Option<String>,
    fuel_type: Option<String>,
    horsepower_hp: Option<f64>,
    make_model_trim: Option<RawTrim>,
}

#[derive(Debug, Deserialize)]
struct RawTrim {
    /// Trim name, e.g. "Sport".
    name: Option<String>,
    year: Option<i32>,
    description: Option<String>,
    msrp: Option<f64>,
    invoice: Option<f64>,
    make_model: Option<RawMakeModel>,
}

#[derive(Debug, Deserialize)]
struct RawMakeModel {
    name: Option<String>,
    make: Option<RawMake>,
}

#[derive(Debug, Deserialize)]
struct RawMake {
    name: Option<String>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the snapshot written by the fetcher into the base table.
///
/// Expected shape: a JSON array of engine records, each with a nested
/// `make_model_trim` sub-object carrying trim/model/make detail:
///
/// ```json
/// [
///   {
///     "engine_type": "gas",
///     "fuel_type": "premium unleaded",
///     "horsepower_hp": 272,
///     "make_model_trim": {
///       "name": "A-Spec", "year": 2020, "msrp": 38000, "invoice": 36100,
///       "make_model": { "name": "TLX", "make": { "name": "Acura" } }
///     }
///   }
/// ]
/// ```
///
/// Rows with missing structure, missing horsepower, or a non-positive
/// msrp are dropped (the ratio and price buckets are undefined for
/// them); the dropped count is logged.
pub fn load_snapshot(path: &Path) -> Result<VehicleTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let raw: Vec<RawEngineRecord> =
        serde_json::from_str(&text).context("parsing snapshot JSON")?;

    let total = raw.len();
    let rows: Vec<VehicleTrim> = raw.into_iter().filter_map(flatten_record).collect();

    let dropped = total - rows.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} of {total} records with missing fields or invalid msrp");
    }

    Ok(VehicleTable::from_rows(rows))
}

/// Flatten one nested record into a row, or `None` when a required
/// field is absent or msrp is not positive.
fn flatten_record(raw: RawEngineRecord) -> Option<VehicleTrim> {
    let trim = raw.make_model_trim?;
    let make_model = trim.make_model?;
    let make = make_model.make?.name?;
    let model = make_model.name?;
    let trim_name = trim.name?;

    let msrp = trim.msrp?;
    if msrp <= 0.0 {
        return None;
    }
    let horsepower_hp = raw.horsepower_hp?;

    Some(VehicleTrim {
        make,
        model,
        trim: trim_name,
        year: trim.year.unwrap_or(0),
        description: trim.description.unwrap_or_default(),
        msrp,
        invoice: trim.invoice.unwrap_or(0.0),
        engine_type: title_case(&raw.engine_type.unwrap_or_default()),
        fuel_type: title_case(&raw.fuel_type.unwrap_or_default()),
        horsepower_hp,
        hp_per_100_dollars: horsepower_hp / msrp * 100.0,
        price_bucket: 0,
        price_label: String::new(),
    })
}

/// Title-case a categorical value: uppercase every letter that follows
/// a non-letter, lowercase the rest ("premium unleaded (required)" →
/// "Premium Unleaded (Required)").
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
