/// Data layer: core types, loading, filtering, and chart math.
///
/// Architecture:
/// ```text
///  data/engines_data.json (fetcher snapshot)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  flatten nested records → VehicleTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ VehicleTable  │  immutable rows + price buckets + option lists
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ──▶ │  chart    │  view indices → ChartData
///   └──────────┘     └──────────┘
/// ```

pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
