//! Vehicle trim spec dashboard: a paginated catalog fetcher writes a
//! JSON snapshot, the data layer flattens it into an immutable
//! one-row-per-trim table, and an egui app renders a box-plot chart and
//! a horsepower scatter behind four multi-select filters.

pub mod app;
pub mod color;
pub mod data;
pub mod fetch;
pub mod state;
pub mod ui;
