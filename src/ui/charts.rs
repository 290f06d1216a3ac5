use eframe::egui::{Color32, Ui};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, HLine, Plot, Points};

use crate::state::AppState;

const MARKER_COLOR: Color32 = Color32::from_rgb(0xff, 0xa5, 0x00);

// ---------------------------------------------------------------------------
// Chart panels (central area)
// ---------------------------------------------------------------------------

/// Render both charts side by side from the cached [`ChartData`].
///
/// [`ChartData`]: crate::data::chart::ChartData
pub fn charts_panel(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a snapshot to view trims  (File → Open snapshot…)");
        });
        return;
    }

    ui.columns(2, |columns| {
        ratio_box_chart(&mut columns[0], state);
        horsepower_chart(&mut columns[1], state);
    });
}

/// Chart 1: per-make box plot of hp_per_100_dollars, every point
/// overlaid as a marker, plus the overall-median reference line.
fn ratio_box_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("How much horsepower does $100 buy?");

    let data = &state.chart_data;
    let make_order = data.make_order.clone();

    Plot::new("ratio_box_chart")
        .y_axis_label("MSRP to Power Ratio")
        .x_axis_formatter(move |mark, _range| category_label(&make_order, mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.3}", value.y)
            } else {
                name.to_string()
            }
        })
        .show(ui, |plot_ui| {
            for make_box in &data.boxes {
                let color = state
                    .make_colors
                    .as_ref()
                    .map(|cm| cm.color_for(&make_box.make))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let stats = &make_box.stats;
                let elem = BoxElem::new(
                    make_box.slot as f64,
                    BoxSpread::new(
                        stats.lower_whisker,
                        stats.quartile1,
                        stats.median,
                        stats.quartile3,
                        stats.upper_whisker,
                    ),
                )
                .name(&make_box.make)
                .fill(color.gamma_multiply(0.4))
                .box_width(0.5);
                plot_ui.box_plot(BoxPlot::new(vec![elem]));
            }

            // Reference line only when the view is non-empty.
            if let Some(median) = data.overall_median {
                plot_ui.hline(HLine::new(median).color(MARKER_COLOR).width(1.0));
            }

            for point in &data.ratio_points {
                plot_ui.points(
                    Points::new(vec![[point.slot as f64, point.ratio]])
                        .name(&point.hover)
                        .color(MARKER_COLOR)
                        .radius(2.5),
                );
            }
        });
}

/// Chart 2: horsepower scatter per make, category axis reversed
/// relative to chart 1.
fn horsepower_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Range of Horsepower");

    let data = &state.chart_data;
    let reversed_order = data.reversed_make_order();

    Plot::new("horsepower_chart")
        .y_axis_formatter(move |mark, _range| category_label(&reversed_order, mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.0}hp", value.x)
            } else {
                name.to_string()
            }
        })
        .show(ui, |plot_ui| {
            for point in &data.hp_points {
                plot_ui.points(
                    Points::new(vec![[point.horsepower_hp, point.slot as f64]])
                        .name(&point.hover)
                        .color(MARKER_COLOR)
                        .radius(2.5),
                );
            }
        });
}

/// Map a grid-mark value onto a make name; only integral marks inside
/// the category range get a label.
fn category_label(order: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    match order.get(rounded as usize) {
        Some(make) => make.clone(),
        None => String::new(),
    }
}
