//! Chart rendering for pipeline output.
//!
//! Categories sit at integer positions on the category axis in their pipeline
//! order; the axis formatter maps positions back to category names. A chart
//! with zero points renders as an empty plot.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};

use crate::pipeline::{ChartData, ChartKind};

const CHART_HEIGHT: f32 = 300.0;

/// Fixed categorical palette, cycled by group or category index.
const PALETTE: [Color32; 12] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0xe3, 0x77, 0xc2),
    Color32::from_rgb(0x7f, 0x7f, 0x7f),
    Color32::from_rgb(0xbc, 0xbd, 0x22),
    Color32::from_rgb(0x17, 0xbe, 0xcf),
    Color32::from_rgb(0xaa, 0x40, 0x99),
    Color32::from_rgb(0x46, 0x75, 0xa6),
];

fn palette_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

pub fn show(ui: &mut egui::Ui, id: &str, chart: &ChartData) {
    if chart.is_empty() {
        ui.colored_label(Color32::GRAY, "No data for the current selection.");
    }
    match chart.kind {
        ChartKind::Bar => show_bars(ui, id, chart),
        ChartKind::Scatter => show_scatter(ui, id, chart),
    }
}

fn show_bars(ui: &mut egui::Ui, id: &str, chart: &ChartData) {
    // Category axis positions: first appearance order. A category can occur
    // once per group (gender chart); occurrences share a slot side by side.
    let mut category_index: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<String> = Vec::new();
    let mut occurrence: Vec<usize> = Vec::with_capacity(chart.points.len());
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for point in &chart.points {
        if !category_index.contains_key(point.category.as_str()) {
            category_index.insert(point.category.as_str(), categories.len());
            categories.push(point.category.clone());
        }
        let count = seen.entry(point.category.as_str()).or_insert(0);
        occurrence.push(*count);
        *count += 1;
    }
    let slots = seen.values().copied().max().unwrap_or(1).max(1);
    let bar_width = 0.9 / slots as f64;

    let groups: Vec<String> = {
        let mut groups = Vec::new();
        for point in &chart.points {
            if let Some(group) = &point.group {
                if !groups.contains(group) {
                    groups.push(group.clone());
                }
            }
        }
        groups
    };

    let mut bar_charts: Vec<BarChart> = Vec::new();
    if groups.is_empty() {
        // No grouping: one bar per category, each in its own color.
        let bars: Vec<Bar> = chart
            .points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.value.is_finite())
            .map(|(i, p)| {
                Bar::new(category_index[p.category.as_str()] as f64, p.value)
                    .width(bar_width)
                    .name(p.category.clone())
                    .fill(palette_color(i))
            })
            .collect();
        bar_charts.push(with_formatter(BarChart::new(bars)));
    } else {
        // One chart per group so the legend lists groups.
        for (group_idx, group) in groups.iter().enumerate() {
            let bars: Vec<Bar> = chart
                .points
                .iter()
                .zip(&occurrence)
                .filter(|(p, _)| p.group.as_deref() == Some(group) && p.value.is_finite())
                .map(|(p, &slot)| {
                    let base = category_index[p.category.as_str()] as f64;
                    let offset = (slot as f64 - (slots as f64 - 1.0) / 2.0) * bar_width;
                    Bar::new(base + offset, p.value)
                        .width(bar_width)
                        .name(p.category.clone())
                        .fill(palette_color(group_idx))
                })
                .collect();
            bar_charts.push(
                with_formatter(BarChart::new(bars))
                    .color(palette_color(group_idx))
                    .name(group),
            );
        }
    }

    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label(chart.category_label.clone())
        .y_axis_label(chart.value_label.clone())
        .x_axis_formatter(category_axis_formatter(categories))
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for bars in bar_charts {
                plot_ui.bar_chart(bars);
            }
        });
}

fn with_formatter(bars: BarChart) -> BarChart {
    bars.element_formatter(Box::new(|bar, _| format!("{}: {}", bar.name, bar.value)))
}

fn show_scatter(ui: &mut egui::Ui, id: &str, chart: &ChartData) {
    let n = chart.points.len();
    // Reversed axis: the first point lands on the rightmost position.
    let position = |i: usize| -> f64 {
        if chart.reversed {
            (n.saturating_sub(1) - i) as f64
        } else {
            i as f64
        }
    };

    let mut categories = vec![String::new(); n];
    let coords: Vec<[f64; 2]> = chart
        .points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.value.is_finite())
        .map(|(i, p)| {
            let x = position(i);
            categories[x as usize] = p.category.clone();
            [x, p.value]
        })
        .collect();

    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_label(chart.category_label.clone())
        .y_axis_label(chart.value_label.clone())
        .x_axis_formatter(category_axis_formatter(categories))
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .radius(2.5)
                    .color(palette_color(0)),
            );
        });
}

/// Maps integer axis positions back to category names; everything else is
/// left unlabeled.
fn category_axis_formatter(
    categories: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let index = mark.value.round();
        if (mark.value - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        categories.get(index as usize).cloned().unwrap_or_default()
    }
}
