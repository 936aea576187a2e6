//! The repeated dashboard panel: heading, selector, chart, table.
//!
//! Every aggregate table page section is an instance of this with a different
//! column layout and default selection.

use std::collections::HashMap;

use eframe::egui;
use log::debug;

use crate::data::DataTable;
use crate::pipeline::{self, AggregateSpec, ChartData};
use crate::ui::{Selector, TableView, chart_view};

/// Static description of one aggregate panel.
#[derive(Debug, Clone, Copy)]
pub struct AggPanelConfig {
    pub id: &'static str,
    pub heading: &'static str,
    pub subheading: Option<&'static str>,
    pub spec: AggregateSpec,
    /// Default selector value, a fixed literal from the governing table.
    pub default: &'static str,
    /// Color and legend by study group instead of per disease entity.
    pub by_study_group: bool,
    /// Build the option list as distinct sorted values instead of raw column
    /// order.
    pub distinct_options: bool,
}

pub struct AggPanel {
    config: AggPanelConfig,
    selector: Selector,
    chart: ChartData,
    table_view: TableView,
}

impl AggPanel {
    pub fn new(
        config: AggPanelConfig,
        table: &DataTable,
        lookup: Option<&HashMap<String, String>>,
    ) -> Self {
        let options = if config.distinct_options {
            table.distinct_sorted(config.spec.id_column)
        } else {
            table.text_column(config.spec.id_column)
        };
        let selector = Selector::new(config.id, options, config.default);
        let chart = recompute(&config, table, selector.value(), lookup);
        Self {
            config,
            selector,
            chart,
            table_view: TableView::new(config.id),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        table: &DataTable,
        lookup: Option<&HashMap<String, String>>,
    ) {
        ui.group(|ui| {
            ui.heading(self.config.heading);
            if let Some(subheading) = self.config.subheading {
                ui.label(subheading);
            }
            ui.add_space(4.0);

            if self.selector.show(ui) {
                self.chart = recompute(&self.config, table, self.selector.value(), lookup);
            }

            chart_view::show(ui, self.config.id, &self.chart);
            ui.add_space(4.0);
            self.table_view.show(ui, table);
        });
        ui.add_space(8.0);
    }
}

fn recompute(
    config: &AggPanelConfig,
    table: &DataTable,
    key: &str,
    lookup: Option<&HashMap<String, String>>,
) -> ChartData {
    debug!("recomputing {} chart for {key}", config.id);
    let lookup = if config.by_study_group { lookup } else { None };
    pipeline::aggregate_bar_chart(
        table,
        &config.spec,
        &[(config.spec.id_column, key)],
        lookup,
    )
}
