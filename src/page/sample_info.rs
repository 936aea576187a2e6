//! Sample info page: cohort annotation and sample-summary demographics.

use eframe::egui;

use crate::data::DataContext;
use crate::pipeline::{self, AggregateSpec, ChartData};
use crate::ui::{AggPanel, AggPanelConfig, TableView, chart_view};

const SUMMARY_PANEL: AggPanelConfig = AggPanelConfig {
    id: "sample_summary",
    heading: "Number of individuals, genders, and age groups aggregated by disease entities",
    subheading: None,
    spec: AggregateSpec {
        id_column: "DiseaseEntity",
        value_columns_start: 4,
        category_label: "Age groups",
        value_label: "Number of individuals",
    },
    default: "AML",
    by_study_group: false,
    distinct_options: false,
};

pub struct SampleInfoPage {
    abbreviations: TableView,
    /// Static overview chart, built once from the full table.
    gender_chart: ChartData,
    summary_panel: AggPanel,
}

impl SampleInfoPage {
    pub fn new(data: &DataContext) -> Self {
        Self {
            abbreviations: TableView::new("abbreviations"),
            gender_chart: pipeline::gender_distribution(&data.sample_summary),
            summary_panel: AggPanel::new(SUMMARY_PANEL, &data.sample_summary, None),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, data: &DataContext) {
        ui.group(|ui| {
            ui.heading("Disease entity and study group table");
            self.abbreviations.show(ui, &data.abbreviations);
        });
        ui.add_space(8.0);

        ui.group(|ui| {
            ui.heading("Number of individuals per gender aggregated by disease entities");
            chart_view::show(ui, "gender_distribution", &self.gender_chart);
        });
        ui.add_space(8.0);

        self.summary_panel.show(ui, &data.sample_summary, None);
    }
}
