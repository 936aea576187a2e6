//! Prediction page: driver-gene prediction model results.

use eframe::egui;

use crate::data::{DataContext, DataTable};
use crate::ui::TableView;

pub struct PredictionPage {
    complete: TableView,
    study_groups: TableView,
    intogen: TableView,
}

impl PredictionPage {
    pub fn new(_data: &DataContext) -> Self {
        Self {
            complete: TableView::new("prediction_complete"),
            study_groups: TableView::new("prediction_study_groups"),
            intogen: TableView::new("intogen"),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, data: &DataContext) {
        table_section(
            ui,
            "Prediction result of the hematologic malignancy driver gene prediction model using the complete dataset",
            &mut self.complete,
            &data.prediction_complete,
        );
        table_section(
            ui,
            "Prediction result of the hematologic malignancy driver gene prediction model using each of the 14 study groups",
            &mut self.study_groups,
            &data.prediction_study_groups,
        );
        table_section(
            ui,
            "Driver prediction results from intOGen 7 tools",
            &mut self.intogen,
            &data.intogen,
        );
    }
}

fn table_section(ui: &mut egui::Ui, heading: &str, view: &mut TableView, table: &DataTable) {
    ui.group(|ui| {
        ui.heading(heading);
        view.show(ui, table);
    });
    ui.add_space(8.0);
}
