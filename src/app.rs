//! Main application state and UI

use eframe::egui;

use crate::data::DataContext;
use crate::page::{GenomicsPage, PredictionPage, SampleInfoPage, TranscriptomicsPage};

const STUDY_TITLE: &str =
    "Analysis of 3,760 hematologic malignancies reveals rare transcriptomic aberrations of driver genes.";
const STUDY_DOI: &str = "https://doi.org/10.1101/2023.08.08.23293420";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    SampleInfo,
    Genomics,
    Transcriptomics,
    Prediction,
}

/// Application state: the immutable data context plus per-page view state.
pub struct HemaviewApp {
    data: DataContext,
    current_page: Page,
    sample_info: SampleInfoPage,
    genomics: GenomicsPage,
    transcriptomics: TranscriptomicsPage,
    prediction: PredictionPage,
}

impl HemaviewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data: DataContext) -> Self {
        let sample_info = SampleInfoPage::new(&data);
        let genomics = GenomicsPage::new(&data);
        let transcriptomics = TranscriptomicsPage::new(&data);
        let prediction = PredictionPage::new(&data);
        Self {
            data,
            current_page: Page::SampleInfo,
            sample_info,
            genomics,
            transcriptomics,
            prediction,
        }
    }
}

impl eframe::App for HemaviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Navigation bar
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Hemaview");
                ui.separator();
                ui.selectable_value(&mut self.current_page, Page::SampleInfo, "Sample info");
                ui.selectable_value(&mut self.current_page, Page::Genomics, "Genomics");
                ui.selectable_value(
                    &mut self.current_page,
                    Page::Transcriptomics,
                    "Transcriptomics",
                );
                ui.selectable_value(&mut self.current_page, Page::Prediction, "Prediction");
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} datasets | {} disease entities | {} samples",
                    self.data.table_count(),
                    self.data.sample_summary.n_rows(),
                    self.data.n_var_samp.n_rows(),
                ));
            });
        });

        // Page content
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("page_scroll")
                .show(ui, |ui| {
                    ui.group(|ui| {
                        ui.label(egui::RichText::new(STUDY_TITLE).heading());
                        ui.hyperlink_to(STUDY_DOI, STUDY_DOI);
                    });
                    ui.add_space(8.0);

                    match self.current_page {
                        Page::SampleInfo => self.sample_info.show(ui, &self.data),
                        Page::Genomics => self.genomics.show(ui, &self.data),
                        Page::Transcriptomics => self.transcriptomics.show(ui, &self.data),
                        Page::Prediction => self.prediction.show(ui, &self.data),
                    }
                });
        });
    }
}
