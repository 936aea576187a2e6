//! Transcriptomics page: expression levels and expression-outlier counts,
//! colored by study group.

use eframe::egui;

use crate::data::{DataContext, DataTable};
use crate::pipeline::AggregateSpec;
use crate::ui::{AggPanel, AggPanelConfig, TableView};

const FPKM_PANEL: AggPanelConfig = AggPanelConfig {
    id: "fpkm",
    heading: "Mean FPKM matrix aggregated by disease entities and genes",
    subheading: None,
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "FPKM expression",
    },
    default: "TSPAN6",
    by_study_group: true,
    distinct_options: false,
};

const OR_DN_PANEL: AggPanelConfig = AggPanelConfig {
    id: "or_dn",
    heading: "OUTRIDER",
    subheading: Some("Number of underexpression outliers aggregated by disease entities and genes"),
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Number of samples",
    },
    default: "PLP2",
    by_study_group: true,
    distinct_options: false,
};

const OR_UP_PANEL: AggPanelConfig = AggPanelConfig {
    id: "or_up",
    heading: "OUTRIDER",
    subheading: Some("Number of overexpression outliers aggregated by disease entities and genes"),
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Number of samples",
    },
    default: "KIF27",
    by_study_group: true,
    distinct_options: false,
};

const ACTIVATION_PANEL: AggPanelConfig = AggPanelConfig {
    id: "activation",
    heading: "NB-act",
    subheading: Some("Number of activation outliers aggregated by disease entities and genes"),
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Number of samples",
    },
    default: "KCNS3",
    by_study_group: true,
    distinct_options: false,
};

const FRASER_PANEL: AggPanelConfig = AggPanelConfig {
    id: "fraser",
    heading: "FRASER",
    subheading: Some("Number of splicing outliers aggregated by disease entities and genes"),
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Number of samples",
    },
    default: "UBC",
    by_study_group: true,
    distinct_options: false,
};

pub struct TranscriptomicsPage {
    abbreviations: TableView,
    fpkm_panel: AggPanel,
    or_dn_panel: AggPanel,
    or_dn_resource: TableView,
    or_up_panel: AggPanel,
    or_up_resource: TableView,
    activation_panel: AggPanel,
    activation_resource: TableView,
    fraser_panel: AggPanel,
    fraser_resource: TableView,
}

impl TranscriptomicsPage {
    pub fn new(data: &DataContext) -> Self {
        let lookup = Some(&data.study_groups);
        Self {
            abbreviations: TableView::new("abbreviations_short"),
            fpkm_panel: AggPanel::new(FPKM_PANEL, &data.fpkm, lookup),
            or_dn_panel: AggPanel::new(OR_DN_PANEL, &data.or_dn, lookup),
            or_dn_resource: TableView::new("or_dn_resource"),
            or_up_panel: AggPanel::new(OR_UP_PANEL, &data.or_up, lookup),
            or_up_resource: TableView::new("or_up_resource"),
            activation_panel: AggPanel::new(ACTIVATION_PANEL, &data.activation, lookup),
            activation_resource: TableView::new("activation_resource"),
            fraser_panel: AggPanel::new(FRASER_PANEL, &data.fraser, lookup),
            fraser_resource: TableView::new("fraser_resource"),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, data: &DataContext) {
        let lookup = Some(&data.study_groups);

        ui.group(|ui| {
            ui.heading("Abbreviation table");
            self.abbreviations.show(ui, &data.abbreviations_short);
        });
        ui.add_space(8.0);

        self.fpkm_panel.show(ui, &data.fpkm, lookup);

        self.or_dn_panel.show(ui, &data.or_dn, lookup);
        resource_section(
            ui,
            "Number of underexpression outliers per gene per entity when applying different filters",
            &mut self.or_dn_resource,
            &data.or_dn_resource,
        );

        self.or_up_panel.show(ui, &data.or_up, lookup);
        resource_section(
            ui,
            "Number of overexpression outliers per gene per entity when applying different filters",
            &mut self.or_up_resource,
            &data.or_up_resource,
        );

        self.activation_panel.show(ui, &data.activation, lookup);
        resource_section(
            ui,
            "Number of activation outliers per gene per entity when applying different filters",
            &mut self.activation_resource,
            &data.activation_resource,
        );

        self.fraser_panel.show(ui, &data.fraser, lookup);
        resource_section(
            ui,
            "Number of splicing outliers per gene per entity when applying different filters",
            &mut self.fraser_resource,
            &data.fraser_resource,
        );
    }
}

fn resource_section(ui: &mut egui::Ui, heading: &str, view: &mut TableView, table: &DataTable) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(heading).strong());
        view.show(ui, table);
    });
    ui.add_space(8.0);
}
