//! Genomics page: variant counts per sample, gene and VEP consequence,
//! splice-affecting variant predictions and fusion events.

use eframe::egui;
use log::debug;

use crate::data::DataContext;
use crate::pipeline::{self, AggregateSpec, ChartData, ScatterSpec};
use crate::ui::{AggPanel, AggPanelConfig, Selector, TableView, chart_view};

const SAMPLE_SCATTER: ScatterSpec = ScatterSpec {
    filter_column: "DiseaseEntity",
    category_column: "AnonamizedID",
    value_column: "Number_of_variant",
    category_label: "AnonamizedID",
    value_label: "Number of variants",
};

const GENE_PANEL: AggPanelConfig = AggPanelConfig {
    id: "n_var_gene",
    heading: "Number of filtered variants aggregated by disease entities and genes",
    subheading: None,
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Number of variants",
    },
    default: "EYS",
    by_study_group: false,
    distinct_options: false,
};

const VEP_SPEC: AggregateSpec = AggregateSpec {
    id_column: "GeneSymbol",
    value_columns_start: 4,
    category_label: "Disease entity",
    value_label: "Number of variants",
};

const ABSPLICE_PANEL: AggPanelConfig = AggPanelConfig {
    id: "absplice",
    heading: "AbSplice-DNA: Number of splice-affecting variants aggregated by disease entities and genes",
    subheading: None,
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Number of samples",
    },
    default: "MGMT",
    by_study_group: false,
    distinct_options: false,
};

const ABSPLICE_RATIO_PANEL: AggPanelConfig = AggPanelConfig {
    id: "absplice_ratio",
    heading: "AbSplice-DNA: Fraction of splice-affecting variants within filtered variants aggregated by disease entities and genes",
    subheading: None,
    spec: AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Fraction of variants",
    },
    default: "UROD",
    by_study_group: false,
    distinct_options: false,
};

const FUSION_PANEL: AggPanelConfig = AggPanelConfig {
    id: "fusion",
    heading: "Fusion events aggregated by disease entities and genes",
    subheading: None,
    spec: AggregateSpec {
        id_column: "Gene_pair",
        value_columns_start: 5,
        category_label: "Disease entity",
        value_label: "Number of samples",
    },
    default: "ARHGAP26--NR3C1",
    by_study_group: false,
    distinct_options: false,
};

pub struct GenomicsPage {
    samp_selector: Selector,
    samp_chart: ChartData,
    samp_table: TableView,
    gene_panel: AggPanel,
    vep_gene: Selector,
    vep_consequence: Selector,
    vep_chart: ChartData,
    vep_table: TableView,
    absplice_panel: AggPanel,
    absplice_ratio_panel: AggPanel,
    fusion_panel: AggPanel,
}

impl GenomicsPage {
    pub fn new(data: &DataContext) -> Self {
        let samp_selector = Selector::new(
            "n_var_samp",
            data.n_var_samp.distinct_sorted("DiseaseEntity"),
            "AML",
        );
        let samp_chart =
            pipeline::scatter_chart(&data.n_var_samp, &SAMPLE_SCATTER, samp_selector.value());

        let vep_gene = Selector::new(
            "n_var_vep_gene",
            data.n_var_vep.text_column("GeneSymbol"),
            "MMRN1",
        );
        let mut vep_consequence = Selector::new("n_var_vep_consequence", Vec::new(), "");
        vep_consequence.replace_options(pipeline::dependent_options(
            &data.n_var_vep,
            "GeneSymbol",
            vep_gene.value(),
            "Consequence",
        ));
        let vep_chart = vep_chart(data, &vep_gene, &vep_consequence);

        Self {
            samp_selector,
            samp_chart,
            samp_table: TableView::new("n_var_samp"),
            gene_panel: AggPanel::new(GENE_PANEL, &data.n_var_gene, None),
            vep_gene,
            vep_consequence,
            vep_chart,
            vep_table: TableView::new("n_var_vep"),
            absplice_panel: AggPanel::new(ABSPLICE_PANEL, &data.absplice, None),
            absplice_ratio_panel: AggPanel::new(ABSPLICE_RATIO_PANEL, &data.absplice_ratio, None),
            fusion_panel: AggPanel::new(FUSION_PANEL, &data.fusion, None),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, data: &DataContext) {
        // Per-sample variant counts
        ui.group(|ui| {
            ui.heading("Number of filtered variants per sample");
            if self.samp_selector.show(ui) {
                debug!("recomputing per-sample chart for {}", self.samp_selector.value());
                self.samp_chart = pipeline::scatter_chart(
                    &data.n_var_samp,
                    &SAMPLE_SCATTER,
                    self.samp_selector.value(),
                );
            }
            chart_view::show(ui, "n_var_samp", &self.samp_chart);
            ui.add_space(4.0);
            self.samp_table.show(ui, &data.n_var_samp);
        });
        ui.add_space(8.0);

        self.gene_panel.show(ui, &data.n_var_gene, None);

        // Per-gene, per-consequence variant counts with a dependent dropdown
        ui.group(|ui| {
            ui.heading(
                "Number of filtered variants aggregated by disease entities and genes and VEP consequences",
            );
            ui.horizontal(|ui| {
                if self.vep_gene.show(ui) {
                    self.vep_consequence
                        .replace_options(pipeline::dependent_options(
                            &data.n_var_vep,
                            "GeneSymbol",
                            self.vep_gene.value(),
                            "Consequence",
                        ));
                    self.vep_chart = vep_chart(data, &self.vep_gene, &self.vep_consequence);
                }
                if self.vep_consequence.has_options() {
                    if self.vep_consequence.show(ui) {
                        self.vep_chart = vep_chart(data, &self.vep_gene, &self.vep_consequence);
                    }
                } else {
                    // Selected gene has no consequence rows; keep the control
                    // visible but inert.
                    ui.add_enabled(false, egui::Button::new("no data"));
                }
            });
            chart_view::show(ui, "n_var_vep", &self.vep_chart);
            ui.add_space(4.0);
            self.vep_table.show(ui, &data.n_var_vep);
        });
        ui.add_space(8.0);

        self.absplice_panel.show(ui, &data.absplice, None);
        self.absplice_ratio_panel.show(ui, &data.absplice_ratio, None);
        self.fusion_panel.show(ui, &data.fusion, None);
    }
}

fn vep_chart(data: &DataContext, gene: &Selector, consequence: &Selector) -> ChartData {
    pipeline::aggregate_bar_chart(
        &data.n_var_vep,
        &VEP_SPEC,
        &[
            ("GeneSymbol", gene.value()),
            ("Consequence", consequence.value()),
        ],
        None,
    )
}
