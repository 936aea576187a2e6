//! The fixed dataset set, loaded once at startup.
//!
//! All tables are read-only for the process lifetime. The context is built
//! before the UI starts and passed by reference into every page render; a
//! missing or malformed file aborts startup.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use log::info;
use rayon::prelude::*;

use super::table::DataTable;

/// Relative path and delimiter for every dataset file.
const DATASET_FILES: [(&str, &str, u8); 20] = [
    ("sample_summary", "agg_table/sample_summary_tab.csv", b','),
    (
        "annotation",
        "leukemie_driver_manuscript_wording-sample_annotation.tsv",
        b'\t',
    ),
    ("n_var_samp", "sup_table/n_var_samp_tab.csv", b','),
    ("n_var_gene", "sup_table/n_var_gene_tab.csv", b','),
    ("n_var_vep", "sup_table/n_var_vep_tab.csv", b','),
    ("fpkm", "sup_table/fpkm_tab.csv", b','),
    ("or_dn", "agg_table/or_dn_agg_tab.csv", b','),
    ("or_up", "agg_table/or_up_agg_tab.csv", b','),
    ("activation", "agg_table/activation_agg_tab.csv", b','),
    ("fraser", "agg_table/fraser_agg_tab.csv", b','),
    ("absplice", "agg_table/absplice_agg_tab.csv", b','),
    ("absplice_ratio", "agg_table/absplice_ratio_tab.csv", b','),
    ("fusion", "agg_table/fusion_agg_tab.csv", b','),
    (
        "or_dn_resource",
        "resource_table/or_dn_resource_tab.csv",
        b',',
    ),
    (
        "or_up_resource",
        "resource_table/or_up_resource_tab.csv",
        b',',
    ),
    (
        "activation_resource",
        "resource_table/activation_resource_tab.csv",
        b',',
    ),
    (
        "fraser_resource",
        "resource_table/fraser_resource_tab.csv",
        b',',
    ),
    ("intogen", "resource_table/intogen_resource_tab.csv", b','),
    (
        "prediction_complete",
        "prediction/S1_prediction_complete_dataset.csv",
        b',',
    ),
    (
        "prediction_study_groups",
        "prediction/S2_prediction_study_groups.csv",
        b',',
    ),
];

/// Every table the dashboard serves, plus the derived study-group lookup.
#[derive(Debug)]
pub struct DataContext {
    pub sample_summary: DataTable,
    /// Annotation table as shown on the sample-info page.
    pub abbreviations: DataTable,
    /// Annotation table as shown on the transcriptomics page.
    pub abbreviations_short: DataTable,
    pub n_var_samp: DataTable,
    pub n_var_gene: DataTable,
    pub n_var_vep: DataTable,
    pub fpkm: DataTable,
    pub or_dn: DataTable,
    pub or_up: DataTable,
    pub activation: DataTable,
    pub fraser: DataTable,
    pub absplice: DataTable,
    pub absplice_ratio: DataTable,
    pub fusion: DataTable,
    pub or_dn_resource: DataTable,
    pub or_up_resource: DataTable,
    pub activation_resource: DataTable,
    pub fraser_resource: DataTable,
    pub intogen: DataTable,
    pub prediction_complete: DataTable,
    pub prediction_study_groups: DataTable,
    /// Disease-entity abbreviation -> study group. Unmapped entities fall
    /// back to "Total" at annotation time, never here.
    pub study_groups: HashMap<String, String>,
}

impl DataContext {
    pub fn load_all(data_dir: &Path) -> Result<Self> {
        let tables: Vec<DataTable> = DATASET_FILES
            .par_iter()
            .map(|(name, relative, delimiter)| {
                DataTable::from_path(name, &data_dir.join(relative), *delimiter)
            })
            .collect::<Result<Vec<_>>>()?;

        for table in &tables {
            info!(
                "loaded {}: {} rows, {} columns",
                table.name,
                table.n_rows(),
                table.n_columns()
            );
        }

        let [
            sample_summary,
            annotation,
            n_var_samp,
            n_var_gene,
            n_var_vep,
            fpkm,
            or_dn,
            or_up,
            activation,
            fraser,
            absplice,
            absplice_ratio,
            fusion,
            or_dn_resource,
            or_up_resource,
            activation_resource,
            fraser_resource,
            intogen,
            prediction_complete,
            prediction_study_groups,
        ]: [DataTable; 20] = tables.try_into().expect("fixed dataset list");

        let abbreviations = abbreviation_table(&annotation);
        let abbreviations_short = short_abbreviation_table(&abbreviations);
        let study_groups = study_group_lookup(&abbreviations);

        Ok(Self {
            sample_summary,
            abbreviations,
            abbreviations_short,
            n_var_samp,
            n_var_gene,
            n_var_vep,
            fpkm,
            or_dn,
            or_up,
            activation,
            fraser,
            absplice,
            absplice_ratio,
            fusion,
            or_dn_resource: or_dn_resource.drop_columns(&["Study group"]),
            or_up_resource: or_up_resource.drop_columns(&["Study group"]),
            activation_resource: activation_resource.drop_columns(&["Study group"]),
            fraser_resource: fraser_resource.drop_columns(&["Study group"]),
            intogen,
            prediction_complete,
            prediction_study_groups,
            study_groups,
        })
    }

    /// Number of loaded tables, for the status bar.
    pub fn table_count(&self) -> usize {
        DATASET_FILES.len()
    }
}

/// The annotation table as published: internal bookkeeping columns removed,
/// manuscript wording applied.
fn abbreviation_table(annotation: &DataTable) -> DataTable {
    let mut table = annotation.drop_columns(&[
        "Cohort during analysis",
        "Cohort German abbreviation",
        "Study group during analysis",
    ]);
    table.rename_columns(&[
        ("Cohort", "Disease entity"),
        ("Cohort abbreviation", "Abbreviation"),
        (
            "Number of sampples per cohort",
            "Number of samples per disease entity",
        ),
    ]);
    table
}

fn short_abbreviation_table(abbreviations: &DataTable) -> DataTable {
    abbreviations.drop_columns(&[
        "Number of samples per study group",
        "Number of samples per cohort",
    ])
}

/// Abbreviation -> study group, with the synthetic "Total" entry that the
/// aggregate tables carry as their last value column.
fn study_group_lookup(abbreviations: &DataTable) -> HashMap<String, String> {
    let keys = abbreviations.text_column("Abbreviation");
    let groups = abbreviations.text_column("Study group");
    let mut lookup: HashMap<String, String> = keys.into_iter().zip(groups).collect();
    lookup.insert("Total".to_string(), "Total".to_string());
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::DataTable;

    fn annotation_fixture() -> DataTable {
        DataTable::from_text(
            "annotation",
            "Cohort\tCohort abbreviation\tCohort during analysis\tCohort German abbreviation\t\
             Study group\tStudy group during analysis\tNumber of samples per study group\t\
             Number of sampples per cohort\tNumber of samples per cohort\n\
             Acute myeloid leukemia\tAML\taml_x\tAML_DE\tMyeloid\tmyeloid_x\t120\t80\t80\n\
             Chronic lymphocytic leukemia\tCLL\tcll_x\tCLL_DE\tLymphatic\tlymph_x\t90\t60\t60\n",
            b'\t',
        )
        .unwrap()
    }

    #[test]
    fn test_abbreviation_table_drops_and_renames() {
        let table = abbreviation_table(&annotation_fixture());
        assert_eq!(
            table.columns,
            vec![
                "Disease entity",
                "Abbreviation",
                "Study group",
                "Number of samples per study group",
                "Number of samples per disease entity",
                "Number of samples per cohort",
            ]
        );
        assert_eq!(table.n_rows(), 2);
    }

    #[test]
    fn test_short_abbreviation_table() {
        let table = short_abbreviation_table(&abbreviation_table(&annotation_fixture()));
        assert_eq!(
            table.columns,
            vec![
                "Disease entity",
                "Abbreviation",
                "Study group",
                "Number of samples per disease entity",
            ]
        );
    }

    #[test]
    fn test_study_group_lookup_includes_total() {
        let lookup = study_group_lookup(&abbreviation_table(&annotation_fixture()));
        assert_eq!(lookup.get("AML").map(String::as_str), Some("Myeloid"));
        assert_eq!(lookup.get("CLL").map(String::as_str), Some("Lymphatic"));
        assert_eq!(lookup.get("Total").map(String::as_str), Some("Total"));
    }

    #[test]
    fn test_load_all_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataContext::load_all(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
