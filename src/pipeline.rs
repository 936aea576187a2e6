//! Filter / reshape / chart-data pipeline.
//!
//! Every chart in the dashboard is produced here: filter a table to the rows
//! matching the current selector value, reshape the matching row from wide
//! form (one column per disease entity) to long form (category, value) pairs,
//! optionally attach a study-group label per category, and emit plain chart
//! data for the presentation layer.
//!
//! Functions are pure: selector values in, chart data out. An empty filter
//! result yields an empty chart, never an error.

use std::collections::HashMap;

use crate::data::{DataTable, Value};

/// Study-group fallback for categories missing from the lookup.
pub const GROUP_FALLBACK: &str = "Total";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Scatter,
}

/// One category on the axis with its value and optional group label.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
    pub group: Option<String>,
}

/// A fully materialized chart, rebuilt from scratch on every recompute and
/// replaced wholesale. Point order is axis order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub category_label: String,
    pub value_label: String,
    /// Scatter variant renders the category axis right-to-left.
    pub reversed: bool,
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Shape of an aggregate-table bar chart: identifier column to filter on and
/// the index where the value (disease entity) columns start.
#[derive(Debug, Clone, Copy)]
pub struct AggregateSpec {
    pub id_column: &'static str,
    pub value_columns_start: usize,
    pub category_label: &'static str,
    pub value_label: &'static str,
}

/// Shape of the per-sample scatter chart.
#[derive(Debug, Clone, Copy)]
pub struct ScatterSpec {
    pub filter_column: &'static str,
    pub category_column: &'static str,
    pub value_column: &'static str,
    pub category_label: &'static str,
    pub value_label: &'static str,
}

/// Indices of the rows whose cells equal every `(column, value)` filter.
/// Unknown columns match nothing.
pub fn matching_rows(table: &DataTable, filters: &[(&str, &str)]) -> Vec<usize> {
    let mut columns = Vec::with_capacity(filters.len());
    for (column, _) in filters {
        match table.column_index(column) {
            Some(index) => columns.push(index),
            None => return Vec::new(),
        }
    }

    (0..table.n_rows())
        .filter(|&row| {
            columns
                .iter()
                .zip(filters)
                .all(|(&col, (_, value))| table.cell(row, col).to_string() == *value)
        })
        .collect()
}

/// Wide -> long reshape of a single row: one `(category, value)` pair per
/// value column, in source column order. Non-numeric cells melt to NaN so the
/// pair count always equals the value-column count.
pub fn melt(table: &DataTable, row: usize, value_columns_start: usize) -> Vec<(String, f64)> {
    table
        .columns
        .iter()
        .enumerate()
        .skip(value_columns_start)
        .map(|(col, name)| (name.clone(), cell_number(table.cell(row, col))))
        .collect()
}

fn cell_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
    }
}

/// Attach a study-group label to each record; unmapped categories get
/// [`GROUP_FALLBACK`].
pub fn annotate_groups(
    records: Vec<(String, f64)>,
    lookup: &HashMap<String, String>,
) -> Vec<ChartPoint> {
    records
        .into_iter()
        .map(|(category, value)| {
            let group = lookup
                .get(&category)
                .cloned()
                .unwrap_or_else(|| GROUP_FALLBACK.to_string());
            ChartPoint {
                category,
                value,
                group: Some(group),
            }
        })
        .collect()
}

/// The aggregate-table pipeline: filter to the selected row, melt its value
/// columns, and optionally annotate study groups. Zero matching rows produce
/// an empty chart.
pub fn aggregate_bar_chart(
    table: &DataTable,
    spec: &AggregateSpec,
    filters: &[(&str, &str)],
    lookup: Option<&HashMap<String, String>>,
) -> ChartData {
    let points = match matching_rows(table, filters).first() {
        Some(&row) => {
            let records = melt(table, row, spec.value_columns_start);
            match lookup {
                Some(lookup) => annotate_groups(records, lookup),
                None => records
                    .into_iter()
                    .map(|(category, value)| ChartPoint {
                        category,
                        value,
                        group: None,
                    })
                    .collect(),
            }
        }
        None => Vec::new(),
    };

    ChartData {
        kind: ChartKind::Bar,
        category_label: spec.category_label.to_string(),
        value_label: spec.value_label.to_string(),
        reversed: false,
        points,
    }
}

/// The per-sample pipeline: every matching row becomes one point, in row
/// order, on a reversed category axis.
pub fn scatter_chart(table: &DataTable, spec: &ScatterSpec, key: &str) -> ChartData {
    let category_col = table.column_index(spec.category_column);
    let value_col = table.column_index(spec.value_column);

    let points = match (category_col, value_col) {
        (Some(category_col), Some(value_col)) => {
            matching_rows(table, &[(spec.filter_column, key)])
                .into_iter()
                .map(|row| ChartPoint {
                    category: table.cell(row, category_col).to_string(),
                    value: cell_number(table.cell(row, value_col)),
                    group: None,
                })
                .collect()
        }
        _ => Vec::new(),
    };

    ChartData {
        kind: ChartKind::Scatter,
        category_label: spec.category_label.to_string(),
        value_label: spec.value_label.to_string(),
        reversed: true,
        points,
    }
}

/// Gender distribution over the whole sample-summary table: two bars per
/// disease entity, grouped Male then Female.
pub fn gender_distribution(table: &DataTable) -> ChartData {
    const SERIES: [(&str, &str); 2] = [("Number_of_male", "Male"), ("Number_of_female", "Female")];

    let entity_col = table.column_index("DiseaseEntity");
    let series_cols: Vec<Option<usize>> = SERIES
        .iter()
        .map(|(column, _)| table.column_index(column))
        .collect();

    let mut points = Vec::new();
    if let Some(entity_col) = entity_col {
        for row in 0..table.n_rows() {
            let entity = table.cell(row, entity_col).to_string();
            for (col, (_, label)) in series_cols.iter().zip(SERIES) {
                if let Some(col) = col {
                    points.push(ChartPoint {
                        category: entity.clone(),
                        value: cell_number(table.cell(row, *col)),
                        group: Some(label.to_string()),
                    });
                }
            }
        }
    }

    ChartData {
        kind: ChartKind::Bar,
        category_label: "Disease entity".to_string(),
        value_label: "Number of Individuals".to_string(),
        reversed: false,
        points,
    }
}

/// Option set for a dependent dropdown: distinct values of `option_column`
/// over the rows matching the primary selection, sorted ascending. The caller
/// resets the dependent value to the first option whenever this changes; an
/// empty result disables the dropdown.
pub fn dependent_options(
    table: &DataTable,
    primary_column: &str,
    primary_value: &str,
    option_column: &str,
) -> Vec<String> {
    let Some(option_col) = table.column_index(option_column) else {
        return Vec::new();
    };

    let mut options: Vec<String> = matching_rows(table, &[(primary_column, primary_value)])
        .into_iter()
        .map(|row| table.cell(row, option_col).to_string())
        .collect();
    options.sort();
    options.dedup();
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;

    fn gene_table() -> DataTable {
        DataTable::from_text(
            "n_var_gene",
            "GeneSymbol,GeneID,AML,CLL,Total\n\
             EYS,ENSG1,4,2,10\n\
             TP53,ENSG2,7,1,9\n",
            b',',
        )
        .unwrap()
    }

    fn vep_table() -> DataTable {
        DataTable::from_text(
            "n_var_vep",
            "GeneSymbol,GeneID,Consequence,Impact,AML,CLL,Total\n\
             MMRN1,ENSG3,missense_variant,MODERATE,3,0,5\n\
             MMRN1,ENSG3,intron_variant,MODIFIER,1,2,4\n\
             EYS,ENSG1,stop_gained,HIGH,2,0,2\n",
            b',',
        )
        .unwrap()
    }

    #[test]
    fn test_matching_rows_exact() {
        let table = gene_table();
        assert_eq!(matching_rows(&table, &[("GeneSymbol", "EYS")]), vec![0]);
        assert_eq!(matching_rows(&table, &[("GeneSymbol", "TP53")]), vec![1]);
        assert!(matching_rows(&table, &[("GeneSymbol", "BRCA1")]).is_empty());
        assert!(matching_rows(&table, &[("NoSuchColumn", "EYS")]).is_empty());
    }

    #[test]
    fn test_melt_spec_scenario() {
        // Row EYS,4,2,10 over value columns [AML, CLL, Total].
        let table = DataTable::from_text(
            "t",
            "GeneSymbol,AML,CLL,Total\nEYS,4,2,10\n",
            b',',
        )
        .unwrap();
        let records = melt(&table, 0, 1);
        assert_eq!(
            records,
            vec![
                ("AML".to_string(), 4.0),
                ("CLL".to_string(), 2.0),
                ("Total".to_string(), 10.0),
            ]
        );
    }

    #[test]
    fn test_melt_preserves_source_column_order() {
        let table = DataTable::from_text("t", "id,Zeta,Alpha\nx,1,2\n", b',').unwrap();
        let categories: Vec<String> = melt(&table, 0, 1).into_iter().map(|(c, _)| c).collect();
        assert_eq!(categories, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_melt_count_equals_value_columns() {
        let table = gene_table();
        assert_eq!(melt(&table, 0, 2).len(), table.n_columns() - 2);
    }

    #[test]
    fn test_group_annotation_with_fallback() {
        let lookup: HashMap<String, String> = [("AML".to_string(), "Myeloid".to_string())]
            .into_iter()
            .collect();
        let points = annotate_groups(
            vec![("AML".to_string(), 4.0), ("XYZ".to_string(), 1.0)],
            &lookup,
        );
        assert_eq!(points[0].group.as_deref(), Some("Myeloid"));
        assert_eq!(points[1].group.as_deref(), Some(GROUP_FALLBACK));
    }

    const GENE_SPEC: AggregateSpec = AggregateSpec {
        id_column: "GeneSymbol",
        value_columns_start: 2,
        category_label: "Disease entity",
        value_label: "Number of variants",
    };

    #[test]
    fn test_aggregate_chart_for_present_gene() {
        let table = gene_table();
        let chart = aggregate_bar_chart(&table, &GENE_SPEC, &[("GeneSymbol", "EYS")], None);
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.points[0].category, "AML");
        assert_eq!(chart.points[0].value, 4.0);
        assert_eq!(chart.points[2].category, "Total");
        assert_eq!(chart.points[2].value, 10.0);
    }

    #[test]
    fn test_aggregate_chart_for_absent_gene_is_empty() {
        let table = gene_table();
        let chart = aggregate_bar_chart(&table, &GENE_SPEC, &[("GeneSymbol", "GONE")], None);
        assert!(chart.is_empty());
    }

    #[test]
    fn test_aggregate_chart_is_idempotent() {
        let table = gene_table();
        let lookup = HashMap::from([("AML".to_string(), "Myeloid".to_string())]);
        let first =
            aggregate_bar_chart(&table, &GENE_SPEC, &[("GeneSymbol", "TP53")], Some(&lookup));
        let second =
            aggregate_bar_chart(&table, &GENE_SPEC, &[("GeneSymbol", "TP53")], Some(&lookup));
        assert_eq!(first, second);
    }

    #[test]
    fn test_aggregate_chart_with_two_filters() {
        let table = vep_table();
        let spec = AggregateSpec {
            id_column: "GeneSymbol",
            value_columns_start: 4,
            category_label: "Disease entity",
            value_label: "Number of variants",
        };
        let chart = aggregate_bar_chart(
            &table,
            &spec,
            &[("GeneSymbol", "MMRN1"), ("Consequence", "intron_variant")],
            None,
        );
        assert_eq!(
            chart
                .points
                .iter()
                .map(|p| p.value)
                .collect::<Vec<_>>(),
            vec![1.0, 2.0, 4.0]
        );
    }

    #[test]
    fn test_dependent_options_sorted_distinct() {
        let table = vep_table();
        let options = dependent_options(&table, "GeneSymbol", "MMRN1", "Consequence");
        assert_eq!(options, vec!["intron_variant", "missense_variant"]);
        // Default is the lexicographically first option.
        assert_eq!(options.first().map(String::as_str), Some("intron_variant"));
    }

    #[test]
    fn test_dependent_options_empty_for_absent_gene() {
        let table = vep_table();
        assert!(dependent_options(&table, "GeneSymbol", "GONE", "Consequence").is_empty());
    }

    #[test]
    fn test_scatter_chart_row_order_and_reversed_axis() {
        let table = DataTable::from_text(
            "n_var_samp",
            "AnonamizedID,DiseaseEntity,Number_of_variant\n\
             S003,AML,12\n\
             S001,AML,7\n\
             S002,CLL,3\n",
            b',',
        )
        .unwrap();
        let spec = ScatterSpec {
            filter_column: "DiseaseEntity",
            category_column: "AnonamizedID",
            value_column: "Number_of_variant",
            category_label: "AnonamizedID",
            value_label: "Number of variants",
        };
        let chart = scatter_chart(&table, &spec, "AML");
        assert_eq!(chart.kind, ChartKind::Scatter);
        assert!(chart.reversed);
        assert_eq!(
            chart
                .points
                .iter()
                .map(|p| p.category.as_str())
                .collect::<Vec<_>>(),
            vec!["S003", "S001"]
        );
        assert_eq!(chart.points[1].value, 7.0);
    }

    #[test]
    fn test_gender_distribution_two_series_per_entity() {
        let table = DataTable::from_text(
            "sample_summary",
            "DiseaseEntity,Number_of_individuals,Number_of_male,Number_of_female\n\
             AML,10,6,4\n\
             CLL,8,3,5\n",
            b',',
        )
        .unwrap();
        let chart = gender_distribution(&table);
        assert_eq!(chart.points.len(), 4);
        assert_eq!(chart.points[0].category, "AML");
        assert_eq!(chart.points[0].group.as_deref(), Some("Male"));
        assert_eq!(chart.points[0].value, 6.0);
        assert_eq!(chart.points[1].group.as_deref(), Some("Female"));
        assert_eq!(chart.points[3].value, 5.0);
    }
}
