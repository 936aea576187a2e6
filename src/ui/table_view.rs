//! Paginated, sortable, filterable grid over a [`DataTable`].
//!
//! Pure presentation: the table itself is never modified, and the visible-row
//! computation is a plain function over the current sort/filter state.

use std::cmp::Ordering;

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::data::{DataTable, Value};

const PAGE_SIZE: usize = 10;
const TABLE_HEIGHT: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortDirection {
    Ascending,
    Descending,
}

/// Per-table display state.
pub struct TableView {
    id: String,
    filters: Vec<String>,
    sort: Option<(usize, SortDirection)>,
    page: usize,
    export_error: Option<String>,
}

impl TableView {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            filters: Vec::new(),
            sort: None,
            page: 0,
            export_error: None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, table: &DataTable) {
        self.filters.resize(table.n_columns(), String::new());

        let visible = visible_rows(table, &self.filters, self.sort);
        let page_count = visible.len().div_ceil(PAGE_SIZE).max(1);
        self.page = self.page.min(page_count - 1);
        let page_rows =
            &visible[(self.page * PAGE_SIZE).min(visible.len())..((self.page + 1) * PAGE_SIZE).min(visible.len())];

        let grid_id = self.id.clone();
        ui.push_id(grid_id, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(TABLE_HEIGHT)
                .columns(Column::auto().at_least(90.0).clip(true), table.n_columns())
                .header(46.0, |mut header| {
                    for (col, name) in table.columns.iter().enumerate() {
                        header.col(|ui| {
                            ui.vertical(|ui| {
                                let marker = match self.sort {
                                    Some((c, SortDirection::Ascending)) if c == col => " ^",
                                    Some((c, SortDirection::Descending)) if c == col => " v",
                                    _ => "",
                                };
                                if ui
                                    .add(
                                        egui::Button::new(
                                            egui::RichText::new(format!("{name}{marker}"))
                                                .strong(),
                                        )
                                        .frame(false),
                                    )
                                    .clicked()
                                {
                                    self.toggle_sort(col);
                                }
                                if ui
                                    .add(
                                        egui::TextEdit::singleline(&mut self.filters[col])
                                            .hint_text("filter")
                                            .desired_width(80.0),
                                    )
                                    .changed()
                                {
                                    self.page = 0;
                                }
                            });
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, page_rows.len(), |mut row| {
                        let table_row = page_rows[row.index()];
                        for col in 0..table.n_columns() {
                            row.col(|ui| {
                                ui.label(table.cell(table_row, col).to_string());
                            });
                        }
                    });
                });
        });

        // Pagination and export controls
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.page > 0, egui::Button::new("<"))
                .clicked()
            {
                self.page -= 1;
            }
            ui.label(format!(
                "Page {} / {} ({} rows)",
                self.page + 1,
                page_count,
                visible.len()
            ));
            if ui
                .add_enabled(self.page + 1 < page_count, egui::Button::new(">"))
                .clicked()
            {
                self.page += 1;
            }
            ui.separator();
            if ui.button("Export CSV").clicked() {
                self.export_csv(table);
            }
        });
        if let Some(ref error) = self.export_error {
            ui.colored_label(egui::Color32::RED, error);
        }
    }

    fn toggle_sort(&mut self, col: usize) {
        self.sort = match self.sort {
            Some((c, SortDirection::Ascending)) if c == col => {
                Some((col, SortDirection::Descending))
            }
            Some((c, SortDirection::Descending)) if c == col => None,
            _ => Some((col, SortDirection::Ascending)),
        };
        self.page = 0;
    }

    /// Write the full table (not the filtered subset) to a user-chosen file.
    fn export_csv(&mut self, table: &DataTable) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(format!("{}.csv", table.name))
            .save_file()
        else {
            return;
        };

        match write_csv(table, &path) {
            Ok(()) => self.export_error = None,
            Err(e) => self.export_error = Some(format!("Export failed: {e}")),
        }
    }
}

fn write_csv(table: &DataTable, path: &std::path::Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in 0..table.n_rows() {
        let record: Vec<String> = (0..table.n_columns())
            .map(|col| table.cell(row, col).to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Row indices surviving the per-column filters, in display order.
fn visible_rows(
    table: &DataTable,
    filters: &[String],
    sort: Option<(usize, SortDirection)>,
) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..table.n_rows())
        .filter(|&row| {
            filters
                .iter()
                .enumerate()
                .all(|(col, filter)| cell_matches(table.cell(row, col), filter))
        })
        .collect();

    if let Some((col, direction)) = sort {
        rows.sort_by(|&a, &b| {
            let ordering = compare_cells(table.cell(a, col), table.cell(b, col));
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    rows
}

/// Substring match for text, comparator prefixes (`>`, `>=`, `<`, `<=`, `=`)
/// for numbers. An empty filter matches everything.
fn cell_matches(value: &Value, filter: &str) -> bool {
    let filter = filter.trim();
    if filter.is_empty() {
        return true;
    }

    for (prefix, test) in [
        (">=", Ordering::is_ge as fn(Ordering) -> bool),
        ("<=", Ordering::is_le),
        (">", Ordering::is_gt),
        ("<", Ordering::is_lt),
        ("=", Ordering::is_eq),
    ] {
        if let Some(rest) = filter.strip_prefix(prefix) {
            return match (number_of(value), rest.trim().parse::<f64>()) {
                (Some(cell), Ok(bound)) => test(cell.total_cmp(&bound)),
                _ => false,
            };
        }
    }

    value
        .to_string()
        .to_lowercase()
        .contains(&filter.to_lowercase())
}

fn number_of(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str()?.trim().parse().ok())
}

/// Numeric comparison when both cells are numeric, lexicographic otherwise.
fn compare_cells(a: &Value, b: &Value) -> Ordering {
    match (number_of(a), number_of(b)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;

    fn table() -> DataTable {
        DataTable::from_text(
            "t",
            "GeneSymbol,Count\nEYS,4\nTP53,12\nBRCA1,7\n",
            b',',
        )
        .unwrap()
    }

    fn no_filters() -> Vec<String> {
        vec![String::new(), String::new()]
    }

    #[test]
    fn test_no_filter_no_sort_keeps_row_order() {
        assert_eq!(visible_rows(&table(), &no_filters(), None), vec![0, 1, 2]);
    }

    #[test]
    fn test_substring_filter_is_case_insensitive() {
        let filters = vec!["brc".to_string(), String::new()];
        assert_eq!(visible_rows(&table(), &filters, None), vec![2]);
    }

    #[test]
    fn test_comparator_filter_on_numbers() {
        let filters = vec![String::new(), ">5".to_string()];
        assert_eq!(visible_rows(&table(), &filters, None), vec![1, 2]);
        let filters = vec![String::new(), "<=7".to_string()];
        assert_eq!(visible_rows(&table(), &filters, None), vec![0, 2]);
        let filters = vec![String::new(), "=12".to_string()];
        assert_eq!(visible_rows(&table(), &filters, None), vec![1]);
    }

    #[test]
    fn test_comparator_on_text_matches_nothing() {
        let filters = vec![">5".to_string(), String::new()];
        assert!(visible_rows(&table(), &filters, None).is_empty());
    }

    #[test]
    fn test_sort_numeric_descending() {
        let rows = visible_rows(
            &table(),
            &no_filters(),
            Some((1, SortDirection::Descending)),
        );
        assert_eq!(rows, vec![1, 2, 0]);
    }

    #[test]
    fn test_sort_text_ascending() {
        let rows = visible_rows(
            &table(),
            &no_filters(),
            Some((0, SortDirection::Ascending)),
        );
        assert_eq!(rows, vec![2, 0, 1]);
    }

    #[test]
    fn test_csv_roundtrip_preserves_full_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let original = table();
        write_csv(&original, &path).unwrap();
        let reloaded = DataTable::from_path("t", &path, b',').unwrap();
        assert_eq!(reloaded, original);
    }
}
