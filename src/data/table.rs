//! Generic in-memory table loaded from delimited text files.
//!
//! Column order and row order are preserved exactly as in the source file.
//! A column is numeric when every non-empty cell parses as a float; all
//! other columns are kept as text.

use std::fmt;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_nan() => Ok(()),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e12 => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// An immutable tabular dataset with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Read a delimited text file. `delimiter` is `b','` or `b'\t'`.
    pub fn from_path(name: &str, path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("dataset file {} not found", path.display()))?;
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(file);
        Self::from_csv_reader(name, reader)
            .with_context(|| format!("malformed dataset file {}", path.display()))
    }

    /// Parse delimited text already in memory.
    pub fn from_text(name: &str, text: &str, delimiter: u8) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(text.as_bytes());
        Self::from_csv_reader(name, reader)
    }

    fn from_csv_reader<R: std::io::Read>(name: &str, mut reader: csv::Reader<R>) -> Result<Self> {
        let columns: Vec<String> = reader
            .headers()
            .context("could not read header row")?
            .iter()
            .map(|s| s.to_string())
            .collect();
        if columns.is_empty() {
            bail!("header row is empty");
        }

        let mut raw: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.context("bad row")?;
            raw.push(record.iter().map(|s| s.to_string()).collect());
        }

        // Column-wise type inference: numeric iff every non-empty cell parses.
        let numeric: Vec<bool> = (0..columns.len())
            .map(|col| {
                let mut any = false;
                for row in &raw {
                    let cell = row[col].trim();
                    if cell.is_empty() {
                        continue;
                    }
                    if cell.parse::<f64>().is_err() {
                        return false;
                    }
                    any = true;
                }
                any
            })
            .collect();

        let rows = raw
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        if numeric[col] {
                            let cell = cell.trim();
                            if cell.is_empty() {
                                Value::Number(f64::NAN)
                            } else {
                                Value::Number(cell.parse::<f64>().unwrap_or(f64::NAN))
                            }
                        } else {
                            Value::Text(cell)
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            columns,
            rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    /// All cells of a column, stringified, in row order.
    pub fn text_column(&self, column: &str) -> Vec<String> {
        match self.column_index(column) {
            Some(col) => self.rows.iter().map(|r| r[col].to_string()).collect(),
            None => Vec::new(),
        }
    }

    /// Distinct values of a column, sorted ascending.
    pub fn distinct_sorted(&self, column: &str) -> Vec<String> {
        let mut values = self.text_column(column);
        values.sort();
        values.dedup();
        values
    }

    /// Copy of this table without the named columns. Unknown names are ignored.
    pub fn drop_columns(&self, names: &[&str]) -> Self {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.contains(&self.columns[i].as_str()))
            .collect();
        Self {
            name: self.name.clone(),
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Rename columns in place per `(from, to)` pairs. Unknown names are ignored.
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) {
        for column in &mut self.columns {
            if let Some((_, to)) = renames.iter().find(|(from, _)| from == column) {
                *column = to.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_types_and_order() {
        let table = DataTable::from_text(
            "genes",
            "GeneSymbol,AML,CLL,Total\nEYS,4,2,10\nTP53,1,0,3\n",
            b',',
        )
        .unwrap();

        assert_eq!(table.columns, vec!["GeneSymbol", "AML", "CLL", "Total"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.cell(0, 0), &Value::Text("EYS".to_string()));
        assert_eq!(table.cell(0, 1), &Value::Number(4.0));
        assert_eq!(table.cell(1, 3), &Value::Number(3.0));
    }

    #[test]
    fn test_parse_tsv() {
        let table =
            DataTable::from_text("annot", "Cohort\tStudy group\nAML\tMyeloid\n", b'\t').unwrap();
        assert_eq!(table.columns, vec!["Cohort", "Study group"]);
        assert_eq!(table.cell(0, 1), &Value::Text("Myeloid".to_string()));
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let table = DataTable::from_text("t", "id,x\na,1\nb,n/a\n", b',').unwrap();
        assert_eq!(table.cell(0, 1), &Value::Text("1".to_string()));
        assert_eq!(table.cell(1, 1), &Value::Text("n/a".to_string()));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        assert!(DataTable::from_text("t", "a,b\n1,2,3\n", b',').is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = DataTable::from_path("t", Path::new("/nonexistent/t.csv"), b',').unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_drop_and_rename_columns() {
        let mut table = DataTable::from_text("t", "a,b,c\n1,2,3\n", b',')
            .unwrap()
            .drop_columns(&["b"]);
        table.rename_columns(&[("c", "z")]);
        assert_eq!(table.columns, vec!["a", "z"]);
        assert_eq!(table.rows[0], vec![Value::Number(1.0), Value::Number(3.0)]);
    }

    #[test]
    fn test_distinct_sorted() {
        let table = DataTable::from_text("t", "e\nCLL\nAML\nCLL\n", b',').unwrap();
        assert_eq!(table.distinct_sorted("e"), vec!["AML", "CLL"]);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Value::Number(10.0).to_string(), "10");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
        assert_eq!(Value::Number(f64::NAN).to_string(), "");
        assert_eq!(Value::Text("EYS".to_string()).to_string(), "EYS");
    }
}
