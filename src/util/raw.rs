//! Raw parsed tables, the input of every entity reader.
//!
//! A workbook is a set of named tables; a table is a set of named, equally long
//! columns. On disk a workbook is a JSON object of objects of arrays:
//!
//! ```json
//! { "discount": { "year": [2000, 2001], "discount_rate": [0.02, 0.02] } }
//! ```
use crate::error::{EntityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Numbers(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numbers(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    #[serde(skip)]
    name: String,
    #[serde(flatten)]
    columns: BTreeMap<String, Column>,
}

impl RawTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), columns: BTreeMap::new() }
    }

    pub fn with_column(mut self, field: impl Into<String>, column: Column) -> Self {
        self.columns.insert(field.into(), column);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows, taken from the longest column.
    pub fn n_rows(&self) -> usize {
        self.columns.values().map(Column::len).max().unwrap_or(0)
    }

    pub fn column(&self, field: &str) -> Result<&Column> {
        self.columns.get(field).ok_or_else(|| EntityError::MissingField {
            field: field.to_string(),
            table: self.name.clone(),
        })
    }

    pub fn numbers(&self, field: &str) -> Result<&[f64]> {
        match self.column(field)? {
            Column::Numbers(v) => Ok(v),
            Column::Text(_) => Err(EntityError::InvalidValue {
                field: field.to_string(),
                row: 0,
                reason: "expected numbers, found text".into(),
            }),
        }
    }

    pub fn texts(&self, field: &str) -> Result<&[String]> {
        match self.column(field)? {
            Column::Text(v) => Ok(v),
            Column::Numbers(_) => Err(EntityError::InvalidValue {
                field: field.to_string(),
                row: 0,
                reason: "expected text, found numbers".into(),
            }),
        }
    }

    /// Reads a numeric column whose values must all be whole numbers.
    pub fn integers(&self, field: &str) -> Result<Vec<i64>> {
        // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        self.numbers(field)?
            .iter()
            .enumerate()
            .map(|(row, &val)| {
                let invalid = |reason: String| EntityError::InvalidValue {
                    field: field.to_string(),
                    row,
                    reason,
                };
                if !val.is_finite() || val.fract() != 0.0 {
                    Err(invalid(format!("{} is not an integer", val)))
                } else if val < -LIMIT || val >= LIMIT {
                    Err(invalid(format!("{} is out of the integer range", val)))
                } else {
                    Ok(val as i64)
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawWorkbook {
    tables: BTreeMap<String, RawTable>,
}

impl RawWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: RawTable) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let workbook: Self = serde_json::from_str(s)?;
        Ok(workbook.named())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let workbook: Self = serde_json::from_reader(reader)?;
        Ok(workbook.named())
    }

    /// Looks up a table; `file` only feeds the error message.
    pub fn table(&self, name: &str, file: &Path) -> Result<&RawTable> {
        self.tables.get(name).ok_or_else(|| EntityError::MissingTable {
            table: name.to_string(),
            file: file.to_path_buf(),
        })
    }

    // Table names live in the map keys only; copy them into each table.
    fn named(mut self) -> Self {
        for (name, table) in self.tables.iter_mut() {
            table.name = name.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK: &str = r#"{
        "discount": { "year": [2000, 2001], "discount_rate": [0.02, 0.03] },
        "names": { "name": ["a", "b", "c"] }
    }"#;

    #[test]
    fn test_parse_workbook() {
        let wb = RawWorkbook::from_json_str(WORKBOOK).unwrap();
        let table = wb.table("discount", Path::new("mem")).unwrap();
        assert_eq!(table.name(), "discount");
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.integers("year").unwrap(), vec![2000, 2001]);
        assert_eq!(table.numbers("discount_rate").unwrap(), &[0.02, 0.03]);

        let names = wb.table("names", Path::new("mem")).unwrap();
        assert_eq!(names.texts("name").unwrap().len(), 3);
    }

    #[test]
    fn test_missing_lookups() {
        let wb = RawWorkbook::from_json_str(WORKBOOK).unwrap();
        let err = wb.table("hazard", Path::new("mem.json")).unwrap_err();
        assert!(matches!(err, EntityError::MissingTable { .. }));

        let table = wb.table("discount", Path::new("mem.json")).unwrap();
        match table.numbers("rate").unwrap_err() {
            EntityError::MissingField { field, table } => {
                assert_eq!(field, "rate");
                assert_eq!(table, "discount");
            }
            other => panic!("Wrong error type: {}", other),
        }
    }

    #[test]
    fn test_kind_mismatch() {
        let wb = RawWorkbook::from_json_str(WORKBOOK).unwrap();
        let names = wb.table("names", Path::new("mem")).unwrap();
        assert!(matches!(names.numbers("name"), Err(EntityError::InvalidValue { .. })));

        let table = RawTable::new("t").with_column("year", Column::Numbers(vec![2000.5]));
        assert!(matches!(table.integers("year"), Err(EntityError::InvalidValue { row: 0, .. })));
    }

    #[test]
    fn test_integers_out_of_range() {
        let table = RawTable::new("t")
            .with_column("year", Column::Numbers(vec![2000.0, 1e19]))
            .with_column("low", Column::Numbers(vec![-1e19]))
            .with_column("edge", Column::Numbers(vec![9_223_372_036_854_775_808.0]))
            .with_column("min", Column::Numbers(vec![-9_223_372_036_854_775_808.0]));
        assert!(matches!(table.integers("year"), Err(EntityError::InvalidValue { row: 1, .. })));
        assert!(matches!(table.integers("low"), Err(EntityError::InvalidValue { row: 0, .. })));
        assert!(matches!(table.integers("edge"), Err(EntityError::InvalidValue { row: 0, .. })));
        assert_eq!(table.integers("min").unwrap(), vec![i64::MIN]);
    }
}
