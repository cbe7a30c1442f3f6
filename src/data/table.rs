//! Table Data Module
//! Named numeric columns sharing one numeric index, extracted from Polars.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Index column '{0}' is not numeric")]
    NonNumericIndex(String),
    #[error("Index column '{0}' contains nulls")]
    NullIndex(String),
    #[error("Column '{0}' has {1} rows, index has {2}")]
    LengthMismatch(String, usize, usize),
}

/// An ordered collection of named `f64` columns over a shared numeric index.
///
/// Values are materialized on construction; nulls in value columns become NaN
/// placeholders so every column stays aligned with the index. Statistics and
/// plotting skip NaN entries. The table never mutates its inputs.
#[derive(Debug, Clone)]
pub struct DataTable {
    index: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl DataTable {
    /// Build a table from an index and named value columns.
    pub fn new(index: Vec<f64>, columns: Vec<(String, Vec<f64>)>) -> Result<Self, TableError> {
        for (name, values) in &columns {
            if values.len() != index.len() {
                return Err(TableError::LengthMismatch(
                    name.clone(),
                    values.len(),
                    index.len(),
                ));
            }
        }
        Ok(Self { index, columns })
    }

    /// Extract `index_col` plus every other numeric column from a DataFrame.
    ///
    /// The index column must be numeric and null-free. Non-numeric value
    /// columns are skipped, matching how a frame plot ignores string columns.
    pub fn from_dataframe(df: &DataFrame, index_col: &str) -> Result<Self, TableError> {
        let index_column = df.column(index_col)?;
        if !is_numeric_dtype(index_column.dtype()) {
            return Err(TableError::NonNumericIndex(index_col.to_string()));
        }

        let index_f64 = index_column.cast(&DataType::Float64)?;
        let index_ca = index_f64.f64()?;
        let mut index = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            match index_ca.get(i) {
                Some(v) => index.push(v),
                None => return Err(TableError::NullIndex(index_col.to_string())),
            }
        }

        let mut columns = Vec::new();
        for column in df.get_columns() {
            if column.name().as_str() == index_col || !is_numeric_dtype(column.dtype()) {
                continue;
            }

            let values_f64 = column.cast(&DataType::Float64)?;
            let values_ca = values_f64.f64()?;
            let values: Vec<f64> = (0..df.height())
                .map(|i| values_ca.get(i).unwrap_or(f64::NAN))
                .collect();

            columns.push((column.name().to_string(), values));
        }

        Ok(Self { index, columns })
    }

    /// Number of rows (index entries).
    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// Number of value columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &[f64] {
        &self.index
    }

    /// Value columns in their original order.
    pub fn columns(&self) -> &[(String, Vec<f64>)] {
        &self.columns
    }

    /// Get list of column names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Values of a single column, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Minimum and maximum of the index, skipping non-finite entries.
    pub fn index_range(&self) -> Option<(f64, f64)> {
        min_max(self.index.iter().copied())
    }

    /// Global minimum and maximum across every value column, skipping NaN.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        min_max(
            self.columns
                .iter()
                .flat_map(|(_, values)| values.iter().copied()),
        )
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        range = Some(match range {
            Some((min, max)) => (min.min(v), max.max(v)),
            None => (v, v),
        });
    }
    range
}

/// Numeric dtypes eligible as index or value columns.
pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("day".into(), vec![0i64, 1, 2, 3]),
            Column::new("cases".into(), vec![1.0f64, 2.0, 3.0, 4.0]),
            Column::new("state".into(), vec!["a", "b", "c", "d"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_dataframe_extracts_numeric_columns() {
        let table = DataTable::from_dataframe(&sample_df(), "day").unwrap();
        assert_eq!(table.height(), 4);
        assert_eq!(table.width(), 1);
        assert_eq!(table.column_names(), vec!["cases".to_string()]);
        assert_eq!(table.index(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(table.column("cases").unwrap(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(table.column("state").is_none());
    }

    #[test]
    fn test_from_dataframe_rejects_string_index() {
        let err = DataTable::from_dataframe(&sample_df(), "state").unwrap_err();
        assert!(matches!(err, TableError::NonNumericIndex(_)));
    }

    #[test]
    fn test_from_dataframe_rejects_null_index() {
        let df = DataFrame::new(vec![
            Column::new("day".into(), vec![Some(0i64), None, Some(2)]),
            Column::new("cases".into(), vec![1.0f64, 2.0, 3.0]),
        ])
        .unwrap();
        let err = DataTable::from_dataframe(&df, "day").unwrap_err();
        assert!(matches!(err, TableError::NullIndex(_)));
    }

    #[test]
    fn test_from_dataframe_maps_null_values_to_nan() {
        let df = DataFrame::new(vec![
            Column::new("day".into(), vec![0i64, 1, 2]),
            Column::new("cases".into(), vec![Some(1.0f64), None, Some(3.0)]),
        ])
        .unwrap();
        let table = DataTable::from_dataframe(&df, "day").unwrap();
        let cases = table.column("cases").unwrap();
        assert_eq!(cases[0], 1.0);
        assert!(cases[1].is_nan());
        assert_eq!(cases[2], 3.0);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = DataTable::new(vec![0.0, 1.0], vec![("a".to_string(), vec![1.0])]).unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch(_, 1, 2)));
    }

    #[test]
    fn test_ranges() {
        let table = DataTable::new(
            vec![0.0, 1.0, 2.0],
            vec![
                ("a".to_string(), vec![5.0, f64::NAN, -1.0]),
                ("b".to_string(), vec![2.0, 9.0, 4.0]),
            ],
        )
        .unwrap();
        assert_eq!(table.index_range(), Some((0.0, 2.0)));
        assert_eq!(table.value_range(), Some((-1.0, 9.0)));
    }

    #[test]
    fn test_ranges_of_empty_table() {
        let table = DataTable::new(Vec::new(), Vec::new()).unwrap();
        assert_eq!(table.index_range(), None);
        assert_eq!(table.value_range(), None);
    }
}
