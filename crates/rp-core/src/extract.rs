//! Column selection and reshaping for the chart views
//!
//! A batch arrives from the data source with an arbitrary set of columns;
//! the panel needs exactly two of them, one for segment labels and one for
//! segment magnitudes. Selection is by exact name with a positional
//! fallback: label falls back to column 0, value to column 1. The two
//! resolutions are independent, so a label name that happens to resolve to
//! column 1 does not stop the value fallback from picking column 1 as well.

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::scalar::{column_values, value_at, ScalarValue};
use crate::ExtractError;

/// The user's desired label/value columns.
///
/// Both names are optional; an absent or unmatched name means the
/// positional fallback applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSelection {
    pub label_field: Option<String>,
    pub value_field: Option<String>,
}

impl SeriesSelection {
    pub fn new(label_field: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            label_field: Some(label_field.into()),
            value_field: Some(value_field.into()),
        }
    }
}

/// Parallel label/value sequences resolved from one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Name of the column backing the labels
    pub label_field: String,
    /// Name of the column backing the values
    pub value_field: String,
    /// Label cells in original row order
    pub labels: Vec<ScalarValue>,
    /// Value cells in original row order
    pub values: Vec<ScalarValue>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// [`ChartSeries`] plus the full-table reshape, for the data dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct FullChartData {
    pub series: ChartSeries,
    /// Every column name, in frame order
    pub column_names: Vec<String>,
    /// Row-major reshape: `rows[i][j]` is column `j` at row `i`
    pub rows: Vec<Vec<ScalarValue>>,
}

/// Match by exact name, else take the column at `fallback`.
fn resolve_column(batch: &RecordBatch, name: Option<&str>, fallback: usize) -> (String, ArrayRef) {
    let schema = batch.schema();
    let index = name
        .and_then(|n| schema.fields().iter().position(|f| f.name() == n))
        .unwrap_or(fallback);
    (schema.field(index).name().clone(), batch.column(index).clone())
}

/// Select the label/value columns of `batch` and reshape them into parallel
/// sequences.
///
/// Fails only when the batch has fewer than two columns; zero rows is a
/// valid result with empty sequences.
pub fn extract_series(
    batch: &RecordBatch,
    selection: &SeriesSelection,
) -> Result<ChartSeries, ExtractError> {
    if batch.num_columns() < 2 {
        return Err(ExtractError::NotEnoughFields);
    }

    let (label_field, label_col) = resolve_column(batch, selection.label_field.as_deref(), 0);
    let (value_field, value_col) = resolve_column(batch, selection.value_field.as_deref(), 1);

    Ok(ChartSeries {
        label_field,
        value_field,
        labels: column_values(&label_col),
        values: column_values(&value_col),
    })
}

/// [`extract_series`] plus every column name and a row-major reshape of the
/// whole batch, for callers that also show the raw table.
pub fn extract_full(
    batch: &RecordBatch,
    selection: &SeriesSelection,
) -> Result<FullChartData, ExtractError> {
    let series = extract_series(batch, selection)?;

    let column_names = batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let rows = (0..batch.num_rows())
        .map(|row| batch.columns().iter().map(|col| value_at(col, row)).collect())
        .collect();

    Ok(FullChartData {
        series,
        column_names,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, col)| Field::new(*name, col.data_type().clone(), true))
            .collect();
        let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, col)| col).collect();
        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
    }

    fn site_count_batch() -> RecordBatch {
        batch(vec![
            ("Site", Arc::new(StringArray::from(vec!["A", "B"])) as ArrayRef),
            ("Count", Arc::new(Int64Array::from(vec![3, 7])) as ArrayRef),
        ])
    }

    fn strs(values: &[&str]) -> Vec<ScalarValue> {
        values.iter().map(|s| ScalarValue::Str(s.to_string())).collect()
    }

    fn ints(values: &[i64]) -> Vec<ScalarValue> {
        values.iter().map(|v| ScalarValue::Int(*v)).collect()
    }

    #[test]
    fn test_defaults_to_first_two_columns() {
        let series = extract_series(&site_count_batch(), &SeriesSelection::default()).unwrap();

        assert_eq!(series.label_field, "Site");
        assert_eq!(series.value_field, "Count");
        assert_eq!(series.labels, strs(&["A", "B"]));
        assert_eq!(series.values, ints(&[3, 7]));
    }

    #[test]
    fn test_named_selection_ignores_position() {
        let batch = batch(vec![
            ("X", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
            ("Y", Arc::new(Int64Array::from(vec![3, 4])) as ArrayRef),
            ("Site", Arc::new(StringArray::from(vec!["A", "B"])) as ArrayRef),
            ("Count", Arc::new(Int64Array::from(vec![5, 6])) as ArrayRef),
        ]);

        let series = extract_series(&batch, &SeriesSelection::new("Site", "Count")).unwrap();

        assert_eq!(series.label_field, "Site");
        assert_eq!(series.value_field, "Count");
        assert_eq!(series.labels, strs(&["A", "B"]));
        assert_eq!(series.values, ints(&[5, 6]));
    }

    #[test]
    fn test_unmatched_names_fall_back_to_positions() {
        let series =
            extract_series(&site_count_batch(), &SeriesSelection::new("nope", "missing")).unwrap();

        assert_eq!(series.label_field, "Site");
        assert_eq!(series.value_field, "Count");
    }

    #[test]
    fn test_fallbacks_are_independent() {
        // Label and value resolve independently: a label name matching the
        // column at position 1 does not shift the value fallback, so both
        // axes end up backed by the same column.
        let series =
            extract_series(&site_count_batch(), &SeriesSelection::new("Count", "missing")).unwrap();

        assert_eq!(series.label_field, "Count");
        assert_eq!(series.value_field, "Count");
        assert_eq!(series.labels, series.values);
    }

    #[test]
    fn test_single_column_fails() {
        let batch = batch(vec![(
            "OnlyOne",
            Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
        )]);

        let err = extract_series(&batch, &SeriesSelection::default()).unwrap_err();
        assert_eq!(err, ExtractError::NotEnoughFields);
        assert_eq!(err.to_string(), "Not enough fields in the data.");
    }

    #[test]
    fn test_no_columns_fails_with_same_message() {
        let batch = RecordBatch::new_empty(Arc::new(Schema::empty()));
        let err = extract_series(&batch, &SeriesSelection::default()).unwrap_err();
        assert_eq!(err.to_string(), "Not enough fields in the data.");
    }

    #[test]
    fn test_zero_rows_is_a_valid_result() {
        let batch = batch(vec![
            ("Site", Arc::new(StringArray::from(Vec::<&str>::new())) as ArrayRef),
            ("Count", Arc::new(Int64Array::from(Vec::<i64>::new())) as ArrayRef),
        ]);

        let series = extract_series(&batch, &SeriesSelection::default()).unwrap();
        assert!(series.is_empty());
        assert!(series.values.is_empty());
    }

    #[test]
    fn test_lengths_match_row_count() {
        let batch = batch(vec![
            ("Site", Arc::new(StringArray::from(vec!["A", "B", "C"])) as ArrayRef),
            ("Count", Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])) as ArrayRef),
        ]);

        let series = extract_series(&batch, &SeriesSelection::default()).unwrap();
        assert_eq!(series.len(), batch.num_rows());
        assert_eq!(series.labels.len(), series.values.len());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let batch = site_count_batch();
        let selection = SeriesSelection::new("Site", "Count");

        let first = extract_full(&batch, &selection).unwrap();
        let second = extract_full(&batch, &selection).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_extraction_reshapes_rows() {
        let batch = batch(vec![
            ("Site", Arc::new(StringArray::from(vec!["A", "B"])) as ArrayRef),
            ("Count", Arc::new(Int64Array::from(vec![3, 7])) as ArrayRef),
            ("Uptime", Arc::new(Float64Array::from(vec![0.9, 0.5])) as ArrayRef),
        ]);

        let full = extract_full(&batch, &SeriesSelection::default()).unwrap();

        assert_eq!(full.column_names, vec!["Site", "Count", "Uptime"]);
        assert_eq!(full.rows.len(), batch.num_rows());
        for (i, row) in full.rows.iter().enumerate() {
            assert_eq!(row.len(), batch.num_columns());
            for (j, cell) in row.iter().enumerate() {
                assert_eq!(*cell, value_at(batch.column(j), i));
            }
        }
        assert_eq!(full.rows[1][0], ScalarValue::Str("B".to_string()));
        assert_eq!(full.rows[0][1], ScalarValue::Int(3));
    }

    #[test]
    fn test_full_extraction_single_column_fails() {
        let batch = batch(vec![(
            "OnlyOne",
            Arc::new(Int64Array::from(vec![1])) as ArrayRef,
        )]);
        assert!(extract_full(&batch, &SeriesSelection::default()).is_err());
    }
}
