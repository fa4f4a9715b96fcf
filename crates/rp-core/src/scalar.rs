//! Scalar cell values read out of arrow columns
//!
//! The extractor treats cell payloads as opaque scalars; the views decide
//! how to display them or coerce them to numbers.

use std::fmt;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::util::display::array_value_to_string;

/// A single cell value pulled out of a column
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ScalarValue {
    /// Numeric coercion for chart magnitudes. Numeric strings are parsed,
    /// matching how the values land on a chart axis; everything else is None.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Int(v) => Some(*v as f64),
            ScalarValue::Float(v) => Some(*v),
            ScalarValue::Str(s) => s.trim().parse::<f64>().ok(),
            ScalarValue::Bool(_) | ScalarValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => Ok(()),
            ScalarValue::Bool(v) => write!(f, "{}", v),
            ScalarValue::Int(v) => write!(f, "{}", v),
            ScalarValue::Float(v) => write!(f, "{}", v),
            ScalarValue::Str(s) => f.write_str(s),
        }
    }
}

/// Read one cell from a column.
///
/// Downcasts the common array types directly; anything more exotic goes
/// through arrow's display formatting and comes back as a string.
pub fn value_at(column: &ArrayRef, row: usize) -> ScalarValue {
    if column.is_null(row) {
        return ScalarValue::Null;
    }

    if let Some(arr) = column.as_any().downcast_ref::<StringArray>() {
        return ScalarValue::Str(arr.value(row).to_string());
    }
    if let Some(arr) = column.as_any().downcast_ref::<Float64Array>() {
        return ScalarValue::Float(arr.value(row));
    }
    if let Some(arr) = column.as_any().downcast_ref::<Float32Array>() {
        return ScalarValue::Float(arr.value(row) as f64);
    }
    if let Some(arr) = column.as_any().downcast_ref::<Int64Array>() {
        return ScalarValue::Int(arr.value(row));
    }
    if let Some(arr) = column.as_any().downcast_ref::<Int32Array>() {
        return ScalarValue::Int(arr.value(row) as i64);
    }
    if let Some(arr) = column.as_any().downcast_ref::<BooleanArray>() {
        return ScalarValue::Bool(arr.value(row));
    }

    match array_value_to_string(column, row) {
        Ok(s) => ScalarValue::Str(s),
        Err(_) => ScalarValue::Null,
    }
}

/// Read a whole column in row order.
pub fn column_values(column: &ArrayRef) -> Vec<ScalarValue> {
    (0..column.len()).map(|i| value_at(column, i)).collect()
}
