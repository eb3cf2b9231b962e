//! Numeric coercion of raw cells.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};

/// Parses one cell as a number.
///
/// Returns `None` for empty text, text that is not a number, and text that
/// parses to NaN. Infinite values are kept.
pub fn coerce_cell(value: &str) -> Option<f64> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => None,
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

/// Coerces column `column` of every row into a nullable `Float64Array`.
///
/// Failed conversions become nulls; nothing is reported.
pub fn coerce_column(rows: &[Vec<String>], column: usize) -> ArrayRef {
    let values: Float64Array = rows
        .iter()
        .map(|row| row.get(column).and_then(|cell| coerce_cell(cell)))
        .collect();
    Arc::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::Float64Type;

    #[test]
    fn test_coerce_cell() {
        assert_eq!(coerce_cell("1.5"), Some(1.5));
        assert_eq!(coerce_cell(" -2 "), Some(-2.0));
        assert_eq!(coerce_cell("1e3"), Some(1000.0));
        assert_eq!(coerce_cell("inf"), Some(f64::INFINITY));
        assert_eq!(coerce_cell(""), None);
        assert_eq!(coerce_cell("NaN"), None);
        assert_eq!(coerce_cell("abc"), None);
        assert_eq!(coerce_cell("1,000"), None);
    }

    #[test]
    fn test_coerce_column_marks_failures_as_null() {
        let rows = vec![
            vec!["a".to_string(), "1".to_string()],
            vec!["b".to_string(), "x".to_string()],
            vec!["c".to_string(), "".to_string()],
        ];
        let array = coerce_column(&rows, 1);
        let values = array.as_primitive::<Float64Type>();

        assert_eq!(values.len(), 3);
        assert_eq!(values.null_count(), 2);
        assert_eq!(values.value(0), 1.0);

        // a text-only column becomes all nulls
        assert_eq!(coerce_column(&rows, 0).null_count(), 3);
    }
}
