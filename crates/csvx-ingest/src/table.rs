//! Read-only helpers over loaded tables.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Timelike};
use polars::prelude::{Column, DataFrame, DataType, PolarsError, PolarsResult, TimeUnit};

/// Display layout for timestamp cells.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout used when a timestamp carries sub-second precision.
pub const TIMESTAMP_MILLIS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A single cell, decoupled from the Polars dtype it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// JSON form used by the explorer payload. Non-finite floats become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Int(value) => serde_json::Value::from(*value),
            Self::Float(value) => serde_json::Number::from_f64(*value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Timestamp(_) | Self::Text(_) => serde_json::Value::String(self.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            // Keep a decimal point so whole floats still read back as floats.
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Self::Float(value) => write!(f, "{value}"),
            Self::Timestamp(value) if value.nanosecond() != 0 => {
                write!(f, "{}", value.format(TIMESTAMP_MILLIS_FORMAT))
            }
            Self::Timestamp(value) => write!(f, "{}", value.format(TIMESTAMP_FORMAT)),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Number of data rows.
pub fn row_count(df: &DataFrame) -> usize {
    df.height()
}

/// Column names in table order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Extracts every cell of a column.
pub fn column_cells(column: &Column) -> PolarsResult<Vec<CellValue>> {
    let series = column.as_materialized_series();
    let dtype = series.dtype();

    let cells = if dtype == &DataType::Boolean {
        series
            .bool()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Null, CellValue::Bool))
            .collect()
    } else if dtype.is_integer() {
        let ints = series.cast(&DataType::Int64)?;
        ints.i64()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Null, CellValue::Int))
            .collect()
    } else if dtype.is_float() {
        let floats = series.cast(&DataType::Float64)?;
        floats
            .f64()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Null, CellValue::Float))
            .collect()
    } else if let DataType::Datetime(unit, _) = dtype {
        let unit = *unit;
        let raw = series.cast(&DataType::Int64)?;
        raw.i64()?
            .into_iter()
            .map(|v| {
                v.and_then(|value| timestamp_from(value, unit))
                    .map_or(CellValue::Null, CellValue::Timestamp)
            })
            .collect()
    } else {
        let text = series.cast(&DataType::String)?;
        text.str()?
            .into_iter()
            .map(|v| v.map_or(CellValue::Null, |s| CellValue::Text(s.to_string())))
            .collect()
    };

    Ok(cells)
}

/// Extracts one row as cells, in column order.
///
/// Fails with `OutOfBounds` when `row` is past the last row.
pub fn row_cells(df: &DataFrame, row: usize) -> PolarsResult<Vec<CellValue>> {
    if row >= df.height() {
        return Err(PolarsError::OutOfBounds(
            format!("row {row} out of bounds for table of {} rows", df.height()).into(),
        ));
    }
    let window = df.slice(row as i64, 1);
    let mut cells = Vec::with_capacity(window.width());
    for column in window.get_columns() {
        let mut values = column_cells(column)?;
        cells.push(values.pop().unwrap_or(CellValue::Null));
    }
    Ok(cells)
}

fn timestamp_from(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let ts = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    ts.map(|ts| ts.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Int(7).to_string(), "7");
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::Timestamp(ts).to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_cell_json() {
        assert_eq!(CellValue::Null.to_json(), serde_json::Value::Null);
        assert_eq!(CellValue::Int(3).to_json(), serde_json::json!(3));
        assert_eq!(CellValue::Float(f64::NAN).to_json(), serde_json::Value::Null);
        assert_eq!(
            CellValue::Text("NYC".to_string()).to_json(),
            serde_json::json!("NYC")
        );
    }

    #[test]
    fn test_column_cells_typed() {
        let df = load("a,b,c,d\n1,x,true,2024-01-02\n,y,false,\n".as_bytes()).unwrap();
        let a = column_cells(df.column("a").unwrap()).unwrap();
        assert_eq!(a, vec![CellValue::Int(1), CellValue::Null]);
        let b = column_cells(df.column("b").unwrap()).unwrap();
        assert_eq!(
            b,
            vec![
                CellValue::Text("x".to_string()),
                CellValue::Text("y".to_string())
            ]
        );
        let c = column_cells(df.column("c").unwrap()).unwrap();
        assert_eq!(c, vec![CellValue::Bool(true), CellValue::Bool(false)]);
        let d = column_cells(df.column("d").unwrap()).unwrap();
        assert_eq!(d[0].to_string(), "2024-01-02 00:00:00");
        assert!(d[1].is_null());
    }

    #[test]
    fn test_cell_display_keeps_milliseconds() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 500)
            .unwrap();
        let cell = CellValue::Timestamp(ts);
        assert_eq!(cell.to_string(), "2024-01-01 10:00:00.500");
        assert_eq!(cell.to_json(), serde_json::json!("2024-01-01 10:00:00.500"));
    }

    #[test]
    fn test_column_cells_sub_second_timestamps() {
        let df = load("at\n2024-01-01 10:00:00.500\n2024-01-01 10:00:01\n".as_bytes()).unwrap();
        let cells = column_cells(df.column("at").unwrap()).unwrap();
        assert_eq!(cells[0].to_string(), "2024-01-01 10:00:00.500");
        assert_eq!(cells[1].to_string(), "2024-01-01 10:00:01");
    }

    #[test]
    fn test_row_cells_out_of_range() {
        let df = load("name,age\nJohn,25\n".as_bytes()).unwrap();
        assert!(row_cells(&df, 0).is_ok());
        assert!(matches!(
            row_cells(&df, 1),
            Err(PolarsError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_row_cells() {
        let df = load("name,age\nJohn,25\nJane,30\n".as_bytes()).unwrap();
        let row = row_cells(&df, 1).unwrap();
        assert_eq!(
            row,
            vec![CellValue::Text("Jane".to_string()), CellValue::Int(30)]
        );
        assert_eq!(column_names(&df), vec!["name", "age"]);
        assert_eq!(row_count(&df), 2);
    }
}
