//! Per-column type inference.
//!
//! Every column gets one dtype decided by the strict majority of its
//! non-null cells. Cells that do not conform to the chosen dtype become
//! null. Integers widen to floats as soon as one float is present. Columns
//! without a majority stay text, so no value is lost.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataType, IntoColumn, NamedFrom, PolarsResult, Series, TimeUnit};

/// Datetime layouts accepted for timestamp cells.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts; parsed as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Logical type chosen for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    Integer,
    Float,
    Timestamp,
    Text,
}

impl ColumnType {
    /// Polars dtype the column is materialized as.
    pub fn dtype(self) -> DataType {
        match self {
            Self::Boolean => DataType::Boolean,
            Self::Integer => DataType::Int64,
            Self::Float => DataType::Float64,
            Self::Timestamp => DataType::Datetime(TimeUnit::Milliseconds, None),
            Self::Text => DataType::String,
        }
    }
}

#[derive(Debug, Default)]
struct TypeVotes {
    non_null: usize,
    boolean: usize,
    integer: usize,
    float: usize,
    timestamp: usize,
}

impl TypeVotes {
    fn record(&mut self, value: &str) {
        self.non_null += 1;
        if parse_bool(value).is_some() {
            self.boolean += 1;
        } else if parse_int(value).is_some() {
            self.integer += 1;
        } else if parse_float(value).is_some() {
            self.float += 1;
        } else if parse_timestamp(value).is_some() {
            self.timestamp += 1;
        }
    }

    fn is_majority(&self, count: usize) -> bool {
        count * 2 > self.non_null
    }

    fn decide(&self) -> ColumnType {
        if self.non_null == 0 {
            return ColumnType::Text;
        }
        if self.is_majority(self.boolean) {
            return ColumnType::Boolean;
        }
        if self.is_majority(self.integer + self.float) {
            return if self.float == 0 {
                ColumnType::Integer
            } else {
                ColumnType::Float
            };
        }
        if self.is_majority(self.timestamp) {
            return ColumnType::Timestamp;
        }
        ColumnType::Text
    }
}

/// Chooses the column type from its cells (`None` = missing).
pub fn infer_column_type(cells: &[Option<&str>]) -> ColumnType {
    let mut votes = TypeVotes::default();
    for value in cells.iter().flatten() {
        votes.record(value);
    }
    votes.decide()
}

/// Materializes the cells as a typed polars column.
pub fn build_column(name: &str, cells: &[Option<&str>], ty: ColumnType) -> PolarsResult<Column> {
    let series = match ty {
        ColumnType::Boolean => {
            let values: Vec<Option<bool>> =
                cells.iter().map(|c| c.and_then(parse_bool)).collect();
            Series::new(name.into(), values)
        }
        ColumnType::Integer => {
            let values: Vec<Option<i64>> = cells.iter().map(|c| c.and_then(parse_int)).collect();
            Series::new(name.into(), values)
        }
        ColumnType::Float => {
            let values: Vec<Option<f64>> =
                cells.iter().map(|c| c.and_then(parse_float)).collect();
            Series::new(name.into(), values)
        }
        ColumnType::Timestamp => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|c| {
                    c.and_then(parse_timestamp)
                        .map(|ts| ts.and_utc().timestamp_millis())
                })
                .collect();
            Series::new(name.into(), values).cast(&ty.dtype())?
        }
        ColumnType::Text => {
            let values: Vec<Option<String>> =
                cells.iter().map(|c| c.map(str::to_string)).collect();
            Series::new(name.into(), values)
        }
    };
    Ok(series.into_column())
}

fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    // Cheap reject before trying every layout.
    if trimmed.len() < 8 || !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|ts| ts.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells<'a>(values: &[&'a str]) -> Vec<Option<&'a str>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(*v) })
            .collect()
    }

    #[test]
    fn test_infer_integer() {
        assert_eq!(
            infer_column_type(&cells(&["25", "30", ""])),
            ColumnType::Integer
        );
    }

    #[test]
    fn test_infer_float_widens_integers() {
        assert_eq!(
            infer_column_type(&cells(&["1", "2", "3.5"])),
            ColumnType::Float
        );
    }

    #[test]
    fn test_infer_boolean_case_insensitive() {
        assert_eq!(
            infer_column_type(&cells(&["true", "FALSE", "True"])),
            ColumnType::Boolean
        );
    }

    #[test]
    fn test_infer_timestamp() {
        assert_eq!(
            infer_column_type(&cells(&["2024-01-01", "2024-01-02 10:30:00", "2024-01-03T08:00:00"])),
            ColumnType::Timestamp
        );
    }

    #[test]
    fn test_infer_text_without_majority() {
        assert_eq!(
            infer_column_type(&cells(&["1", "a", "b", "2"])),
            ColumnType::Text
        );
        assert_eq!(infer_column_type(&cells(&["NYC", "LA"])), ColumnType::Text);
    }

    #[test]
    fn test_infer_all_missing_is_text() {
        assert_eq!(infer_column_type(&cells(&["", ""])), ColumnType::Text);
        assert_eq!(infer_column_type(&[]), ColumnType::Text);
    }

    #[test]
    fn test_build_column_coerces_non_conforming_to_null() {
        let values = cells(&["1", "2", "x"]);
        let ty = infer_column_type(&values);
        assert_eq!(ty, ColumnType::Integer);

        let column = build_column("n", &values, ty).unwrap();
        assert_eq!(column.dtype(), &DataType::Int64);
        assert_eq!(column.null_count(), 1);
        let series = column.as_materialized_series();
        let ints: Vec<Option<i64>> = series.i64().unwrap().into_iter().collect();
        assert_eq!(ints, vec![Some(1), Some(2), None]);
    }

    #[test]
    fn test_build_timestamp_column() {
        let values = cells(&["2024-01-01", ""]);
        let column = build_column("d", &values, ColumnType::Timestamp).unwrap();
        assert_eq!(
            column.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-01").is_some());
        assert!(parse_timestamp("2024/01/01").is_some());
        assert!(parse_timestamp("2024-01-01 00:00:00.000").is_some());
        assert!(parse_timestamp("2024-01-01T12:00:00+02:00").is_some());
        assert!(parse_timestamp("January").is_none());
        assert!(parse_timestamp("12").is_none());
    }
}
