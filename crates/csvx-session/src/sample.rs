//! Built-in sample dataset for trying the explorer without a file.

use polars::prelude::{DataFrame, DataType, IntoColumn, NamedFrom, Series, TimeUnit};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::Result;

/// Number of rows in the sample dataset.
pub const SAMPLE_ROWS: usize = 100;

/// 2024-01-01T00:00:00Z in epoch milliseconds.
const SAMPLE_START_MILLIS: i64 = 1_704_067_200_000;
const DAY_MILLIS: i64 = 86_400_000;

const REGIONS: &[&str] = &["North", "South", "East", "West"];
const PRODUCTS: &[&str] = &["A", "B", "C"];

/// Generates the sample sales table.
///
/// Columns: `Date` (daily from 2024-01-01), `Sales` (integer in
/// `[1000, 5000)`), `Region`, and `Product`.
pub fn sample_dataset<R: Rng>(rng: &mut R) -> Result<DataFrame> {
    let dates: Vec<i64> = (0..SAMPLE_ROWS as i64)
        .map(|day| SAMPLE_START_MILLIS + day * DAY_MILLIS)
        .collect();
    let sales: Vec<i64> = (0..SAMPLE_ROWS)
        .map(|_| rng.random_range(1000..5000))
        .collect();
    let regions: Vec<&str> = (0..SAMPLE_ROWS)
        .map(|_| REGIONS.choose(rng).copied().unwrap_or("North"))
        .collect();
    let products: Vec<&str> = (0..SAMPLE_ROWS)
        .map(|_| PRODUCTS.choose(rng).copied().unwrap_or("A"))
        .collect();

    let date = Series::new("Date".into(), dates)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        .into_column();

    let df = DataFrame::new(vec![
        date,
        Series::new("Sales".into(), sales).into_column(),
        Series::new("Region".into(), regions).into_column(),
        Series::new("Product".into(), products).into_column(),
    ])?;
    tracing::debug!(rows = df.height(), "Generated sample dataset");
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvx_ingest::{CellValue, column_cells, column_names};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_shape() {
        let df = sample_dataset(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(df.height(), SAMPLE_ROWS);
        assert_eq!(column_names(&df), vec!["Date", "Sales", "Region", "Product"]);
    }

    #[test]
    fn test_sample_dates_are_daily() {
        let df = sample_dataset(&mut StdRng::seed_from_u64(7)).unwrap();
        let dates = column_cells(df.column("Date").unwrap()).unwrap();
        assert_eq!(dates[0].to_string(), "2024-01-01 00:00:00");
        assert_eq!(dates[1].to_string(), "2024-01-02 00:00:00");
        assert_eq!(dates[99].to_string(), "2024-04-09 00:00:00");
    }

    #[test]
    fn test_sample_value_ranges() {
        let df = sample_dataset(&mut StdRng::seed_from_u64(42)).unwrap();
        for cell in column_cells(df.column("Sales").unwrap()).unwrap() {
            match cell {
                CellValue::Int(value) => assert!((1000..5000).contains(&value)),
                other => panic!("unexpected sales cell {other:?}"),
            }
        }
        for cell in column_cells(df.column("Region").unwrap()).unwrap() {
            assert!(REGIONS.contains(&cell.to_string().as_str()));
        }
        for cell in column_cells(df.column("Product").unwrap()).unwrap() {
            assert!(PRODUCTS.contains(&cell.to_string().as_str()));
        }
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() {
        let first = sample_dataset(&mut StdRng::seed_from_u64(1)).unwrap();
        let second = sample_dataset(&mut StdRng::seed_from_u64(1)).unwrap();
        assert!(first.equals_missing(&second));
    }
}
