//! Integration tests for CSV loading and validation.

use csvx_ingest::{
    CellValue, CsvLoader, ErrorKind, LoadOptions, RaggedRows, ValidationSpec, column_cells,
    column_names, load, row_cells, row_count, validate,
};
use polars::prelude::DataType;
use proptest::prelude::*;

#[test]
fn test_load_valid_csv() {
    let df = load("name,age,city\nJohn,25,NYC\nJane,30,LA".as_bytes()).unwrap();

    assert_eq!(row_count(&df), 2);
    assert_eq!(column_names(&df), vec!["name", "age", "city"]);
    assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);

    let first = row_cells(&df, 0).unwrap();
    assert_eq!(first[0], CellValue::Text("John".to_string()));
    assert_eq!(first[1], CellValue::Int(25));
}

#[test]
fn test_load_empty_csv() {
    let err = load("".as_bytes()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert!(err.to_string().to_lowercase().contains("empty"));
}

#[test]
fn test_load_malformed_csv() {
    let err = load("name,age,city\nJohn,25\nJane,30,LA,extra".as_bytes()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ParseFailure);
    assert!(err.to_string().starts_with("Error parsing CSV file: "));
}

#[test]
fn test_load_malformed_csv_padded() {
    let loader = CsvLoader::new(LoadOptions::new().with_ragged_rows(RaggedRows::Pad));
    let df = loader
        .load("name,age,city\nJohn,25\nJane,30,LA,extra".as_bytes())
        .unwrap();

    assert_eq!(row_count(&df), 2);
    let city = column_cells(df.column("city").unwrap()).unwrap();
    assert_eq!(city, vec![CellValue::Null, CellValue::Text("LA".to_string())]);
}

#[test]
fn test_load_csv_with_missing_values() {
    let df = load("name,age,city\nJohn,25,NYC\nJane,,LA\n,30,Chicago".as_bytes()).unwrap();

    assert_eq!(row_count(&df), 3);
    let age = column_cells(df.column("age").unwrap()).unwrap();
    let name = column_cells(df.column("name").unwrap()).unwrap();
    assert!(age[1].is_null());
    assert!(name[2].is_null());
}

#[test]
fn test_null_count_matches_missing_cells() {
    let df = load("A,B,C\n1,x,1.1\n2,y,2.2\n3,z,3.3\n,w,4.4\n5,v,5.5\n".as_bytes()).unwrap();

    let total_nulls: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
    assert_eq!(row_count(&df), 5);
    assert_eq!(df.width(), 3);
    assert_eq!(total_nulls, 1);
    assert_eq!(df.column("C").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_load_is_idempotent() {
    let content = b"name,age,joined\nJohn,25,2024-01-01\nJane,,2024-02-01\n".to_vec();
    let first = load(content.clone().as_slice()).unwrap();
    let second = load(content.as_slice()).unwrap();

    assert!(first.equals_missing(&second));
}

#[test]
fn test_validate_after_load() {
    let df = load("name,age,city\nJohn,25,NYC\nJane,30,LA".as_bytes()).unwrap();

    let rows = validate(&df, &ValidationSpec::new().with_min_rows(5));
    assert!(!rows.valid);
    assert!(rows.message.contains("minimum"));
    assert!(rows.message.contains("rows"));

    let columns = validate(
        &df,
        &ValidationSpec::new().with_required_columns(["name", "email"]),
    );
    assert!(!columns.valid);
    assert_eq!(columns.message, "Missing required columns: email");
}

fn header_and_rows() -> impl Strategy<Value = (usize, Vec<Vec<String>>)> {
    (1usize..6).prop_flat_map(|width| {
        let row = prop::collection::vec("v[a-z0-9]{0,6}", width);
        (Just(width), prop::collection::vec(row, 1..20))
    })
}

proptest! {
    #[test]
    fn prop_row_count_and_header_order((width, rows) in header_and_rows()) {
        let header: Vec<String> = (0..width).map(|i| format!("col{i}")).collect();
        let mut content = header.join(",");
        for row in &rows {
            content.push('\n');
            content.push_str(&row.join(","));
        }

        let df = load(content.as_bytes()).unwrap();
        prop_assert_eq!(row_count(&df), rows.len());
        prop_assert_eq!(column_names(&df), header);
    }

    #[test]
    fn prop_min_rows_verdict(rows in 1usize..10, min_rows in 0usize..12) {
        let mut content = String::from("id");
        for i in 0..rows {
            content.push_str(&format!("\n{i}"));
        }
        let df = load(content.as_bytes()).unwrap();
        let verdict = validate(&df, &ValidationSpec::new().with_min_rows(min_rows));
        prop_assert_eq!(verdict.valid, rows >= min_rows);
    }
}
