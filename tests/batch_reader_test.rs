//! Integration tests for the CSV batch reader

use kurs::adapters::batch::BatchReader;
use kurs::domain::KursError;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "id,item,price,currency,created_at,updated_at,system_timestamp";

fn write_batch(dir: &TempDir, name: &str, rows: &[&str]) {
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn test_batches_are_read_in_numeric_order() {
    let dir = TempDir::new().unwrap();
    write_batch(
        &dir,
        "batch10.csv",
        &["c,cup,3.00,EUR,2024-03-03T08:00:00Z,2024-03-03T08:00:00Z,2024-03-03T08:00:00Z"],
    );
    write_batch(
        &dir,
        "batch2.csv",
        &["b,bowl,2.00,EUR,2024-03-02T08:00:00Z,2024-03-02T08:00:00Z,2024-03-02T08:00:00Z"],
    );
    write_batch(
        &dir,
        "batch1.csv",
        &["a,plate,1.00,EUR,2024-03-01T08:00:00Z,2024-03-01T08:00:00Z,2024-03-01T08:00:00Z"],
    );

    let batches = BatchReader::new(dir.path()).read_all().unwrap();

    let names: Vec<&str> = batches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["batch1.csv", "batch2.csv", "batch10.csv"]);
}

#[test]
fn test_rows_keep_their_raw_string_fields() {
    let dir = TempDir::new().unwrap();
    write_batch(
        &dir,
        "batch1.csv",
        &[
            "sku-1,mug,12.50,NOK,2024-03-01T08:00:00Z,2024-03-01T09:30:00Z,2024-03-01T09:31:00Z",
            "sku-2,glass,7.25,USD,2024-03-01T08:00:00Z,2024-03-01T10:00:00Z,2024-03-01T10:01:00Z",
        ],
    );

    let batches = BatchReader::new(dir.path()).read_all().unwrap();
    assert_eq!(batches.len(), 1);

    let rows = &batches[0].rows;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "sku-1");
    assert_eq!(rows[0].price, "12.50");
    assert_eq!(rows[0].currency, "NOK");
    assert_eq!(rows[1].updated_at, "2024-03-01T10:00:00Z");
}

#[test]
fn test_non_csv_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_batch(
        &dir,
        "batch1.csv",
        &["a,plate,1.00,EUR,2024-03-01T08:00:00Z,2024-03-01T08:00:00Z,2024-03-01T08:00:00Z"],
    );
    fs::write(dir.path().join("README.txt"), "not a batch").unwrap();

    let batches = BatchReader::new(dir.path()).read_all().unwrap();
    assert_eq!(batches.len(), 1);
}

#[test]
fn test_empty_directory_yields_no_batches() {
    let dir = TempDir::new().unwrap();
    let batches = BatchReader::new(dir.path()).read_all().unwrap();
    assert!(batches.is_empty());
}

#[test]
fn test_malformed_csv_is_a_source_error() {
    let dir = TempDir::new().unwrap();
    // Row has fewer columns than the header
    write_batch(&dir, "batch1.csv", &["a,plate,1.00"]);

    let err = BatchReader::new(dir.path()).read_all().unwrap_err();
    assert!(matches!(err, KursError::Source(_)));
    assert!(err.to_string().contains("batch1.csv"));
}
