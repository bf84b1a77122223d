//! Loader and snapshot-store tests over real files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use bandboard::data::filter::select;
use bandboard::data::loader::{load, load_performance, load_summary};
use bandboard::data::model::Selector;
use bandboard::error::DataLoadError;
use bandboard::store::TableStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PERF_HEADER: &str = "Band,Year,Service_Area,Blocks_Offered,Blocks_Bought,Percent_Sold,Companies,Reserve_Price_Total,Winning_Price_Total";

fn write_file(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn write_perf_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut lines = vec![PERF_HEADER];
    lines.extend_from_slice(rows);
    write_file(dir, "df_performance.csv", &lines)
}

fn write_summary_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut lines = vec!["Band,Year,Avg_Percent_Sold"];
    lines.extend_from_slice(rows);
    write_file(dir, "band_year_summary.csv", &lines)
}

// ---------------------------------------------------------------------------
// CSV loading
// ---------------------------------------------------------------------------

#[test]
fn loads_both_tables_from_csv() {
    let dir = TempDir::new().unwrap();
    let perf = write_perf_csv(&dir, &["700,2022,Delhi,10,6,60.0,3,100.0,80.0"]);
    let summary = write_summary_csv(&dir, &["800,2021,45.5"]);

    let (perf_table, summary_table) = load(&perf, &summary).unwrap();
    assert_eq!(perf_table.len(), 1);
    assert_eq!(summary_table.len(), 1);

    let rec = &perf_table.records[0];
    assert_eq!(rec.band, "700");
    assert_eq!(rec.year, "2022");
    assert_eq!(rec.service_area, "Delhi");
    assert_eq!(rec.blocks_offered, 10);
    assert_eq!(rec.winning_price_total, 80.0);

    let sum = &summary_table.records[0];
    assert_eq!(sum.band, "800");
    assert_eq!(sum.avg_percent_sold, 45.5);
}

#[test]
fn trims_key_columns_on_load() {
    let dir = TempDir::new().unwrap();
    let perf = write_perf_csv(&dir, &[" 700 ,2022 , Delhi ,10,6,60.0,3,100.0,80.0"]);

    let table = load_performance(&perf).unwrap();
    let rec = &table.records[0];
    assert_eq!(rec.band, "700");
    assert_eq!(rec.year, "2022");
    assert_eq!(rec.service_area, "Delhi");

    // Loader trimming and selector trimming must agree.
    assert!(select(&table, &Selector::new("700", "2022", "Delhi")).is_some());
}

#[test]
fn missing_column_fails_the_load() {
    let dir = TempDir::new().unwrap();
    // No Percent_Sold column at all.
    let path = write_file(
        &dir,
        "bad.csv",
        &["Band,Year,Service_Area", "700,2022,Delhi"],
    );

    let err = load_performance(&path).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::MissingColumn {
            column: "Blocks_Offered" | "Blocks_Bought" | "Percent_Sold" | "Companies"
                | "Reserve_Price_Total" | "Winning_Price_Total",
            ..
        }
    ));
}

#[test]
fn missing_column_is_reported_even_with_zero_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.csv", &["Band,Year"]);

    assert!(matches!(
        load_summary(&path).unwrap_err(),
        DataLoadError::MissingColumn {
            column: "Avg_Percent_Sold",
            ..
        }
    ));
}

#[test]
fn unparseable_numeric_fails_instead_of_becoming_zero() {
    let dir = TempDir::new().unwrap();
    let perf = write_perf_csv(&dir, &["700,2022,Delhi,ten,6,60.0,3,100.0,80.0"]);

    let err = load_performance(&perf).unwrap_err();
    match err {
        DataLoadError::InvalidNumber {
            row,
            column,
            value,
            ..
        } => {
            assert_eq!(row, 0);
            assert_eq!(column, "Blocks_Offered");
            assert_eq!(value, "ten");
        }
        other => panic!("expected InvalidNumber, got {other:?}"),
    }
}

#[test]
fn unsupported_extension_is_rejected() {
    let path = Path::new("df_performance.parquet");
    assert!(matches!(
        load_performance(path).unwrap_err(),
        DataLoadError::UnsupportedExtension(ext) if ext == "parquet"
    ));
}

// ---------------------------------------------------------------------------
// JSON loading
// ---------------------------------------------------------------------------

#[test]
fn loads_json_and_coerces_numeric_keys_to_text() {
    let dir = TempDir::new().unwrap();
    let perf = write_file(
        &dir,
        "df_performance.json",
        &[r#"[{"Band": 700, "Year": 2022, "Service_Area": " Delhi ",
             "Blocks_Offered": 10, "Blocks_Bought": 6, "Percent_Sold": 60.0,
             "Companies": 3, "Reserve_Price_Total": 100.0,
             "Winning_Price_Total": 80.0}]"#],
    );

    let table = load_performance(&perf).unwrap();
    let rec = &table.records[0];
    assert_eq!(rec.band, "700");
    assert_eq!(rec.year, "2022");
    assert_eq!(rec.service_area, "Delhi");
    assert_eq!(rec.percent_sold, 60.0);
}

#[test]
fn json_row_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let summary = write_file(
        &dir,
        "band_year_summary.json",
        &[r#"[{"Band": "800", "Year": "2021"}]"#],
    );

    assert!(matches!(
        load_summary(&summary).unwrap_err(),
        DataLoadError::MissingColumn {
            column: "Avg_Percent_Sold",
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Snapshot store
// ---------------------------------------------------------------------------

#[test]
fn reload_swaps_snapshot_without_disturbing_old_readers() {
    let dir = TempDir::new().unwrap();
    let perf = write_perf_csv(&dir, &["700,2022,Delhi,10,6,60.0,3,100.0,80.0"]);
    let summary = write_summary_csv(&dir, &["700,2022,60.0"]);

    let store = TableStore::open(&perf, &summary).unwrap();
    let before = store.snapshot();

    // Rewrite the inputs and reload; the old snapshot must stay intact.
    write_perf_csv(
        &dir,
        &[
            "700,2022,Delhi,10,6,60.0,3,100.0,80.0",
            "800,2021,Mumbai,20,5,25.0,4,200.0,60.0",
        ],
    );
    store.reload(&perf, &summary).unwrap();

    let after = store.snapshot();
    assert_eq!(before.performance.len(), 1);
    assert_eq!(after.performance.len(), 2);
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let perf = write_perf_csv(&dir, &["700,2022,Delhi,10,6,60.0,3,100.0,80.0"]);
    let summary = write_summary_csv(&dir, &["700,2022,60.0"]);

    let store = TableStore::open(&perf, &summary).unwrap();

    write_perf_csv(&dir, &["700,2022,Delhi,ten,6,60.0,3,100.0,80.0"]);
    assert!(store.reload(&perf, &summary).is_err());

    let snapshot = store.snapshot();
    assert_eq!(snapshot.performance.len(), 1);
    assert_eq!(snapshot.performance.records[0].blocks_offered, 10);
}
