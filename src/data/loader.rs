use std::path::Path;

use serde_json::Value as JsonValue;

use super::model::{PerformanceRecord, PerformanceTable, SummaryRecord, SummaryTable};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Column names as they appear in the input headers
// ---------------------------------------------------------------------------

const COL_BAND: &str = "Band";
const COL_YEAR: &str = "Year";
const COL_SERVICE_AREA: &str = "Service_Area";
const COL_BLOCKS_OFFERED: &str = "Blocks_Offered";
const COL_BLOCKS_BOUGHT: &str = "Blocks_Bought";
const COL_PERCENT_SOLD: &str = "Percent_Sold";
const COL_COMPANIES: &str = "Companies";
const COL_RESERVE_PRICE_TOTAL: &str = "Reserve_Price_Total";
const COL_WINNING_PRICE_TOTAL: &str = "Winning_Price_Total";
const COL_AVG_PERCENT_SOLD: &str = "Avg_Percent_Sold";

const PERFORMANCE_COLUMNS: &[&'static str] = &[
    COL_BAND,
    COL_YEAR,
    COL_SERVICE_AREA,
    COL_BLOCKS_OFFERED,
    COL_BLOCKS_BOUGHT,
    COL_PERCENT_SOLD,
    COL_COMPANIES,
    COL_RESERVE_PRICE_TOTAL,
    COL_WINNING_PRICE_TOTAL,
];

const SUMMARY_COLUMNS: &[&'static str] = &[COL_BAND, COL_YEAR, COL_AVG_PERCENT_SOLD];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load both input tables. Dispatch per file by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row
/// * `.json` – records-oriented array of objects keyed by the same column
///   names (the default `df.to_json(orient='records')` layout)
///
/// The key columns `Band`, `Year` and `Service_Area` are coerced to text
/// and trimmed so selector comparisons downstream are exact-match-safe.
/// Any missing required column or unparseable numeric cell fails the whole
/// load; nothing is coerced to zero and no partial tables are returned.
pub fn load(
    performance_path: &Path,
    summary_path: &Path,
) -> Result<(PerformanceTable, SummaryTable), DataLoadError> {
    let performance = load_performance(performance_path)?;
    let summary = load_summary(summary_path)?;
    log::info!(
        "loaded {} performance rows from {} and {} summary rows from {}",
        performance.len(),
        performance_path.display(),
        summary.len(),
        summary_path.display()
    );
    Ok((performance, summary))
}

/// Load the per-record performance table from one file.
pub fn load_performance(path: &Path) -> Result<PerformanceTable, DataLoadError> {
    let records = match extension_of(path)?.as_str() {
        "csv" => csv_rows(path, PERFORMANCE_COLUMNS, performance_row_from_csv)?,
        "json" => json_rows(path, performance_row_from_json)?,
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };
    Ok(PerformanceTable::from_records(records))
}

/// Load the pre-aggregated band/year summary table from one file.
pub fn load_summary(path: &Path) -> Result<SummaryTable, DataLoadError> {
    let records = match extension_of(path)?.as_str() {
        "csv" => csv_rows(path, SUMMARY_COLUMNS, summary_row_from_csv)?,
        "json" => json_rows(path, summary_row_from_json)?,
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };
    Ok(SummaryTable::from_records(records))
}

fn extension_of(path: &Path) -> Result<String, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext.is_empty() {
        return Err(DataLoadError::UnsupportedExtension(String::new()));
    }
    Ok(ext)
}

// ---------------------------------------------------------------------------
// CSV loading
// ---------------------------------------------------------------------------

/// A positioned view over one CSV record plus its header, so the per-table
/// row parsers can fetch cells by column name with uniform errors.
struct CsvRow<'a> {
    path: &'a Path,
    row: usize,
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
}

impl<'a> CsvRow<'a> {
    fn text(&self, column: &'static str) -> Result<&'a str, DataLoadError> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == column)
            .ok_or(DataLoadError::MissingColumn {
                path: self.path.to_path_buf(),
                column,
            })?;
        Ok(self.record.get(idx).unwrap_or(""))
    }

    /// Key-column cell: coerced to trimmed text.
    fn key(&self, column: &'static str) -> Result<String, DataLoadError> {
        Ok(self.text(column)?.trim().to_string())
    }

    fn f64(&self, column: &'static str) -> Result<f64, DataLoadError> {
        let cell = self.text(column)?;
        cell.trim()
            .parse::<f64>()
            .map_err(|_| self.invalid_number(column, cell))
    }

    fn u64(&self, column: &'static str) -> Result<u64, DataLoadError> {
        let cell = self.text(column)?;
        cell.trim()
            .parse::<u64>()
            .map_err(|_| self.invalid_number(column, cell))
    }

    fn invalid_number(&self, column: &'static str, value: &str) -> DataLoadError {
        DataLoadError::InvalidNumber {
            path: self.path.to_path_buf(),
            row: self.row,
            column,
            value: value.to_string(),
        }
    }
}

fn csv_rows<T>(
    path: &Path,
    required: &[&'static str],
    parse: fn(&CsvRow<'_>) -> Result<T, DataLoadError>,
) -> Result<Vec<T>, DataLoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    // Header check up front, so a column missing from an otherwise empty
    // file is still reported.
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = CsvRow {
            path,
            row: row_no,
            headers: &headers,
            record: &record,
        };
        rows.push(parse(&row)?);
    }
    Ok(rows)
}

fn performance_row_from_csv(row: &CsvRow<'_>) -> Result<PerformanceRecord, DataLoadError> {
    Ok(PerformanceRecord {
        band: row.key(COL_BAND)?,
        year: row.key(COL_YEAR)?,
        service_area: row.key(COL_SERVICE_AREA)?,
        blocks_offered: row.u64(COL_BLOCKS_OFFERED)?,
        blocks_bought: row.u64(COL_BLOCKS_BOUGHT)?,
        percent_sold: row.f64(COL_PERCENT_SOLD)?,
        companies: row.u64(COL_COMPANIES)?,
        reserve_price_total: row.f64(COL_RESERVE_PRICE_TOTAL)?,
        winning_price_total: row.f64(COL_WINNING_PRICE_TOTAL)?,
    })
}

fn summary_row_from_csv(row: &CsvRow<'_>) -> Result<SummaryRecord, DataLoadError> {
    Ok(SummaryRecord {
        band: row.key(COL_BAND)?,
        year: row.key(COL_YEAR)?,
        avg_percent_sold: row.f64(COL_AVG_PERCENT_SOLD)?,
    })
}

// ---------------------------------------------------------------------------
// JSON loading
// ---------------------------------------------------------------------------

/// One object of the records-oriented JSON array, with the same cell
/// accessors as `CsvRow`. JSON numbers in key columns are rendered as text
/// (a year may legitimately arrive as `2022` rather than `"2022"`).
struct JsonRow<'a> {
    path: &'a Path,
    row: usize,
    object: &'a serde_json::Map<String, JsonValue>,
}

impl JsonRow<'_> {
    fn value(&self, column: &'static str) -> Result<&JsonValue, DataLoadError> {
        self.object
            .get(column)
            .ok_or(DataLoadError::MissingColumn {
                path: self.path.to_path_buf(),
                column,
            })
    }

    fn key(&self, column: &'static str) -> Result<String, DataLoadError> {
        let text = match self.value(column)? {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            other => {
                return Err(DataLoadError::MalformedRow {
                    path: self.path.to_path_buf(),
                    row: self.row,
                    message: format!("column '{column}' is not text or a number: {other}"),
                })
            }
        };
        Ok(text.trim().to_string())
    }

    fn f64(&self, column: &'static str) -> Result<f64, DataLoadError> {
        let value = self.value(column)?;
        value
            .as_f64()
            .ok_or_else(|| self.invalid_number(column, value))
    }

    fn u64(&self, column: &'static str) -> Result<u64, DataLoadError> {
        let value = self.value(column)?;
        value
            .as_u64()
            .ok_or_else(|| self.invalid_number(column, value))
    }

    fn invalid_number(&self, column: &'static str, value: &JsonValue) -> DataLoadError {
        DataLoadError::InvalidNumber {
            path: self.path.to_path_buf(),
            row: self.row,
            column,
            value: value.to_string(),
        }
    }
}

fn json_rows<T>(
    path: &Path,
    parse: fn(&JsonRow<'_>) -> Result<T, DataLoadError>,
) -> Result<Vec<T>, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|source| DataLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let records = root.as_array().ok_or_else(|| DataLoadError::MalformedRow {
        path: path.to_path_buf(),
        row: 0,
        message: "expected a top-level JSON array".to_string(),
    })?;

    let mut rows = Vec::with_capacity(records.len());
    for (row_no, rec) in records.iter().enumerate() {
        let object = rec.as_object().ok_or_else(|| DataLoadError::MalformedRow {
            path: path.to_path_buf(),
            row: row_no,
            message: "row is not a JSON object".to_string(),
        })?;
        let row = JsonRow {
            path,
            row: row_no,
            object,
        };
        rows.push(parse(&row)?);
    }
    Ok(rows)
}

fn performance_row_from_json(row: &JsonRow<'_>) -> Result<PerformanceRecord, DataLoadError> {
    Ok(PerformanceRecord {
        band: row.key(COL_BAND)?,
        year: row.key(COL_YEAR)?,
        service_area: row.key(COL_SERVICE_AREA)?,
        blocks_offered: row.u64(COL_BLOCKS_OFFERED)?,
        blocks_bought: row.u64(COL_BLOCKS_BOUGHT)?,
        percent_sold: row.f64(COL_PERCENT_SOLD)?,
        companies: row.u64(COL_COMPANIES)?,
        reserve_price_total: row.f64(COL_RESERVE_PRICE_TOTAL)?,
        winning_price_total: row.f64(COL_WINNING_PRICE_TOTAL)?,
    })
}

fn summary_row_from_json(row: &JsonRow<'_>) -> Result<SummaryRecord, DataLoadError> {
    Ok(SummaryRecord {
        band: row.key(COL_BAND)?,
        year: row.key(COL_YEAR)?,
        avg_percent_sold: row.f64(COL_AVG_PERCENT_SOLD)?,
    })
}
