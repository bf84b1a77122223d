use std::collections::HashMap;

use serde::Serialize;

use super::model::{band_year_label, PerformanceTable};
use crate::error::DuplicateKeyError;

// ---------------------------------------------------------------------------
// HeatmapMatrix – service area × band_year pivot of percent sold
// ---------------------------------------------------------------------------

/// Pivoted view of the performance table for heatmap rendering.
///
/// Rows are the distinct service areas in first-seen order; columns are the
/// distinct band_year labels in first-seen order. A `None` cell means no
/// row exists for that combination: it must render as an empty cell, never
/// as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `values[row][col]`, dense, same shape as the label vectors.
    pub values: Vec<Vec<Option<f64>>>,
}

impl HeatmapMatrix {
    /// Look up one cell by service area and band_year label.
    pub fn get(&self, service_area: &str, label: &str) -> Option<f64> {
        let row = self.row_labels.iter().position(|r| r == service_area)?;
        let col = self.col_labels.iter().position(|c| c == label)?;
        self.values[row][col]
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }
}

// ---------------------------------------------------------------------------
// Reshape – pivot the table onto the (service area, band_year) key
// ---------------------------------------------------------------------------

/// Pivot the performance table into a [`HeatmapMatrix`] with cell value =
/// percent sold.
///
/// The pivot key must be unique: two rows landing on the same
/// (service area, band_year) cell make the pivot ill-defined, so the call
/// fails with [`DuplicateKeyError`] instead of letting a later row silently
/// overwrite an earlier one.
pub fn reshape(table: &PerformanceTable) -> Result<HeatmapMatrix, DuplicateKeyError> {
    let mut row_labels: Vec<String> = Vec::new();
    let mut col_labels: Vec<String> = Vec::new();
    let mut row_index: HashMap<String, usize> = HashMap::new();
    let mut col_index: HashMap<String, usize> = HashMap::new();
    let mut values: Vec<Vec<Option<f64>>> = Vec::new();

    for rec in &table.records {
        let label = band_year_label(&rec.band, &rec.year);

        let row = *row_index.entry(rec.service_area.clone()).or_insert_with(|| {
            row_labels.push(rec.service_area.clone());
            values.push(vec![None; col_labels.len()]);
            row_labels.len() - 1
        });
        let col = *col_index.entry(label.clone()).or_insert_with(|| {
            col_labels.push(label.clone());
            for row in &mut values {
                row.push(None);
            }
            col_labels.len() - 1
        });

        if values[row][col].is_some() {
            return Err(DuplicateKeyError {
                service_area: rec.service_area.clone(),
                label,
            });
        }
        values[row][col] = Some(rec.percent_sold);
    }

    Ok(HeatmapMatrix {
        row_labels,
        col_labels,
        values,
    })
}
