use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Records – one row of each source table
// ---------------------------------------------------------------------------

/// One row of the per-record auction performance table.
///
/// The (band, year, service_area) triple is expected to be unique per table
/// but is not enforced at load time; the reshape step rejects duplicates and
/// the selection step takes the first match (see `filter` and `reshape`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    /// Licensed spectrum frequency range, kept as trimmed text ("700").
    pub band: String,
    /// Auction year, kept as trimmed text ("2022").
    pub year: String,
    /// Geographic licensing region.
    pub service_area: String,
    pub blocks_offered: u64,
    pub blocks_bought: u64,
    /// Expected range [0, 100]; not enforced.
    pub percent_sold: f64,
    pub companies: u64,
    /// Sum of reserve prices for all offered blocks, in currency units.
    pub reserve_price_total: f64,
    /// Sum of winning prices for all sold blocks, in currency units.
    pub winning_price_total: f64,
}

/// One row of the pre-aggregated band/year summary table. No service-area
/// dimension: averaging across areas already happened upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub band: String,
    pub year: String,
    pub avg_percent_sold: f64,
}

// ---------------------------------------------------------------------------
// Band_Year label
// ---------------------------------------------------------------------------

/// Composite display/grouping key: `"{band}_{year}"`.
///
/// Plain concatenation with an underscore separator and no escaping of
/// embedded underscores; collisions are an accepted limitation. Both the
/// heatmap reshape and the summary projection go through this one function
/// so the two views stay consistent.
pub fn band_year_label(band: &str, year: &str) -> String {
    format!("{band}_{year}")
}

// ---------------------------------------------------------------------------
// Tables – immutable loaded snapshots
// ---------------------------------------------------------------------------

/// The full loaded performance table with pre-computed selector options.
///
/// Built once per load and never mutated afterwards, so concurrent readers
/// can share it behind an `Arc` without synchronization.
#[derive(Debug, Clone)]
pub struct PerformanceTable {
    /// All rows, in source file order.
    pub records: Vec<PerformanceRecord>,
    /// Sorted distinct bands (selector dropdown options).
    pub bands: Vec<String>,
    /// Sorted distinct years.
    pub years: Vec<String>,
    /// Sorted distinct service areas.
    pub service_areas: Vec<String>,
}

impl PerformanceTable {
    /// Build the selector-option indices from loaded rows.
    pub fn from_records(records: Vec<PerformanceRecord>) -> Self {
        let mut bands = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut service_areas = BTreeSet::new();

        for rec in &records {
            bands.insert(rec.band.clone());
            years.insert(rec.year.clone());
            service_areas.insert(rec.service_area.clone());
        }

        PerformanceTable {
            records,
            bands: bands.into_iter().collect(),
            years: years.into_iter().collect(),
            service_areas: service_areas.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The loaded band/year summary table, in source file order.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    pub records: Vec<SummaryRecord>,
}

impl SummaryTable {
    pub fn from_records(records: Vec<SummaryRecord>) -> Self {
        SummaryTable { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selector – the (band, year, service area) triple picked by the caller
// ---------------------------------------------------------------------------

/// An immutable selector triple, trimmed on construction.
///
/// Trimming here mirrors the trimming the loader applies to the key columns,
/// so `select` can use plain equality: selector normalization and table
/// normalization must stay symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub band: String,
    pub year: String,
    pub service_area: String,
}

impl Selector {
    pub fn new(band: &str, year: &str, service_area: &str) -> Self {
        Selector {
            band: band.trim().to_string(),
            year: year.trim().to_string(),
            service_area: service_area.trim().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// KpiBundle – the metric fields of one matched record
// ---------------------------------------------------------------------------

/// The KPI row for one matched performance record. Absent (the `select`
/// call returns `None`) when no row matches the selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiBundle {
    pub blocks_offered: u64,
    pub blocks_bought: u64,
    pub percent_sold: f64,
    pub companies: u64,
    pub reserve_price_total: f64,
    pub winning_price_total: f64,
}

impl From<&PerformanceRecord> for KpiBundle {
    fn from(rec: &PerformanceRecord) -> Self {
        KpiBundle {
            blocks_offered: rec.blocks_offered,
            blocks_bought: rec.blocks_bought,
            percent_sold: rec.percent_sold,
            companies: rec.companies,
            reserve_price_total: rec.reserve_price_total,
            winning_price_total: rec.winning_price_total,
        }
    }
}
