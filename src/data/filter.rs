use super::model::{KpiBundle, PerformanceTable, Selector};

// ---------------------------------------------------------------------------
// Selection – narrow the performance table to one KPI row
// ---------------------------------------------------------------------------

/// Find the performance row matching the selector and return its KPI fields.
///
/// Comparison is plain equality over the normalized values: the selector is
/// trimmed on construction and the loader trims the table's key columns, so
/// no fuzzy matching is needed or done.
///
/// Zero matches returns `None`. This is an expected outcome the caller must
/// branch on (render a "no data" state), not an error: the rest of the
/// dashboard still renders.
///
/// More than one match means the table violates the expected uniqueness of
/// the (band, year, service_area) triple. The first row in table order wins
/// and the rest are discarded; the occurrence is logged so duplicate keys
/// are visible rather than silently masked.
pub fn select(table: &PerformanceTable, selector: &Selector) -> Option<KpiBundle> {
    let mut matches = table.records.iter().filter(|rec| {
        rec.band == selector.band
            && rec.year == selector.year
            && rec.service_area == selector.service_area
    });

    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        log::warn!(
            "duplicate key ({}, {}, {}): {} extra row(s) ignored, first match kept",
            selector.band,
            selector.year,
            selector.service_area,
            extra
        );
    }
    Some(KpiBundle::from(first))
}
