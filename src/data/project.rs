use super::model::{band_year_label, SummaryTable};

// ---------------------------------------------------------------------------
// Summary projection – (band_year label, avg percent sold) bar-chart series
// ---------------------------------------------------------------------------

/// Ordered (band_year label, avg percent sold) pairs for bar-chart rendering.
pub type SummarySeries = Vec<(String, f64)>;

/// Project the summary table into a [`SummarySeries`].
///
/// Labels use the same `band_year_label` formatting as the heatmap reshape
/// so the two views stay consistent. Pairs are emitted in source row order;
/// no sorting, deduplication, or aggregation happens here — the table is
/// already aggregated upstream.
pub fn project(table: &SummaryTable) -> SummarySeries {
    table
        .records
        .iter()
        .map(|rec| {
            (
                band_year_label(&rec.band, &rec.year),
                rec.avg_percent_sold,
            )
        })
        .collect()
}
