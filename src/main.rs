use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use bandboard::data::filter::select;
use bandboard::data::model::{KpiBundle, Selector};
use bandboard::data::project::{project, SummarySeries};
use bandboard::data::reshape::{reshape, HeatmapMatrix};
use bandboard::store::TableStore;

// ---------------------------------------------------------------------------
// CLI: load the two tables and print one JSON report for the renderer
// ---------------------------------------------------------------------------

/// Everything a dashboard renderer needs for one pass, in one document.
/// `kpi` is `null` when no selector was given or no row matched; the
/// summary series and heatmap are always present regardless.
#[derive(Serialize)]
struct Report {
    bands: Vec<String>,
    years: Vec<String>,
    service_areas: Vec<String>,
    kpi: Option<KpiBundle>,
    summary_series: SummarySeries,
    heatmap: HeatmapMatrix,
}

struct Args {
    performance_path: PathBuf,
    summary_path: PathBuf,
    selector: Option<Selector>,
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.len() {
        2 => Ok(Args {
            performance_path: PathBuf::from(&args[0]),
            summary_path: PathBuf::from(&args[1]),
            selector: None,
        }),
        5 => Ok(Args {
            performance_path: PathBuf::from(&args[0]),
            summary_path: PathBuf::from(&args[1]),
            selector: Some(Selector::new(&args[2], &args[3], &args[4])),
        }),
        _ => bail!("usage: bandboard <performance.csv> <summary.csv> [BAND YEAR SERVICE_AREA]"),
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let store = TableStore::open(&args.performance_path, &args.summary_path)
        .context("loading input tables")?;
    let tables = store.snapshot();

    let kpi = args
        .selector
        .as_ref()
        .and_then(|sel| select(&tables.performance, sel));
    if let (Some(sel), None) = (&args.selector, &kpi) {
        log::warn!(
            "no data for band {}, year {}, service area {}",
            sel.band,
            sel.year,
            sel.service_area
        );
    }

    let report = Report {
        bands: tables.performance.bands.clone(),
        years: tables.performance.years.clone(),
        service_areas: tables.performance.service_areas.clone(),
        kpi,
        summary_series: project(&tables.summary),
        heatmap: reshape(&tables.performance).context("pivoting heatmap")?,
    };

    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
