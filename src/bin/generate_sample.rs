use std::collections::BTreeMap;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in [lo, hi].
    fn range_u64(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);

    let bands = ["700", "800", "900", "1800", "2100", "2300"];
    let years = ["2016", "2021", "2022"];
    let areas = [
        "Delhi",
        "Mumbai",
        "Kolkata",
        "Chennai",
        "Karnataka",
        "Punjab",
        "Rajasthan",
        "Gujarat",
    ];

    // (avg_percent_sold, row_count) per band_year, accumulated while the
    // performance rows are generated, so the summary file agrees with them.
    let mut band_year_totals: BTreeMap<(String, String), (f64, u64)> = BTreeMap::new();

    let perf_path = "df_performance.csv";
    let mut perf = csv::Writer::from_path(perf_path)
        .with_context(|| format!("creating {perf_path}"))?;
    perf.write_record([
        "Band",
        "Year",
        "Service_Area",
        "Blocks_Offered",
        "Blocks_Bought",
        "Percent_Sold",
        "Companies",
        "Reserve_Price_Total",
        "Winning_Price_Total",
    ])?;

    let mut rows: u64 = 0;
    for band in &bands {
        for year in &years {
            for area in &areas {
                // Leave ~1 in 6 combinations out so the heatmap has gaps.
                if rng.next_u64() % 6 == 0 {
                    continue;
                }

                let blocks_offered = rng.range_u64(4, 40);
                let blocks_bought = rng.range_u64(0, blocks_offered);
                let percent_sold = 100.0 * blocks_bought as f64 / blocks_offered as f64;
                let companies = rng.range_u64(1, 8);
                let reserve_total = blocks_offered as f64 * (50.0 + 450.0 * rng.next_f64());
                // Winning total scales with sold share, with a small premium.
                let winning_total =
                    reserve_total * (percent_sold / 100.0) * (1.0 + 0.3 * rng.next_f64());

                perf.write_record([
                    band.to_string(),
                    year.to_string(),
                    area.to_string(),
                    blocks_offered.to_string(),
                    blocks_bought.to_string(),
                    format!("{percent_sold:.2}"),
                    companies.to_string(),
                    format!("{reserve_total:.2}"),
                    format!("{winning_total:.2}"),
                ])?;
                rows += 1;

                let entry = band_year_totals
                    .entry((band.to_string(), year.to_string()))
                    .or_insert((0.0, 0));
                entry.0 += percent_sold;
                entry.1 += 1;
            }
        }
    }
    perf.flush().with_context(|| format!("writing {perf_path}"))?;

    let summary_path = "band_year_summary.csv";
    let mut summary = csv::Writer::from_path(summary_path)
        .with_context(|| format!("creating {summary_path}"))?;
    summary.write_record(["Band", "Year", "Avg_Percent_Sold"])?;
    for ((band, year), (total, count)) in &band_year_totals {
        summary.write_record([
            band.clone(),
            year.clone(),
            format!("{:.2}", total / *count as f64),
        ])?;
    }
    summary
        .flush()
        .with_context(|| format!("writing {summary_path}"))?;

    println!(
        "Wrote {rows} performance rows to {perf_path} and {} summary rows to {summary_path}",
        band_year_totals.len()
    );
    Ok(())
}
