use anyhow::{Context, Result};
use seatscraper::{chart, init_tracing, store, Config};
use std::{env, path::PathBuf, process::exit};
use tracing::{error, warn};

fn main() {
    // Expect a CSV and, optionally, where to put the charts.
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <IN_CSV> [CHART_DIR]", args[0]);
        exit(1);
    }
    init_tracing();
    let chart_dir = args.get(2).map(PathBuf::from);
    match render(PathBuf::from(&args[1]), chart_dir) {
        Ok(true) => {}
        Ok(false) => exit(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit(1);
        }
    }
}

/// Reload-and-clean an existing CSV and draw both charts. `Ok(false)` when
/// either chart failed.
fn render(csv_path: PathBuf, chart_dir: Option<PathBuf>) -> Result<bool> {
    let mut cfg = Config::load().context("loading configuration")?;
    if let Some(dir) = chart_dir {
        cfg.chart_dir = dir;
    }

    let cleaned = store::load_and_clean(&csv_path)?;
    if cleaned.is_empty() {
        warn!(path = %csv_path.display(), dropped = cleaned.dropped(), "no data to plot");
        return Ok(true);
    }

    let report = chart::render_all(&cleaned, &cfg.chart_options());
    if !report.all_ok() {
        error!("one or more charts failed");
    }
    Ok(report.all_ok())
}
