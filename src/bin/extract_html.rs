use anyhow::{Context, Result};
use seatscraper::{extract, init_tracing, store, Config};
use std::{env, fs, path::Path, process::exit};
use tracing::{info, warn};

fn main() {
    // Expect a captured results page and a CSV destination.
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <PAGE_HTML> <OUT_CSV>", args[0]);
        exit(1);
    }
    init_tracing();
    if let Err(e) = extract_file(Path::new(&args[1]), Path::new(&args[2])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Offline replay of the extract + save stages against a saved page.
fn extract_file(html_path: &Path, csv_path: &Path) -> Result<()> {
    let cfg = Config::load().context("loading configuration")?;
    let html = fs::read_to_string(html_path)
        .with_context(|| format!("reading {}", html_path.display()))?;

    match extract::extract_table(&html, &cfg.extract_options())? {
        extract::Extraction::Table { table, stats } => {
            store::save(&table, csv_path)?;
            info!(
                rows = table.len(),
                dropped = stats.rows_dropped,
                path = %csv_path.display(),
                "wrote CSV"
            );
        }
        extract::Extraction::Empty { reason, .. } => {
            warn!(%reason, "nothing to write");
        }
    }
    Ok(())
}
