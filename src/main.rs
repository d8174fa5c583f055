use anyhow::{Context, Result};
use reqwest::Client;
use seatscraper::{init_tracing, run, Config, EmptyStage, RunOutcome};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    init_tracing();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure ────────────────────────────────────────────────
    let cfg = Config::load().context("loading configuration")?;
    info!("{:^72}", cfg.title);
    info!("{:^72}", "_".repeat(cfg.title.chars().count()));
    info!(url = %cfg.source_url, csv = %cfg.csv_path.display(), charts = %cfg.chart_dir.display(), "startup");

    // ─── 3) fetch → extract → save → clean → render ──────────────────
    let client = Client::new();
    let outcome = run(&client, &cfg)
        .await
        .with_context(|| format!("processing {}", cfg.source_url))?;

    match outcome {
        RunOutcome::NoData(_) => info!("No data fetched. Exiting."),
        RunOutcome::NothingToPlot(EmptyStage::Extract(reason)) => {
            warn!(%reason, "no data to plot")
        }
        RunOutcome::NothingToPlot(EmptyStage::Cleaned) => {
            warn!("table is empty after cleaning. No data to plot.")
        }
        RunOutcome::Rendered(report) => {
            if report.all_ok() {
                info!("all done");
            } else {
                error!("finished with chart errors");
            }
        }
    }
    Ok(())
}
