// src/pipeline.rs

use reqwest::Client;
use tracing::{error, info, instrument, warn};

use crate::chart::{self, ChartReport};
use crate::config::Config;
use crate::error::{FetchError, PipelineError};
use crate::extract::{self, EmptyReason, Extraction};
use crate::fetch;
use crate::store;

/// How a run ended when nothing forced an abort.
#[derive(Debug)]
pub enum RunOutcome {
    /// The page could not be retrieved; nothing was written.
    NoData(FetchError),
    /// The page yielded no usable rows. With `Extract`, nothing was written;
    /// with `Cleaned`, the CSV exists but every row had a missing field.
    NothingToPlot(EmptyStage),
    Rendered(ChartReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStage {
    Extract(EmptyReason),
    Cleaned,
}

/// fetch → extract → save → reload-and-clean → render.
///
/// Extraction and persistence failures abort with `Err`; fetch failures and
/// empty data end the run cleanly with the matching `RunOutcome`.
#[instrument(level = "info", skip_all, fields(url = %cfg.source_url))]
pub async fn run(client: &Client, cfg: &Config) -> Result<RunOutcome, PipelineError> {
    let page = match fetch::fetch_page(client, &cfg.source_url).await {
        Ok(page) => page,
        Err(e) => {
            error!(error = %e, "no data fetched");
            return Ok(RunOutcome::NoData(e));
        }
    };
    info!(bytes = page.body.len(), "page fetched");

    let table = match extract::extract_table(&page.body, &cfg.extract_options())? {
        Extraction::Table { table, .. } => table,
        Extraction::Empty { reason, stats } => {
            warn!(%reason, ?stats, "nothing extracted; skipping save and charts");
            return Ok(RunOutcome::NothingToPlot(EmptyStage::Extract(reason)));
        }
    };

    store::save(&table, &cfg.csv_path)?;
    let cleaned = store::load_and_clean(&cfg.csv_path)?;
    if cleaned.is_empty() {
        warn!(dropped = cleaned.dropped(), "table is empty after cleaning; no data to plot");
        return Ok(RunOutcome::NothingToPlot(EmptyStage::Cleaned));
    }

    Ok(RunOutcome::Rendered(chart::render_all(
        &cleaned,
        &cfg.chart_options(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{MAGNITUDE_FILE, PROPORTION_FILE};
    use crate::fetch::testserver::{client, http_response, serve};
    use std::{fs, path::Path};
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,seatscraper=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn config(url: String, dir: &Path) -> Config {
        Config {
            source_url: url,
            csv_path: dir.join("election_results.csv"),
            chart_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn http_404_ends_cleanly_with_no_files() {
        init_tracing();
        let dir = tempdir().unwrap();
        let url = serve(http_response("404 Not Found", "<h1>missing</h1>")).await;

        let outcome = run(&client(), &config(url, dir.path())).await.unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::NoData(FetchError::Status { status: 404, .. })
        ));
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn one_table_with_a_short_row_round_trips_two_rows() {
        init_tracing();
        let dir = tempdir().unwrap();
        let html = "<html><body><table>\
            <tr><th>A</th><th>B</th><th>C</th><th>D</th></tr>\
            <tr><td>a1</td><td>b1</td><td>c1</td><td>d1</td></tr>\
            <tr><td>a2</td><td>b2</td><td>c2</td></tr>\
            <tr><td>a3</td><td>b3</td><td>c3</td><td>d3</td></tr>\
            </table></body></html>";
        let url = serve(http_response("200 OK", html)).await;
        let cfg = config(url, dir.path());

        let outcome = run(&client(), &cfg).await.unwrap();

        let csv = fs::read_to_string(&cfg.csv_path).unwrap();
        assert_eq!(csv, "A,B,C,D\na1,b1,c1,d1\na3,b3,c3,d3\n");
        assert_eq!(csv.lines().count(), 3);

        let reloaded = store::load_and_clean(&cfg.csv_path).unwrap();
        assert_eq!(
            reloaded.table().rows(),
            &[
                vec!["a1", "b1", "c1", "d1"],
                vec!["a3", "b3", "c3", "d3"]
            ]
        );

        // No "Party"/"Won" columns on this page: both charts fail, neither aborts.
        match outcome {
            RunOutcome::Rendered(report) => {
                assert!(report.proportion.is_err());
                assert!(report.magnitude.is_err());
            }
            other => panic!("expected Rendered, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn full_run_writes_csv_and_both_charts() {
        init_tracing();
        let dir = tempdir().unwrap();
        let html = "<table>\
            <tr><th>Party</th><th>Won</th><th>Leading</th><th>Total</th></tr>\
            <tr><td>Bharatiya Janata Party - BJP</td><td>240</td><td>0</td><td>240</td></tr>\
            <tr><td>Indian National Congress - INC</td><td>99</td><td>0</td><td>99</td></tr>\
            <tr><td>Total</td><td>339</td></tr>\
            </table>";
        let url = serve(http_response("200 OK", html)).await;

        let outcome = run(&client(), &config(url, dir.path())).await.unwrap();
        match outcome {
            RunOutcome::Rendered(report) => assert!(report.all_ok(), "{report:?}"),
            other => panic!("expected Rendered, got {other:?}"),
        }
        assert_eq!(
            files_in(dir.path()),
            vec![
                "election_results.csv".to_string(),
                PROPORTION_FILE.to_string(),
                MAGNITUDE_FILE.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn page_without_tables_writes_nothing() {
        let dir = tempdir().unwrap();
        let url = serve(http_response("200 OK", "<p>Counting in progress</p>")).await;

        let outcome = run(&client(), &config(url, dir.path())).await.unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::NothingToPlot(EmptyStage::Extract(EmptyReason::NoTables))
        ));
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn rows_with_blank_cells_are_cleaned_away() {
        let dir = tempdir().unwrap();
        let html = "<table>\
            <tr><th>Party</th><th>Won</th><th>Leading</th><th>Total</th></tr>\
            <tr><td>X</td><td></td><td>0</td><td>0</td></tr>\
            </table>";
        let url = serve(http_response("200 OK", html)).await;
        let cfg = config(url, dir.path());

        let outcome = run(&client(), &cfg).await.unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::NothingToPlot(EmptyStage::Cleaned)
        ));
        assert!(cfg.csv_path.exists());
        assert!(!dir.path().join(PROPORTION_FILE).exists());
    }

    #[tokio::test]
    async fn unwritable_csv_path_aborts() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").unwrap();
        let html = "<table><tr><th>Party</th><th>Won</th></tr>\
            <tr><td>X</td><td>1</td></tr></table>";
        let url = serve(http_response("200 OK", html)).await;
        let cfg = Config {
            csv_path: blocker.join("results.csv"),
            ..config(url, dir.path())
        };

        let err = run(&client(), &cfg).await.unwrap_err();
        assert!(matches!(err, PipelineError::Persist(_)), "{err}");
        assert!(!dir.path().join(PROPORTION_FILE).exists());
    }

    #[tokio::test]
    async fn invalid_selector_aborts() {
        let dir = tempdir().unwrap();
        let url = serve(http_response("200 OK", "<table></table>")).await;
        let cfg = Config {
            table_selector: ":::".to_string(),
            ..config(url, dir.path())
        };

        let err = run(&client(), &cfg).await.unwrap_err();
        assert!(matches!(err, PipelineError::Extract(_)), "{err}");
    }
}
