// src/chart/mod.rs

mod bar;
mod palette;
mod pie;

use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info, instrument};

use crate::error::RenderError;
use crate::extract::ResultTable;
use crate::store::CleanedTable;

pub const PROPORTION_FILE: &str = "party_wise_vote_share.svg";
pub const MAGNITUDE_FILE: &str = "seats_won_by_party.svg";

/// Which harvested header labels play the "party" and "seats won" roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub party: String,
    pub won: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            party: "Party".to_string(),
            won: "Won".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub out_dir: PathBuf,
    pub columns: ColumnMapping,
}

/// Per-chart outcomes. One failing never stops the other being attempted.
#[derive(Debug)]
pub struct ChartReport {
    pub proportion: Result<PathBuf, RenderError>,
    pub magnitude: Result<PathBuf, RenderError>,
}

impl ChartReport {
    pub fn all_ok(&self) -> bool {
        self.proportion.is_ok() && self.magnitude.is_ok()
    }
}

pub(crate) fn draw_err(path: &Path, e: impl Display) -> RenderError {
    RenderError::Draw {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Party names and raw seats-won strings, bound through `mapping`.
fn series<'a>(
    table: &'a ResultTable,
    mapping: &ColumnMapping,
) -> Result<(Vec<&'a str>, Vec<&'a str>), RenderError> {
    let missing = |label: &str| RenderError::MissingColumn {
        label: label.to_string(),
        available: table.header().to_vec(),
    };
    let parties: Vec<&str> = table
        .column(&mapping.party)
        .ok_or_else(|| missing(&mapping.party))?
        .collect();
    let won: Vec<&str> = table
        .column(&mapping.won)
        .ok_or_else(|| missing(&mapping.won))?
        .collect();
    if parties.is_empty() {
        return Err(RenderError::NoRows);
    }
    Ok((parties, won))
}

fn parse_all<T: std::str::FromStr>(
    raw: &[&str],
    expected: &'static str,
    valid: impl Fn(&T) -> bool,
) -> Result<Vec<T>, RenderError> {
    raw.iter()
        .enumerate()
        .map(|(row, s)| {
            s.trim()
                .parse::<T>()
                .ok()
                .filter(|v| valid(v))
                .ok_or_else(|| RenderError::NotNumeric {
                    row,
                    value: s.to_string(),
                    expected,
                })
        })
        .collect()
}

fn prepare_dir(dir: &Path) -> Result<(), RenderError> {
    fs::create_dir_all(dir).map_err(|source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Proportion chart of seats won, written to `PROPORTION_FILE` in `out_dir`.
#[instrument(level = "info", skip_all)]
pub fn render_proportion(
    table: &CleanedTable,
    opts: &ChartOptions,
) -> Result<PathBuf, RenderError> {
    let (parties, won) = series(table.table(), &opts.columns)?;
    let sizes: Vec<f64> = parse_all(&won, "non-negative number", |v: &f64| {
        v.is_finite() && *v >= 0.0
    })?;
    if sizes.iter().sum::<f64>() <= 0.0 {
        return Err(RenderError::ZeroTotal);
    }

    prepare_dir(&opts.out_dir)?;
    let path = opts.out_dir.join(PROPORTION_FILE);
    pie::draw(&path, &parties, &sizes)?;
    Ok(path)
}

/// Bar chart of seats won, written to `MAGNITUDE_FILE` in `out_dir`.
/// Seat counts must be whole numbers.
#[instrument(level = "info", skip_all)]
pub fn render_magnitude(table: &CleanedTable, opts: &ChartOptions) -> Result<PathBuf, RenderError> {
    let (parties, won) = series(table.table(), &opts.columns)?;
    let values: Vec<u32> = parse_all(&won, "whole number", |_: &u32| true)?;

    prepare_dir(&opts.out_dir)?;
    let path = opts.out_dir.join(MAGNITUDE_FILE);
    bar::draw(&path, &parties, &values)?;
    Ok(path)
}

/// Attempt both charts and report each outcome.
pub fn render_all(table: &CleanedTable, opts: &ChartOptions) -> ChartReport {
    let report = ChartReport {
        proportion: render_proportion(table, opts),
        magnitude: render_magnitude(table, opts),
    };
    for (name, outcome) in [
        ("proportion", &report.proportion),
        ("magnitude", &report.magnitude),
    ] {
        match outcome {
            Ok(path) => info!(chart = name, path = %path.display(), "chart written"),
            Err(e) => error!(chart = name, error = %e, "chart failed"),
        }
    }
    report
}
