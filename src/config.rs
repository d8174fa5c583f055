// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::chart::{ChartOptions, ColumnMapping};
use crate::extract::{ExtractOptions, HeaderScope};

pub const DEFAULT_SOURCE_URL: &str = "https://results.eci.gov.in/PcResultGenJune2024/index.htm";
pub const DEFAULT_CSV_PATH: &str = "election_results.csv";
pub const DEFAULT_TITLE: &str = "Results of Lok Sabha Elections 2024";

/// Env var naming an optional YAML config file.
pub const CONFIG_ENV: &str = "SEATSCRAPER_CONFIG";
pub const URL_ENV: &str = "SEATSCRAPER_URL";
pub const CSV_ENV: &str = "SEATSCRAPER_CSV";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source_url: String,
    pub csv_path: PathBuf,
    pub chart_dir: PathBuf,
    pub title: String,
    pub header_scope: HeaderScope,
    pub max_columns: usize,
    pub table_selector: String,
    pub columns: ColumnMapping,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            chart_dir: PathBuf::from("."),
            title: DEFAULT_TITLE.to_string(),
            header_scope: HeaderScope::default(),
            max_columns: 4,
            table_selector: "table".to_string(),
            columns: ColumnMapping::default(),
        }
    }
}

impl Config {
    /// Defaults, then the YAML file named by `SEATSCRAPER_CONFIG` (if set),
    /// then the URL / CSV env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Ok(url) = env::var(URL_ENV) {
            debug!(%url, "source URL overridden from env");
            cfg.source_url = url;
        }
        if let Some(csv) = env::var_os(CSV_ENV) {
            cfg.csv_path = PathBuf::from(csv);
            debug!(path = %cfg.csv_path.display(), "CSV path overridden from env");
        }
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {:?}", path))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            header_scope: self.header_scope,
            max_columns: self.max_columns,
            table_selector: self.table_selector.clone(),
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            out_dir: self.chart_dir.clone(),
            columns: self.columns.clone(),
        }
    }
}
