use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::rate::FALLBACK_RATE;

pub const DEFAULT_DATASET: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";
pub const DEFAULT_RATE_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest";

/// Startup settings. Every field has a default, so an empty or partial TOML
/// file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Local path or HTTP(S) URL of the salary table.
    pub dataset: String,
    pub rate_endpoint: String,
    pub base_currency: String,
    pub target_currency: String,
    pub currency_symbol: String,
    pub fallback_rate: f64,
    /// Number of titles in the "top titles by mean salary" chart.
    pub top_n: usize,
    pub histogram_buckets: usize,
    /// Display title whose mean salary is broken down per country.
    pub focus_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            rate_endpoint: DEFAULT_RATE_ENDPOINT.to_string(),
            base_currency: "USD".to_string(),
            target_currency: "BRL".to_string(),
            currency_symbol: "R$".to_string(),
            fallback_rate: FALLBACK_RATE,
            top_n: 10,
            histogram_buckets: 30,
            focus_title: "Cientista de Dados".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing dashboard config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}
