use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// Portfolio record a card is rendered from.
///
/// Category order is significant: it is the angular order of the donut
/// segments and the row order of the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(rename = "username")]
    pub display_name: String,
    #[serde(rename = "xirr")]
    pub return_rate_percent: f64,
    #[serde(rename = "xirrPeriod")]
    pub period_years: i64,
    #[serde(rename = "schemes", default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "name")]
    pub label: String,
    /// Share of the portfolio in percent. Weights are never normalized.
    #[serde(rename = "allocation")]
    pub weight_percent: f64,
    /// Hex (`#4285F4`) or named SVG color.
    #[serde(rename = "color")]
    pub fill_color: String,
}

impl Category {
    pub fn new(label: impl Into<String>, weight_percent: f64, fill_color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            weight_percent,
            fill_color: fill_color.into(),
        }
    }
}

impl PortfolioSnapshot {
    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|c| c.weight_percent).sum()
    }
}

pub fn parse_portfolio(input: &str) -> Result<PortfolioSnapshot> {
    Ok(serde_json::from_str(input)?)
}

pub fn load_portfolio(path: &Path) -> Result<PortfolioSnapshot> {
    let contents = std::fs::read_to_string(path).map_err(|source| CardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_portfolio(&contents)
}
