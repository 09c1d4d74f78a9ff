use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How a column filter's text is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Case-insensitive regular expression.
    Regex,
}

/// Entity-graph settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphSettings {
    /// Maximum number of decimal places accepted on a monetary amount.
    pub max_amount_scale: u32,
    /// Accept payments of exactly zero (e.g. write-off placeholders).
    pub allow_zero_payments: bool,
    /// Largest single monetary amount (payment, invoice total, rate).
    pub max_amount: Decimal,
    /// Largest number of hours on one time entry.
    pub max_hours: Decimal,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            max_amount_scale: 4,
            allow_zero_payments: false,
            max_amount: Decimal::from(1_000_000_000_i64),
            max_hours: Decimal::from(1_000),
        }
    }
}

/// Table view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TableSettings {
    pub match_mode: MatchMode,
}

/// Top-level config structure matching the host's `config.toml`.
///
/// Every field has a default so a missing or partial file still yields a
/// usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub table: TableSettings,
}

impl AppConfig {
    /// Parse config from TOML text already read by the host.
    pub fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        toml::from_str(contents)
            .map_err(|e| AppError::bad_request(format!("invalid config: {}", e)))
    }
}
