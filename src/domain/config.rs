use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::domain::Normalization;

/// Configuration for the catalog.
///
/// Controls the loan period applied on checkout, how search queries and book
/// identifiers are normalized, and whether output may be colored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The number of days a book is lent for.
    ///
    /// At most [`Config::MAX_LOAN_PERIOD_DAYS`] when loaded from a file.
    loan_period_days: u32,

    /// How queries and identifiers are normalized before comparison.
    pub search_normalization: Normalization,

    /// Whether colored output is allowed.
    ///
    /// Color is only used if the terminal also supports it.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loan_period_days: default_loan_period_days(),
            search_normalization: Normalization::default(),
            color: default_color(),
        }
    }
}

impl Config {
    /// The longest loan period accepted from a configuration file.
    pub const MAX_LOAN_PERIOD_DAYS: u32 = 36_500;

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the number of days a book is lent for.
    #[must_use]
    pub const fn loan_period_days(&self) -> u32 {
        self.loan_period_days
    }

    /// Returns the loan period as a duration.
    #[must_use]
    pub fn loan_period(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.loan_period_days))
    }

    /// Sets the loan period.
    pub const fn set_loan_period_days(&mut self, days: u32) {
        self.loan_period_days = days;
    }
}

const fn default_loan_period_days() -> u32 {
    14
}

const fn default_color() -> bool {
    true
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_loan_period_days")]
        loan_period_days: u32,

        #[serde(default)]
        search_normalization: Normalization,

        #[serde(default = "default_color")]
        color: bool,
    },
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                loan_period_days,
                search_normalization,
                color,
            } => {
                if loan_period_days > Self::MAX_LOAN_PERIOD_DAYS {
                    return Err(format!(
                        "loan_period_days must be at most {}, got {loan_period_days}",
                        Self::MAX_LOAN_PERIOD_DAYS
                    ));
                }
                Ok(Self {
                    loan_period_days,
                    search_normalization,
                    color,
                })
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            loan_period_days: config.loan_period_days,
            search_normalization: config.search_normalization,
            color: config.color,
        }
    }
}
