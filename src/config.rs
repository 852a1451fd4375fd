//! @ai:module:intent Configuration structs for sales analysis
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnalysisConfig, AnalysisSettings, PathConfig, GeneratorConfig, FilterConfig
//! @ai:module:stateless true

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the analysis tool
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// @ai:intent Parameters of the aggregate computations
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
    #[serde(default = "default_top_n")]
    pub top_n: i64,
}

/// @ai:intent Input and output locations
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

/// @ai:intent Sample data generation settings
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_records")]
    pub records: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// @ai:intent Record subset to analyze
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            top_n: default_top_n(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            reports_dir: default_reports_dir(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            records: default_records(),
            seed: None,
        }
    }
}

fn default_tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn default_top_n() -> i64 {
    5
}

fn default_input() -> PathBuf {
    PathBuf::from("sales_data.csv")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_records() -> usize {
    1000
}

impl AnalysisConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl PathConfig {
    /// @ai:intent Where reports go: an explicit directory wins, else reports_dir when saving
    /// @ai:effects pure
    pub fn reports_target(&self, requested: Option<PathBuf>, save: bool) -> Option<PathBuf> {
        requested.or_else(|| save.then(|| self.reports_dir.clone()))
    }
}

impl FilterConfig {
    /// @ai:intent Check whether any filter is set
    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.from.is_none() && self.to.is_none()
    }

    /// @ai:intent Date bounds with open ends widened to the calendar limits
    /// @ai:effects pure
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        if self.from.is_none() && self.to.is_none() {
            return None;
        }

        Some((
            self.from.unwrap_or(NaiveDate::MIN),
            self.to.unwrap_or(NaiveDate::MAX),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.analysis.tax_rate, dec!(0.10));
        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.paths.input, PathBuf::from("sales_data.csv"));
        assert!(config.filter.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
[analysis]
tax_rate = "0.07"

[filter]
category = "Electronics"
from = "2023-03-01"
"#,
        )
        .unwrap();

        assert_eq!(config.analysis.tax_rate, dec!(0.07));
        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.filter.category.as_deref(), Some("Electronics"));
        assert_eq!(
            config.filter.date_range(),
            Some((NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), NaiveDate::MAX))
        );
    }

    #[test]
    fn test_reports_target_prefers_explicit_directory() {
        let paths: PathConfig = toml::from_str(r#"reports_dir = "out/sales""#).unwrap();

        assert_eq!(paths.reports_target(None, false), None);
        assert_eq!(paths.reports_target(None, true), Some(PathBuf::from("out/sales")));
        assert_eq!(
            paths.reports_target(Some(PathBuf::from("elsewhere")), false),
            Some(PathBuf::from("elsewhere"))
        );
        assert_eq!(
            paths.reports_target(Some(PathBuf::from("elsewhere")), true),
            Some(PathBuf::from("elsewhere"))
        );
    }

    #[test]
    fn test_filter_is_empty_tracks_any_bound() {
        let mut filter = FilterConfig::default();
        assert!(filter.is_empty());

        filter.to = NaiveDate::from_ymd_opt(2023, 6, 30);
        assert!(!filter.is_empty());
        assert_eq!(filter.date_range().map(|(start, _)| start), Some(NaiveDate::MIN));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sales.toml");

        let mut config = AnalysisConfig::default();
        config.generator.seed = Some(99);
        config.save(&path).unwrap();

        assert_eq!(AnalysisConfig::load(&path).unwrap(), config);
    }
}
