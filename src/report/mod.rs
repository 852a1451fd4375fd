//! @ai:module:intent Report generation for sales analysis results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, ConsoleReporter, JsonReporter, MarkdownReporter, ChartGenerator

pub mod charts;
pub mod console;
pub mod json_report;
pub mod markdown_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use console::ConsoleReporter;
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::analysis::round_half_up;
use crate::analysis::SalesReport;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Generate all report files, returning their paths
    /// @ai:effects fs:write
    pub fn generate_all(&self, report: &SalesReport, output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let json_path = output_dir.join("results.json");
        self.json.generate(report, &json_path)?;

        let markdown_path = output_dir.join("results.md");
        self.markdown.generate(report, &markdown_path)?;

        let mut written = vec![json_path, markdown_path];
        written.extend(
            self.charts
                .generate_all(report, output_dir)?
                .into_iter()
                .map(|name| output_dir.join(name)),
        );

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(written)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Format a monetary amount as $1234.50
/// @ai:effects pure
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value, 2);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", rounded.abs())
    } else {
        format!("${}", rounded.abs())
    }
}

/// @ai:intent Format a percentage with explicit sign
/// @ai:effects pure
pub fn format_percent(value: Decimal) -> String {
    let rounded = round_half_up(value, 2);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{}%", rounded)
    } else {
        format!("+{}%", rounded.abs())
    }
}

/// @ai:intent Tax rate as a percent label (0.10 -> "10%")
/// @ai:post falls back to the raw rate when scaling by 100 overflows
/// @ai:effects pure
pub fn format_rate(rate: Decimal) -> String {
    match rate.checked_mul(Decimal::ONE_HUNDRED) {
        Some(percent) => format!("{}%", percent.normalize()),
        None => rate.to_string(),
    }
}

/// @ai:intent Entries ordered by value descending, then key ascending
/// @ai:effects pure
pub fn by_value_desc(map: &BTreeMap<String, Decimal>) -> Vec<(&str, Decimal)> {
    let mut entries: Vec<(&str, Decimal)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

#[cfg(test)]
pub(crate) fn sample_report() -> SalesReport {
    use crate::analysis::ProductQuantity;
    use rust_decimal_macros::dec;

    let map = |entries: &[(&str, Decimal)]| -> BTreeMap<String, Decimal> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    };

    SalesReport {
        generated_at: "2026-01-19T00:00:00Z".to_string(),
        record_count: 4,
        total_revenue: dec!(2870.00),
        total_by_category: map(&[("Electronics", dec!(2700.00)), ("Clothing", dec!(170.00))]),
        average_by_region: map(&[("North", dec!(1230.00)), ("South", dec!(205.00))]),
        top_products: vec![
            ProductQuantity { product: "T-Shirt".to_string(), quantity: 3 },
            ProductQuantity { product: "Laptop".to_string(), quantity: 2 },
        ],
        monthly_trend: map(&[("2023-01", dec!(2460.00)), ("2023-02", dec!(410.00))]),
        tax_rate: dec!(0.10),
        tax_liability_by_region: map(&[("North", dec!(246.00)), ("South", dec!(41.00))]),
        month_over_month_growth: map(&[("2023-02", dec!(-83.33))]),
    }
}
