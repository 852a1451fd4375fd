//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::analysis::SalesReport;
use crate::report::{by_value_desc, format_currency, format_percent, format_rate};
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from results
    fn generate(&self, report: &SalesReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from analysis results
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Generate overall summary section
    /// @ai:effects pure
    fn generate_summary(report: &SalesReport) -> String {
        let mut output = String::new();

        writeln!(output, "# Sales Analysis Report").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Date:** {}", report.generated_at).unwrap();
        writeln!(output, "**Records:** {}", report.record_count).unwrap();
        writeln!(output, "**Total Revenue:** {}", format_currency(report.total_revenue)).unwrap();
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Two-column table sorted by value descending
    /// @ai:effects pure
    fn generate_currency_table(
        title: &str,
        label: &str,
        data: &BTreeMap<String, Decimal>,
    ) -> String {
        let mut output = String::new();

        writeln!(output, "## {}", title).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| {} | Amount |", label).unwrap();
        writeln!(output, "|---|---:|").unwrap();

        for (key, value) in by_value_desc(data) {
            writeln!(output, "| {} | {} |", key, format_currency(value)).unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Generate top products section
    /// @ai:effects pure
    fn generate_top_products(report: &SalesReport) -> String {
        let mut output = String::new();

        writeln!(output, "## Top Selling Products").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Rank | Product | Units |").unwrap();
        writeln!(output, "|---:|---|---:|").unwrap();

        for (rank, product) in report.top_products.iter().enumerate() {
            writeln!(output, "| {} | {} | {} |", rank + 1, product.product, product.quantity).unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Generate monthly trend and growth section
    /// @ai:effects pure
    fn generate_trend_section(report: &SalesReport) -> String {
        let mut output = String::new();

        writeln!(output, "## Monthly Trend").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Month | Revenue | Growth |").unwrap();
        writeln!(output, "|---|---:|---:|").unwrap();

        for (month, total) in &report.monthly_trend {
            let growth = report
                .month_over_month_growth
                .get(month)
                .map(|g| format_percent(*g))
                .unwrap_or_else(|| "-".to_string());
            writeln!(output, "| {} | {} | {} |", month, format_currency(*total), growth).unwrap();
        }

        writeln!(output).unwrap();
        output
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &SalesReport, output_path: &Path) -> Result<()> {
        let mut content = String::new();

        content.push_str(&Self::generate_summary(report));
        content.push_str(&Self::generate_currency_table(
            "Sales by Category",
            "Category",
            &report.total_by_category,
        ));
        content.push_str(&Self::generate_currency_table(
            "Average Sale by Region",
            "Region",
            &report.average_by_region,
        ));
        content.push_str(&Self::generate_top_products(report));
        content.push_str(&Self::generate_trend_section(report));
        content.push_str(&Self::generate_currency_table(
            &format!("Estimated Tax Liability ({} rate)", format_rate(report.tax_rate)),
            "Region",
            &report.tax_liability_by_region,
        ));

        std::fs::write(output_path, content)?;
        Ok(())
    }
}
