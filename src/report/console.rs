//! @ai:module:intent Plain-text rendering of a sales report
//! @ai:module:layer presentation
//! @ai:module:public_api ConsoleReporter
//! @ai:module:stateless true

use crate::analysis::SalesReport;
use crate::report::{by_value_desc, format_currency, format_percent, format_rate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

/// @ai:intent Renders reports for terminal output
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render the full analysis as text
    /// @ai:effects pure
    pub fn render(&self, report: &SalesReport) -> String {
        let mut output = String::new();

        writeln!(output, "--- Sales Analysis Report ---").unwrap();
        writeln!(output, "Records analyzed: {}", report.record_count).unwrap();
        writeln!(output, "Total revenue: {}", format_currency(report.total_revenue)).unwrap();
        writeln!(output).unwrap();

        Self::currency_section(&mut output, "1. Total Sales by Category:", &report.total_by_category);
        Self::currency_section(&mut output, "2. Average Sales by Region:", &report.average_by_region);

        writeln!(
            output,
            "3. Top {} Selling Products (by Quantity):",
            report.top_products.len()
        )
        .unwrap();
        for product in &report.top_products {
            writeln!(output, "  - {}: {} units", product.product, product.quantity).unwrap();
        }
        writeln!(output).unwrap();

        // Chronological, unlike the other currency sections.
        writeln!(output, "4. Sales Trend by Month:").unwrap();
        for (month, total) in &report.monthly_trend {
            writeln!(output, "  - {}: {}", month, format_currency(*total)).unwrap();
        }
        writeln!(output).unwrap();

        Self::currency_section(
            &mut output,
            &format!("5. Estimated Tax Liability ({} Rate):", format_rate(report.tax_rate)),
            &report.tax_liability_by_region,
        );

        writeln!(output, "6. Month-over-Month Growth:").unwrap();
        for (month, growth) in &report.month_over_month_growth {
            writeln!(output, "  - {}: {}", month, format_percent(*growth)).unwrap();
        }

        output
    }

    /// @ai:intent Currency lines sorted by value descending
    /// @ai:effects pure
    fn currency_section(output: &mut String, title: &str, data: &BTreeMap<String, Decimal>) {
        writeln!(output, "{}", title).unwrap();
        for (key, value) in by_value_desc(data) {
            writeln!(output, "  - {}: {}", key, format_currency(value)).unwrap();
        }
        writeln!(output).unwrap();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
