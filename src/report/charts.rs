//! @ai:module:intent Chart generation for sales analysis results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::analysis::SalesReport;
use crate::report::by_value_desc;
use anyhow::Result;
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts from results
    fn generate_all(&self, report: &SalesReport, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates bar charts from sales reports
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Y axis span covering every value and zero
    /// @ai:effects pure
    fn value_range(data: &[(String, f64)]) -> std::ops::Range<f64> {
        let min = data.iter().map(|(_, v)| *v).fold(0.0, f64::min);
        let max = data.iter().map(|(_, v)| *v).fold(0.0, f64::max);

        if max - min <= f64::EPSILON {
            min..min + 1.0
        } else {
            let pad = (max - min) * 0.05;
            (min - if min < 0.0 { pad } else { 0.0 })..(max + pad)
        }
    }

    /// @ai:intent Draw one labelled bar chart
    /// @ai:effects fs:write
    fn draw_bars(
        &self,
        caption: &str,
        y_desc: &str,
        data: &[(String, f64)],
        color: RGBColor,
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (900, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0..data.len().max(1) as i32, Self::value_range(data))?;

        chart
            .configure_mesh()
            .x_labels(data.len().max(1))
            .y_desc(y_desc)
            .x_label_formatter(&|x| {
                data.get(*x as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, (_, value))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *value)],
                color.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Generate monthly revenue chart
    /// @ai:effects fs:write
    fn generate_trend_chart(&self, report: &SalesReport, output_path: &Path) -> Result<()> {
        let data: Vec<_> = report
            .monthly_trend
            .iter()
            .map(|(month, total)| (month.clone(), to_f64(*total)))
            .collect();

        self.draw_bars("Revenue by Month", "Revenue ($)", &data, BLUE, output_path)
    }

    /// @ai:intent Generate category revenue chart
    /// @ai:effects fs:write
    fn generate_category_chart(&self, report: &SalesReport, output_path: &Path) -> Result<()> {
        let data: Vec<_> = by_value_desc(&report.total_by_category)
            .into_iter()
            .map(|(category, total)| (category.to_string(), to_f64(total)))
            .collect();

        self.draw_bars("Revenue by Category", "Revenue ($)", &data, GREEN, output_path)
    }
}

/// Display-only conversion; aggregates themselves stay decimal.
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts
    /// @ai:effects fs:write
    fn generate_all(&self, report: &SalesReport, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        let trend_path = output_dir.join("monthly_trend.png");
        self.generate_trend_chart(report, &trend_path)?;
        generated.push("monthly_trend.png".to_string());

        let category_path = output_dir.join("by_category.png");
        self.generate_category_chart(report, &category_path)?;
        generated.push("by_category.png".to_string());

        Ok(generated)
    }
}
