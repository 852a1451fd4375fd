//! @ai:module:intent Aggregation engine over immutable sales records
//! @ai:module:layer application
//! @ai:module:public_api SalesAnalyzer
//! @ai:module:stateless true
//!
//! Every aggregate is a pure read of the held records. Sums are exact;
//! only averages, tax and growth are rounded (half-up, two places).

use crate::analysis::observer::{AnalysisEvent, AnalysisObserver};
use crate::analysis::rounding::{div_half_up, round_half_up, MONEY_SCALE, RATIO_SCALE};
use crate::analysis::types::{Dimension, Measure, ProductQuantity, SalesReport};
use crate::error::{Error, Result};
use crate::sales::Record;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

/// @ai:intent Computes grouped financial summaries over a fixed record set
#[derive(Clone)]
pub struct SalesAnalyzer {
    sales: Vec<Record>,
    observer: Option<Arc<dyn AnalysisObserver>>,
}

impl SalesAnalyzer {
    /// @ai:intent Create an analyzer over the given records
    /// @ai:effects pure
    pub fn new(sales: Vec<Record>) -> Self {
        Self {
            sales,
            observer: None,
        }
    }

    /// @ai:intent Attach an observer for diagnostic events
    /// @ai:effects observer
    pub fn with_observer(mut self, observer: Arc<dyn AnalysisObserver>) -> Self {
        observer.notify(&AnalysisEvent::Initialized {
            records: self.sales.len(),
        });
        self.observer = Some(observer);
        self
    }

    fn notify(&self, event: AnalysisEvent) {
        if let Some(observer) = &self.observer {
            observer.notify(&event);
        }
    }

    fn aggregated<T>(&self, metric: &'static str, groups: usize, result: T) -> T {
        self.notify(AnalysisEvent::Aggregated { metric, groups });
        result
    }

    /// @ai:intent Shared grouping/summation primitive
    /// @ai:post Err(Overflow) as soon as a value or a running sum is unrepresentable
    /// @ai:effects pure
    fn group_sum<K, G, M>(
        &self,
        metric: &'static str,
        grouper: G,
        mapper: M,
    ) -> Result<BTreeMap<K, Decimal>>
    where
        K: Ord,
        G: Fn(&Record) -> K,
        M: Fn(&Record) -> Option<Decimal>,
    {
        self.sales.iter().try_fold(BTreeMap::new(), |mut acc, sale| {
            let total = acc.entry(grouper(sale)).or_insert(Decimal::ZERO);
            let current = *total;
            *total = mapper(sale)
                .and_then(|value| current.checked_add(value))
                .ok_or(Error::Overflow(metric))?;
            Ok(acc)
        })
    }

    /// @ai:intent Total revenue per category label
    /// @ai:post values are unrounded exact sums
    /// @ai:effects pure
    pub fn total_sales_by_category(&self) -> Result<BTreeMap<String, Decimal>> {
        let totals = self.group_sum(
            "total_sales_by_category",
            |s| s.category().to_string(),
            Record::checked_revenue,
        )?;
        Ok(self.aggregated("total_sales_by_category", totals.len(), totals))
    }

    /// @ai:intent Mean revenue per region
    /// @ai:post every value has exactly two fractional digits
    /// @ai:effects pure
    pub fn average_sales_by_region(&self) -> Result<BTreeMap<String, Decimal>> {
        let mut sums: BTreeMap<&str, (Decimal, u64)> = BTreeMap::new();

        for sale in &self.sales {
            let entry = sums.entry(sale.region()).or_insert((Decimal::ZERO, 0));
            let sum = entry.0;
            entry.0 = sale
                .checked_revenue()
                .and_then(|revenue| sum.checked_add(revenue))
                .ok_or(Error::Overflow("average_sales_by_region"))?;
            entry.1 += 1;
        }

        let averages = sums
            .into_iter()
            .map(|(region, (sum, count))| {
                div_half_up(sum, Decimal::from(count), MONEY_SCALE)
                    .map(|avg| (region.to_string(), avg))
                    .ok_or(Error::Overflow("average_sales_by_region"))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(self.aggregated("average_sales_by_region", averages.len(), averages))
    }

    /// @ai:intent Products ranked by total quantity, best first
    /// @ai:pre n >= 0
    /// @ai:post len <= min(n, distinct products); ties ordered by product name
    /// @ai:effects pure
    pub fn top_selling_products(&self, n: i64) -> Result<Vec<ProductQuantity>> {
        let limit = usize::try_from(n).map_err(|_| {
            Error::InvalidArgument(format!("top product count must be non-negative, got {}", n))
        })?;

        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for sale in &self.sales {
            *totals.entry(sale.product_name()).or_insert(0) += i64::from(sale.quantity());
        }

        let mut ranked: Vec<ProductQuantity> = totals
            .into_iter()
            .map(|(product, quantity)| ProductQuantity {
                product: product.to_string(),
                quantity,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then_with(|| a.product.cmp(&b.product))
        });
        ranked.truncate(limit);

        Ok(self.aggregated("top_selling_products", ranked.len(), ranked))
    }

    /// @ai:intent Total revenue per calendar month (YYYY-MM)
    /// @ai:effects pure
    pub fn sales_trend_by_month(&self) -> Result<BTreeMap<String, Decimal>> {
        let trend = self.group_sum(
            "sales_trend_by_month",
            Record::month_key,
            Record::checked_revenue,
        )?;
        Ok(self.aggregated("sales_trend_by_month", trend.len(), trend))
    }

    /// @ai:intent Estimated tax per region at a flat rate
    /// @ai:pre tax_rate is taken literally (no bounds check)
    /// @ai:post every value has exactly two fractional digits
    /// @ai:effects pure
    pub fn tax_liability_by_region(&self, tax_rate: Decimal) -> Result<BTreeMap<String, Decimal>> {
        let liability = self
            .group_sum(
                "tax_liability_by_region",
                |s| s.region().to_string(),
                Record::checked_revenue,
            )?
            .into_iter()
            .map(|(region, revenue)| {
                revenue
                    .checked_mul(tax_rate)
                    .map(|tax| (region, round_half_up(tax, MONEY_SCALE)))
                    .ok_or(Error::Overflow("tax_liability_by_region"))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(self.aggregated("tax_liability_by_region", liability.len(), liability))
    }

    /// @ai:intent Percentage change of each month against the previous one
    /// @ai:post earliest month omitted; zero when the previous total is <= 0
    /// @ai:effects pure
    pub fn month_over_month_growth(&self) -> Result<BTreeMap<String, Decimal>> {
        let monthly = self.group_sum(
            "month_over_month_growth",
            Record::month_key,
            Record::checked_revenue,
        )?;
        let months: Vec<(&String, &Decimal)> = monthly.iter().collect();

        let growth = months
            .windows(2)
            .map(|pair| {
                let (_, previous) = pair[0];
                let (month, current) = pair[1];
                growth_percentage(*current, *previous)
                    .map(|pct| (month.clone(), pct))
                    .ok_or(Error::Overflow("month_over_month_growth"))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(self.aggregated("month_over_month_growth", growth.len(), growth))
    }

    /// @ai:intent Group by a caller key and sum a caller value
    /// @ai:post values are unrounded exact sums
    /// @ai:effects pure
    pub fn analyze_by<K, G, M>(&self, grouper: G, mapper: M) -> Result<BTreeMap<K, Decimal>>
    where
        K: Ord,
        G: Fn(&Record) -> K,
        M: Fn(&Record) -> Decimal,
    {
        let grouped = self.group_sum("analyze_by", grouper, |s| Some(mapper(s)))?;
        Ok(self.aggregated("analyze_by", grouped.len(), grouped))
    }

    /// @ai:intent Grouped sum with runtime-selected key and value
    /// @ai:effects pure
    pub fn breakdown(
        &self,
        dimension: Dimension,
        measure: Measure,
    ) -> Result<BTreeMap<String, Decimal>> {
        let grouped = self.group_sum("breakdown", |s| dimension.key(s), |s| measure.value(s))?;
        Ok(self.aggregated("breakdown", grouped.len(), grouped))
    }

    /// @ai:intent New analyzer over records dated within [start, end]
    /// @ai:post self is unchanged; start > end yields an empty analyzer
    /// @ai:effects pure
    pub fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> SalesAnalyzer {
        let filtered: Vec<Record> = self
            .sales
            .iter()
            .filter(|s| s.date() >= start && s.date() <= end)
            .cloned()
            .collect();

        self.derive(format!("date range [{} to {}]", start, end), filtered)
    }

    /// @ai:intent New analyzer over records whose category matches ignoring case
    /// @ai:post self is unchanged
    /// @ai:effects pure
    pub fn filter_by_category(&self, category: &str) -> SalesAnalyzer {
        let filtered: Vec<Record> = self
            .sales
            .iter()
            .filter(|s| equals_ignore_case(s.category(), category))
            .cloned()
            .collect();

        self.derive(format!("category '{}'", category), filtered)
    }

    fn derive(&self, criterion: String, sales: Vec<Record>) -> SalesAnalyzer {
        self.notify(AnalysisEvent::Filtered {
            criterion,
            records: sales.len(),
        });

        SalesAnalyzer {
            sales,
            observer: self.observer.clone(),
        }
    }

    /// @ai:intent Number of records held
    /// @ai:effects pure
    pub fn count(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.sales
    }

    /// @ai:intent Sum of revenue over every record
    /// @ai:effects pure
    pub fn total_revenue(&self) -> Result<Decimal> {
        self.sales.iter().try_fold(Decimal::ZERO, |acc, sale| {
            sale.checked_revenue()
                .and_then(|revenue| acc.checked_add(revenue))
                .ok_or(Error::Overflow("total_revenue"))
        })
    }

    /// @ai:intent Compute every aggregate into one report
    /// @ai:pre top_n >= 0
    /// @ai:effects time
    pub fn summarize(&self, tax_rate: Decimal, top_n: i64) -> Result<SalesReport> {
        Ok(SalesReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            record_count: self.count(),
            total_revenue: self.total_revenue()?,
            total_by_category: self.total_sales_by_category()?,
            average_by_region: self.average_sales_by_region()?,
            top_products: self.top_selling_products(top_n)?,
            monthly_trend: self.sales_trend_by_month()?,
            tax_rate,
            tax_liability_by_region: self.tax_liability_by_region(tax_rate)?,
            month_over_month_growth: self.month_over_month_growth()?,
        })
    }
}

impl std::fmt::Debug for SalesAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesAnalyzer")
            .field("records", &self.sales.len())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

/// @ai:intent Case-insensitive equality compared one character at a time
/// @ai:post true when lengths match and each pair agrees after upper- or lower-casing
/// @ai:effects pure
fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y
                || x.to_uppercase().eq(y.to_uppercase())
                || x.to_lowercase().eq(y.to_lowercase())
        })
}

/// @ai:intent Growth of current over previous in percent
/// @ai:post zero when previous <= 0; ratio rounded to 4 places before scaling
/// @ai:effects pure
fn growth_percentage(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let ratio = div_half_up(current.checked_sub(previous)?, previous, RATIO_SCALE)?;
    let percent = ratio.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(round_half_up(percent, MONEY_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::observer::RecordingObserver;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(id: i64, product: &str, category: &str, region: &str, qty: i32, price: Decimal) -> Record {
        Record::new(id, date(2023, 6, 15), product, category, region, qty, price)
    }

    fn dated(id: i64, on: NaiveDate, price: Decimal) -> Record {
        Record::new(id, on, "A", "C", "R", 1, price)
    }

    fn map(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn sample() -> SalesAnalyzer {
        SalesAnalyzer::new(vec![
            sale(1, "Laptop", "Electronics", "North", 2, dec!(1200.00)),
            sale(2, "T-Shirt", "Clothing", "North", 3, dec!(20.00)),
            sale(3, "Monitor", "Electronics", "South", 1, dec!(300.00)),
        ])
    }

    #[test]
    fn test_total_sales_by_category() {
        let result = sample().total_sales_by_category().unwrap();
        assert_eq!(
            result,
            map(&[("Electronics", dec!(2700.00)), ("Clothing", dec!(60.00))])
        );
    }

    #[test]
    fn test_total_sales_keeps_full_precision() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "A", "C", "R", 1, dec!(0.10)),
            sale(2, "B", "C", "R", 1, dec!(0.20)),
            sale(3, "B", "C", "R", 1, dec!(0.001)),
        ]);
        assert_eq!(analyzer.total_sales_by_category().unwrap()["C"].to_string(), "0.301");
    }

    #[test]
    fn test_category_grouping_is_case_sensitive() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "Laptop", "Electronics", "North", 2, dec!(1200.00)),
            sale(2, "Laptop", "electronics", "North", 1, dec!(1200.00)),
            sale(3, "Laptop", "Electronics ", "North", 1, dec!(1200.00)),
        ]);
        assert_eq!(analyzer.total_sales_by_category().unwrap().len(), 3);
    }

    #[test]
    fn test_duplicates_and_refunds_are_additive() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "Laptop", "Electronics", "North", 2, dec!(1200.00)),
            sale(1, "Laptop", "Electronics", "North", 2, dec!(1200.00)),
            sale(2, "Laptop", "Electronics", "North", -3, dec!(1200.00)),
            sale(3, "T-Shirt", "Clothing", "South", 3, dec!(-20.00)),
        ]);
        assert_eq!(
            analyzer.total_sales_by_category().unwrap(),
            map(&[("Electronics", dec!(1200.00)), ("Clothing", dec!(-60.00))])
        );
    }

    #[test]
    fn test_average_sales_by_region() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "Laptop", "Electronics", "North", 1, dec!(1200.00)),
            sale(2, "T-Shirt", "Clothing", "North", 3, dec!(20.00)),
            sale(3, "Monitor", "Electronics", "South", 1, dec!(300.00)),
        ]);
        let result = analyzer.average_sales_by_region().unwrap();

        assert_eq!(result, map(&[("North", dec!(630.00)), ("South", dec!(300.00))]));
        assert!(result.values().all(|v| v.scale() == 2));
    }

    #[test]
    fn test_average_rounds_half_up() {
        // (0.01 + 0.02) / 2 = 0.015 -> 0.02
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "A", "C", "R", 1, dec!(0.01)),
            sale(2, "B", "C", "R", 1, dec!(0.02)),
        ]);
        assert_eq!(analyzer.average_sales_by_region().unwrap()["R"], dec!(0.02));

        // 10 / 3 = 3.333... -> 3.33
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "A", "C", "R", 1, dec!(10)),
            sale(2, "B", "C", "R", 1, dec!(0)),
            sale(3, "C", "C", "R", 1, dec!(0)),
        ]);
        assert_eq!(analyzer.average_sales_by_region().unwrap()["R"].to_string(), "3.33");
    }

    #[test]
    fn test_top_selling_products() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "Laptop", "Electronics", "North", 5, dec!(1200.00)),
            sale(2, "T-Shirt", "Clothing", "South", 10, dec!(20.00)),
            sale(3, "Monitor", "Electronics", "East", 3, dec!(300.00)),
        ]);
        let result = analyzer.top_selling_products(2).unwrap();

        assert_eq!(
            result,
            vec![
                ProductQuantity { product: "T-Shirt".into(), quantity: 10 },
                ProductQuantity { product: "Laptop".into(), quantity: 5 },
            ]
        );
    }

    #[test]
    fn test_top_selling_ties_by_name() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "Mouse", "Electronics", "North", 4, dec!(30)),
            sale(2, "Jeans", "Clothing", "South", 2, dec!(50)),
            sale(3, "Jeans", "Clothing", "South", 2, dec!(50)),
            sale(4, "Blender", "Home", "West", 4, dec!(80)),
        ]);
        let names: Vec<_> = analyzer
            .top_selling_products(10)
            .unwrap()
            .into_iter()
            .map(|p| p.product)
            .collect();

        assert_eq!(names, vec!["Blender", "Jeans", "Mouse"]);
    }

    #[test]
    fn test_top_selling_bounds() {
        let analyzer = sample();
        assert!(analyzer.top_selling_products(0).unwrap().is_empty());
        assert_eq!(analyzer.top_selling_products(100).unwrap().len(), 3);
        assert!(matches!(
            analyzer.top_selling_products(-1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sales_trend_by_month() {
        let analyzer = SalesAnalyzer::new(vec![
            dated(1, date(2023, 1, 15), dec!(2400.00)),
            dated(2, date(2023, 1, 20), dec!(60.00)),
            dated(3, date(2023, 2, 10), dec!(300.00)),
        ]);
        assert_eq!(
            analyzer.sales_trend_by_month().unwrap(),
            map(&[("2023-01", dec!(2460.00)), ("2023-02", dec!(300.00))])
        );
    }

    #[test]
    fn test_tax_liability_by_region() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "A", "C", "RegionA", 1, dec!(100.00)),
            sale(2, "A", "C", "RegionB", 1, dec!(0.05)),
        ]);
        let tax = analyzer.tax_liability_by_region(dec!(0.10)).unwrap();

        // 0.005 rounds up to 0.01
        assert_eq!(tax, map(&[("RegionA", dec!(10.00)), ("RegionB", dec!(0.01))]));
        assert!(tax.values().all(|v| v.scale() == 2));
    }

    #[test]
    fn test_tax_rate_taken_literally() {
        let analyzer = SalesAnalyzer::new(vec![sale(1, "A", "C", "R", 1, dec!(100.00))]);
        assert_eq!(analyzer.tax_liability_by_region(dec!(-0.5)).unwrap()["R"], dec!(-50.00));
        assert_eq!(analyzer.tax_liability_by_region(dec!(1.5)).unwrap()["R"], dec!(150.00));
    }

    #[test]
    fn test_month_over_month_growth() {
        let analyzer = SalesAnalyzer::new(vec![
            dated(1, date(2023, 1, 1), dec!(100.00)),
            dated(2, date(2023, 2, 1), dec!(110.00)),
            dated(3, date(2023, 3, 1), dec!(110.00)),
        ]);
        let growth = analyzer.month_over_month_growth().unwrap();

        assert_eq!(growth, map(&[("2023-02", dec!(10.00)), ("2023-03", dec!(0.00))]));
        assert_eq!(growth["2023-03"].to_string(), "0.00");
    }

    #[test]
    fn test_growth_zero_when_previous_not_positive() {
        let analyzer = SalesAnalyzer::new(vec![
            dated(1, date(2023, 1, 1), dec!(-50.00)),
            dated(2, date(2023, 2, 1), dec!(0.00)),
            dated(3, date(2023, 3, 1), dec!(75.00)),
            dated(4, date(2023, 4, 1), dec!(25.00)),
        ]);
        let growth = analyzer.month_over_month_growth().unwrap();

        assert_eq!(growth["2023-02"], Decimal::ZERO);
        assert_eq!(growth["2023-03"], Decimal::ZERO);
        assert_eq!(growth["2023-04"], dec!(-66.67));
    }

    #[test]
    fn test_growth_ratio_rounded_before_percent() {
        // 1 / 3 -> 0.3333 -> 33.33; 2 / 3 -> 0.6667 -> 66.67
        let analyzer = SalesAnalyzer::new(vec![
            dated(1, date(2023, 1, 1), dec!(3.00)),
            dated(2, date(2023, 2, 1), dec!(4.00)),
            dated(3, date(2023, 3, 1), dec!(3.00)),
            dated(4, date(2023, 4, 1), dec!(5.00)),
            dated(5, date(2023, 5, 1), dec!(6.00)),
            dated(6, date(2023, 5, 2), dec!(-0.50)),
            dated(7, date(2023, 6, 1), dec!(6.41)),
        ]);
        let growth = analyzer.month_over_month_growth().unwrap();
        assert_eq!(growth["2023-02"], dec!(33.33));
        assert_eq!(growth["2023-04"], dec!(66.67));
        // 5.50 -> 6.41: 0.91 / 5.50 = 0.16545... -> 0.1655 -> 16.55
        assert_eq!(growth["2023-06"], dec!(16.55));
        assert!(growth.values().all(|v| v.scale() == 2));
    }

    #[test]
    fn test_growth_skips_gap_months() {
        let analyzer = SalesAnalyzer::new(vec![
            dated(1, date(2022, 12, 31), dec!(200.00)),
            dated(2, date(2023, 3, 1), dec!(100.00)),
        ]);
        let growth = analyzer.month_over_month_growth().unwrap();
        assert_eq!(growth, map(&[("2023-03", dec!(-50.00))]));
    }

    #[test]
    fn test_analyze_by_custom_grouping() {
        let result = sample()
            .analyze_by(|s| s.region().to_string(), |s| Decimal::from(s.quantity()))
            .unwrap();
        assert_eq!(result, map(&[("North", dec!(5)), ("South", dec!(1))]));
    }

    #[test]
    fn test_breakdown_matches_named_aggregates() {
        let analyzer = sample();
        assert_eq!(
            analyzer.breakdown(Dimension::Category, Measure::Revenue).unwrap(),
            analyzer.total_sales_by_category().unwrap()
        );
        assert_eq!(
            analyzer.breakdown(Dimension::Month, Measure::Revenue).unwrap(),
            analyzer.sales_trend_by_month().unwrap()
        );
    }

    #[test]
    fn test_filter_by_date_range_inclusive() {
        let analyzer = SalesAnalyzer::new(vec![
            dated(1, date(2023, 1, 1), dec!(1)),
            dated(2, date(2023, 1, 31), dec!(1)),
            dated(3, date(2023, 2, 1), dec!(1)),
        ]);
        let january = analyzer.filter_by_date_range(date(2023, 1, 1), date(2023, 1, 31));

        assert_eq!(january.count(), 2);
        assert_eq!(analyzer.count(), 3);
        assert_eq!(
            analyzer.filter_by_date_range(date(2023, 2, 1), date(2023, 1, 1)).count(),
            0
        );
    }

    #[test]
    fn test_filter_by_category_ignores_case() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "Laptop", "Electronics", "North", 1, dec!(1)),
            sale(2, "Laptop", "ELECTRONICS", "North", 1, dec!(1)),
            sale(3, "Jeans", "Clothing", "North", 1, dec!(1)),
            sale(4, "Laptop", " Electronics", "North", 1, dec!(1)),
        ]);
        let electronics = analyzer.filter_by_category("electronics");

        assert_eq!(electronics.count(), 2);
        assert_eq!(analyzer.count(), 4);
    }

    #[test]
    fn test_filter_by_category_folds_each_character() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "A", "ΟΔΟΣ", "North", 1, dec!(1)),
            sale(2, "B", "Straße", "North", 1, dec!(1)),
        ]);

        assert_eq!(analyzer.filter_by_category("οδοσ").count(), 1);
        assert_eq!(analyzer.filter_by_category("οδος").count(), 1);
        assert_eq!(analyzer.filter_by_category("STRASSE").count(), 0);
        assert_eq!(analyzer.filter_by_category("ΟΔΟ").count(), 0);
    }

    #[test]
    fn test_empty_input_yields_empty_results() {
        let analyzer = SalesAnalyzer::new(vec![]);

        assert!(analyzer.total_sales_by_category().unwrap().is_empty());
        assert!(analyzer.average_sales_by_region().unwrap().is_empty());
        assert!(analyzer.top_selling_products(5).unwrap().is_empty());
        assert!(analyzer.sales_trend_by_month().unwrap().is_empty());
        assert!(analyzer.tax_liability_by_region(dec!(0.10)).unwrap().is_empty());
        assert!(analyzer.month_over_month_growth().unwrap().is_empty());
        assert!(analyzer
            .analyze_by(|s| s.region().to_string(), Record::unit_price)
            .unwrap()
            .is_empty());
        assert_eq!(analyzer.count(), 0);
        assert_eq!(analyzer.total_revenue().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_single_month_has_no_growth() {
        let analyzer = SalesAnalyzer::new(vec![dated(1, date(2023, 5, 5), dec!(10))]);
        assert!(analyzer.month_over_month_growth().unwrap().is_empty());
    }

    #[test]
    fn test_summarize_collects_every_metric() {
        let report = sample().summarize(dec!(0.10), 2).unwrap();

        assert_eq!(report.record_count, 3);
        assert_eq!(report.total_revenue, dec!(2760.00));
        assert_eq!(report.top_products.len(), 2);
        assert_eq!(report.tax_liability_by_region["North"], dec!(246.00));
        assert!(report.month_over_month_growth.is_empty());
    }

    #[test]
    fn test_observer_receives_events() {
        let observer = Arc::new(RecordingObserver::new());
        let analyzer = sample().with_observer(observer.clone());

        let filtered = analyzer.filter_by_category("clothing");
        filtered.total_sales_by_category().unwrap();

        assert_eq!(
            observer.events(),
            vec![
                AnalysisEvent::Initialized { records: 3 },
                AnalysisEvent::Filtered {
                    criterion: "category 'clothing'".to_string(),
                    records: 1
                },
                AnalysisEvent::Aggregated {
                    metric: "total_sales_by_category",
                    groups: 1
                },
            ]
        );
    }

    #[test]
    fn test_observer_does_not_change_results() {
        let plain = sample();
        let observed = sample().with_observer(Arc::new(RecordingObserver::new()));
        assert_eq!(
            plain.total_sales_by_category().unwrap(),
            observed.total_sales_by_category().unwrap()
        );
    }

    const HUGE: Decimal = dec!(50000000000000000000000000000);

    fn overflowing() -> SalesAnalyzer {
        SalesAnalyzer::new(vec![sale(1, "A", "C", "R", 2, HUGE)])
    }

    fn overflow_metric<T: std::fmt::Debug>(result: Result<T>) -> &'static str {
        match result {
            Err(Error::Overflow(metric)) => metric,
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn test_revenue_overflow_is_reported() {
        let analyzer = overflowing();

        assert_eq!(
            overflow_metric(analyzer.total_sales_by_category()),
            "total_sales_by_category"
        );
        assert_eq!(overflow_metric(analyzer.sales_trend_by_month()), "sales_trend_by_month");
        assert_eq!(
            overflow_metric(analyzer.tax_liability_by_region(dec!(0.10))),
            "tax_liability_by_region"
        );
        assert_eq!(
            overflow_metric(analyzer.month_over_month_growth()),
            "month_over_month_growth"
        );
        assert_eq!(
            overflow_metric(analyzer.average_sales_by_region()),
            "average_sales_by_region"
        );
        assert_eq!(overflow_metric(analyzer.total_revenue()), "total_revenue");
        assert_eq!(
            overflow_metric(analyzer.breakdown(Dimension::Product, Measure::Revenue)),
            "breakdown"
        );
        assert_eq!(
            overflow_metric(analyzer.summarize(dec!(0.10), 5)),
            "total_revenue"
        );
    }

    #[test]
    fn test_sum_overflow_is_reported() {
        let analyzer = SalesAnalyzer::new(vec![
            sale(1, "A", "C", "R", 1, HUGE),
            sale(2, "A", "C", "R", 1, HUGE),
        ]);

        assert_eq!(
            overflow_metric(analyzer.total_sales_by_category()),
            "total_sales_by_category"
        );
        assert_eq!(
            overflow_metric(analyzer.average_sales_by_region()),
            "average_sales_by_region"
        );
        assert_eq!(
            overflow_metric(analyzer.analyze_by(|s| s.region().to_string(), Record::unit_price)),
            "analyze_by"
        );
        assert_eq!(overflow_metric(analyzer.total_revenue()), "total_revenue");
    }

    #[test]
    fn test_tax_multiplication_overflow_is_reported() {
        let analyzer = SalesAnalyzer::new(vec![sale(1, "A", "C", "R", 1, HUGE)]);

        assert_eq!(analyzer.total_sales_by_category().unwrap()["C"], HUGE);
        assert_eq!(
            overflow_metric(analyzer.tax_liability_by_region(dec!(2))),
            "tax_liability_by_region"
        );
    }
}
