//! @ai:module:intent Result types produced by the aggregation engine
//! @ai:module:layer domain
//! @ai:module:public_api ProductQuantity, SalesReport, Dimension, Measure
//! @ai:module:stateless true

use crate::sales::Record;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Total units sold for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub product: String,
    pub quantity: i64,
}

/// @ai:intent Grouping key selectable at runtime
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Region,
    Product,
    Month,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Region => "region",
            Dimension::Product => "product",
            Dimension::Month => "month",
        }
    }

    /// @ai:intent Extract this dimension's key from a record
    /// @ai:effects pure
    pub fn key(&self, record: &Record) -> String {
        match self {
            Dimension::Category => record.category().to_string(),
            Dimension::Region => record.region().to_string(),
            Dimension::Product => record.product_name().to_string(),
            Dimension::Month => record.month_key(),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(Dimension::Category),
            "region" => Ok(Dimension::Region),
            "product" => Ok(Dimension::Product),
            "month" => Ok(Dimension::Month),
            other => Err(format!(
                "unknown dimension '{}' (expected category, region, product or month)",
                other
            )),
        }
    }
}

/// @ai:intent Summed value selectable at runtime
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Measure {
    Revenue,
    Quantity,
    UnitPrice,
}

impl Measure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Revenue => "revenue",
            Measure::Quantity => "quantity",
            Measure::UnitPrice => "unit-price",
        }
    }

    /// @ai:intent Extract this measure's value from a record
    /// @ai:post None only when revenue overflows
    /// @ai:effects pure
    pub fn value(&self, record: &Record) -> Option<Decimal> {
        match self {
            Measure::Revenue => record.checked_revenue(),
            Measure::Quantity => Some(Decimal::from(record.quantity())),
            Measure::UnitPrice => Some(record.unit_price()),
        }
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(Measure::Revenue),
            "quantity" => Ok(Measure::Quantity),
            "unit-price" => Ok(Measure::UnitPrice),
            other => Err(format!(
                "unknown measure '{}' (expected revenue, quantity or unit-price)",
                other
            )),
        }
    }
}

/// @ai:intent Every aggregate for one dataset, ready for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub generated_at: String,
    pub record_count: usize,
    pub total_revenue: Decimal,
    pub total_by_category: BTreeMap<String, Decimal>,
    pub average_by_region: BTreeMap<String, Decimal>,
    pub top_products: Vec<ProductQuantity>,
    pub monthly_trend: BTreeMap<String, Decimal>,
    pub tax_rate: Decimal,
    pub tax_liability_by_region: BTreeMap<String, Decimal>,
    pub month_over_month_growth: BTreeMap<String, Decimal>,
}
