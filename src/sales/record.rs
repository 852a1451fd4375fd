//! @ai:module:intent Sales transaction record
//! @ai:module:layer domain
//! @ai:module:public_api Record
//! @ai:module:stateless true

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// @ai:intent A single immutable sales transaction
/// @ai:invariant fields are never mutated after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    transaction_id: i64,
    date: NaiveDate,
    product_name: String,
    category: String,
    region: String,
    quantity: i32,
    unit_price: Decimal,
}

impl Record {
    /// @ai:intent Create a new record; labels are stored verbatim
    /// @ai:effects pure
    pub fn new(
        transaction_id: i64,
        date: NaiveDate,
        product_name: impl Into<String>,
        category: impl Into<String>,
        region: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            transaction_id,
            date,
            product_name: product_name.into(),
            category: category.into(),
            region: region.into(),
            quantity,
            unit_price,
        }
    }

    pub fn transaction_id(&self) -> i64 {
        self.transaction_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Negative quantities are returns.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// @ai:intent Revenue of this transaction (unit price times quantity)
    /// @ai:post exact, no rounding applied; None when the product overflows
    /// @ai:effects pure
    pub fn checked_revenue(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// @ai:intent Calendar month key in YYYY-MM form
    /// @ai:effects pure
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sale{{id={}, date={}, product='{}', category='{}', region='{}', qty={}, price={}}}",
            self.transaction_id,
            self.date,
            self.product_name,
            self.category,
            self.region,
            self.quantity,
            self.unit_price
        )
    }
}
