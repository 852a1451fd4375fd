//! @ai:module:intent Synthetic sales data generation for demos and tests
//! @ai:module:layer infrastructure
//! @ai:module:public_api DataGenerator
//! @ai:module:stateless false

use crate::analysis::rounding::round_half_up;
use crate::error::Result;
use crate::sales::record::Record;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::path::Path;

/// (product, category, base price in cents)
const CATALOG: [(&str, &str, i64); 13] = [
    ("Laptop", "Electronics", 120_000),
    ("Smartphone", "Electronics", 80_000),
    ("Headphones", "Electronics", 15_000),
    ("Monitor", "Electronics", 30_000),
    ("Keyboard", "Electronics", 5_000),
    ("Mouse", "Electronics", 3_000),
    ("T-Shirt", "Clothing", 2_000),
    ("Jeans", "Clothing", 5_000),
    ("Sneakers", "Clothing", 8_000),
    ("Backpack", "Accessories", 6_000),
    ("Coffee Maker", "Home", 10_000),
    ("Blender", "Home", 8_000),
    ("Desk Lamp", "Home", 4_000),
];

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

/// @ai:intent Generates realistic random sales records
pub struct DataGenerator {
    rng: StdRng,
    start_date: NaiveDate,
}

impl DataGenerator {
    /// @ai:intent Create a generator seeded from system entropy
    /// @ai:effects random
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// @ai:intent Create a reproducible generator
    /// @ai:effects pure
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }

    /// @ai:intent Produce the next random record
    /// @ai:post quantity in 1..=5, price within 10% of the catalog price
    /// @ai:effects state:write
    pub fn next_record(&mut self, transaction_id: i64) -> Record {
        let (product, category, base_cents) = CATALOG[self.rng.gen_range(0..CATALOG.len())];
        let region = REGIONS[self.rng.gen_range(0..REGIONS.len())];
        let quantity = self.rng.gen_range(1..=5);

        // Jitter in basis points: [9000, 11000) of the base price.
        let jitter = self.rng.gen_range(9_000..11_000);
        let raw_price = Decimal::new(base_cents * jitter, 6);
        let unit_price = round_half_up(raw_price, 2);

        let offset = self.rng.gen_range(0..365u64);
        let date = self
            .start_date
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.start_date);

        Record::new(transaction_id, date, product, category, region, quantity, unit_price)
    }

    /// @ai:intent Produce a batch of records with ids 1..=count
    /// @ai:effects state:write
    pub fn generate(&mut self, count: usize) -> Vec<Record> {
        (1..=count as i64).map(|id| self.next_record(id)).collect()
    }

    /// @ai:intent Write a CSV file readable by CsvLoader
    /// @ai:effects fs:write, state:write
    pub fn write_csv(&mut self, path: &Path, count: usize) -> Result<()> {
        tracing::info!("Starting data generation: {} records to {}", count, path.display());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        for record in self.generate(count) {
            writer.serialize(&record)?;
        }
        writer.flush()?;

        tracing::info!("Generated {} records in {}", count, path.display());
        Ok(())
    }
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}
