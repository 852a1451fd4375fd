//! @ai:module:intent CSV loader for sales records
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvLoader, SalesLoaderTrait, REQUIRED_COLUMNS
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::sales::record::Record;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// Columns every sales file must carry, in any order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "transaction_id",
    "date",
    "product_name",
    "category",
    "region",
    "quantity",
    "unit_price",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// @ai:intent Trait for loading sales records
pub trait SalesLoaderTrait: Send + Sync {
    /// @ai:intent Load all records from a single file
    fn load(&self, path: &Path) -> Result<Vec<Record>>;

    /// @ai:intent Load all records from every CSV file under a directory
    fn load_dir(&self, dir: &Path) -> Result<Vec<Record>>;
}

/// @ai:intent Resolved column positions for one file
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    transaction_id: usize,
    date: usize,
    product_name: usize,
    category: usize,
    region: usize,
    quantity: usize,
    unit_price: usize,
}

impl ColumnIndex {
    /// @ai:intent Map header names to column positions
    /// @ai:effects pure
    fn resolve(header: &StringRecord, path: &Path) -> Result<Self> {
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim(), i))
            .collect();

        let lookup = |column: &str| {
            positions
                .get(column)
                .copied()
                .ok_or_else(|| Error::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        };

        Ok(Self {
            transaction_id: lookup("transaction_id")?,
            date: lookup("date")?,
            product_name: lookup("product_name")?,
            category: lookup("category")?,
            region: lookup("region")?,
            quantity: lookup("quantity")?,
            unit_price: lookup("unit_price")?,
        })
    }

}

/// @ai:intent Loads sales records from comma-separated files (RFC 4180 quoting)
/// @ai:effects pure (stateless)
pub struct CsvLoader;

impl CsvLoader {
    /// @ai:intent Create a new CSV loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Parse CSV content; malformed rows are skipped
    /// @ai:pre content is the full file text including header
    /// @ai:post quoted fields may contain commas; labels are kept untrimmed
    /// @ai:effects pure
    pub fn parse_str(content: &str, path: &Path) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let header = reader.headers()?.clone();
        if header.is_empty() {
            tracing::warn!("CSV file is empty: {}", path.display());
            return Ok(Vec::new());
        }

        let columns = ColumnIndex::resolve(&header, path)?;
        let mut records = Vec::new();

        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Skipping unreadable row in {}: {}", path.display(), e);
                    continue;
                }
            };

            match Self::parse_row(&row, &columns) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    tracing::warn!(
                        "Skipping malformed line {} ({}): {}",
                        line,
                        reason,
                        row.iter().collect::<Vec<_>>().join(",")
                    );
                }
            }
        }

        Ok(records)
    }

    /// @ai:intent Parse one data row
    /// @ai:effects pure
    fn parse_row(
        row: &StringRecord,
        columns: &ColumnIndex,
    ) -> std::result::Result<Record, String> {
        let field = |index: usize, name: &str| {
            row.get(index).ok_or_else(|| format!("missing {}", name))
        };

        let transaction_id = field(columns.transaction_id, "transaction_id")?
            .parse::<i64>()
            .map_err(|e| format!("transaction_id: {}", e))?;
        let date = NaiveDate::parse_from_str(field(columns.date, "date")?, DATE_FORMAT)
            .map_err(|e| format!("date: {}", e))?;
        let quantity = field(columns.quantity, "quantity")?
            .parse::<i32>()
            .map_err(|e| format!("quantity: {}", e))?;
        let unit_price = Decimal::from_str(field(columns.unit_price, "unit_price")?)
            .map_err(|e| format!("unit_price: {}", e))?;

        Ok(Record::new(
            transaction_id,
            date,
            field(columns.product_name, "product_name")?,
            field(columns.category, "category")?,
            field(columns.region, "region")?,
            quantity,
            unit_price,
        ))
    }

    /// @ai:intent Find all CSV files in directory, sorted by path
    /// @ai:effects fs:read
    fn find_csv_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.path()
                        .extension()
                        .map(|ext| ext.eq_ignore_ascii_case("csv"))
                        .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesLoaderTrait for CsvLoader {
    /// @ai:intent Load all records from a CSV file
    /// @ai:effects fs:read
    fn load(&self, path: &Path) -> Result<Vec<Record>> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let records = Self::parse_str(&content, path)?;
        tracing::debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// @ai:intent Load and concatenate every CSV file under a directory
    /// @ai:effects fs:read
    fn load_dir(&self, dir: &Path) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        for path in Self::find_csv_files(dir) {
            match self.load(&path) {
                Ok(mut batch) => records.append(&mut batch),
                Err(e) => {
                    tracing::warn!("Skipping unreadable sales file {}: {}", path.display(), e);
                }
            }
        }

        Ok(records)
    }
}
