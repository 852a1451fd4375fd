//! @ai:module:intent Sales records, CSV ingestion and sample data
//! @ai:module:layer domain
//! @ai:module:public_api Record, CsvLoader, DataGenerator

pub mod generator;
pub mod loader;
pub mod record;

pub use generator::DataGenerator;
pub use loader::{CsvLoader, SalesLoaderTrait, REQUIRED_COLUMNS};
pub use record::Record;
