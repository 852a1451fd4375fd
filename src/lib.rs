//! @ai:module:intent Sales analysis library: ingestion, aggregation and reporting
//! @ai:module:layer application
//! @ai:module:public_api config, error, sales, analysis, report
//!
//! ```rust,no_run
//! use sales_insights::{CsvLoader, SalesAnalyzer, SalesLoaderTrait};
//! use std::path::Path;
//!
//! let records = CsvLoader::new().load(Path::new("sales_data.csv")).unwrap();
//! let analyzer = SalesAnalyzer::new(records);
//! for (category, total) in analyzer.total_sales_by_category().unwrap() {
//!     println!("{category}: {total}");
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;
pub mod sales;

pub use analysis::{
    AnalysisEvent, AnalysisObserver, Dimension, Measure, ProductQuantity, SalesAnalyzer,
    SalesReport, TracingObserver,
};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use report::{ConsoleReporter, ReportGenerator};
pub use sales::{CsvLoader, DataGenerator, Record, SalesLoaderTrait};
