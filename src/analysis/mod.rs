//! @ai:module:intent Aggregation engine and its result types
//! @ai:module:layer application
//! @ai:module:public_api SalesAnalyzer, SalesReport, ProductQuantity, Dimension, Measure, AnalysisObserver

pub mod analyzer;
pub mod observer;
pub mod rounding;
pub mod types;

pub use analyzer::SalesAnalyzer;
pub use observer::{AnalysisEvent, AnalysisObserver, RecordingObserver, TracingObserver};
pub use rounding::{div_half_up, round_half_up};
pub use types::{Dimension, Measure, ProductQuantity, SalesReport};
