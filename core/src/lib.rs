// Salescope Core Library
// Synthetic sales records, CSV persistence, filters, aggregates and chart figures

pub mod charts;
pub mod dataset;
pub mod generator;
pub mod query;
pub mod record;

// Export core types
pub use charts::{ChartSet, Figure};
pub use dataset::{Dataset, DatasetSummary};
pub use generator::{generate, GeneratorConfig};
pub use query::{DashboardView, FilterState, GroupTotal, MonthlyTotal, Selection};
pub use record::{Category, Region, SalesRecord, PROFIT_FLOOR};

use std::path::PathBuf;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalescopeError {
    #[error("data file '{}' not found; run `datagen` first to create it", .0.display())]
    DataNotFound(PathBuf),

    #[error("malformed data file at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
pub type Result<T> = std::result::Result<T, SalescopeError>;
