//! ceneo-opinions - Ceneo.pl product review scraper
//!
//! Follows a product's review pages, extracts every opinion, computes
//! summary statistics and keeps the result as JSON for later listing,
//! charting and JSON/CSV/XLSX export.

pub mod ceneo;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod stats;
pub mod store;

pub use ceneo::models::{Opinion, Product, ProductSummary, Recommendation};
pub use config::Config;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use stats::{Distribution, Stats};
pub use store::Store;
