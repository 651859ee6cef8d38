//! Ceneo-specific modules for HTTP client, parsing, extraction, and data models.

pub mod client;
pub mod crawl;
pub mod extract;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{CeneoClient, ReviewSource};
pub use crawl::Scraper;
pub use models::{Opinion, Product, ProductSummary, Recommendation};
pub use parser::{Parser, ReviewPage};
