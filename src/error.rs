//! Error kinds surfaced by extraction, storage, and export.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Closed set of failures callers can match on.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field (not an optional opinion field) was absent from the page.
    #[error("required field missing: {0}")]
    FieldMissing(&'static str),

    /// The HTTP request failed or returned a non-success status.
    #[error("failed to fetch {url}: {reason}")]
    FetchFailed { url: String, status: Option<u16>, reason: String },

    /// Content could not be decoded (stored JSON, star values, URLs).
    #[error("failed to parse {what}: {reason}")]
    ParseFailed { what: String, reason: String },

    /// No stored data exists for the product.
    #[error("no stored data for product {product_id} ({})", path.display())]
    StorageMissing { product_id: String, path: PathBuf },

    /// The site has no product with this id.
    #[error("product {0} does not exist")]
    ProductNotFound(String),

    /// The product id is empty or contains characters other than ASCII letters and digits.
    #[error("invalid product id: '{0}'")]
    InvalidProductId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    /// Returns the HTTP status of a failed fetch, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::FetchFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the error means there is nothing to show for the product.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ProductNotFound(_) | Error::StorageMissing { .. })
            || self.status() == Some(404)
    }
}
