//! JSON persistence of product stats and opinions.
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/products/<product_id>.json   stats, no opinions
//! <data_dir>/opinions/<product_id>.json   array of opinions
//! ```

use crate::ceneo::models::{Opinion, Product, ProductSummary};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PRODUCTS_DIR: &str = "products";
const OPINIONS_DIR: &str = "opinions";

/// File-backed product storage.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn product_path(&self, product_id: &str) -> PathBuf {
        self.root.join(PRODUCTS_DIR).join(format!("{}.json", product_id))
    }

    pub fn opinions_path(&self, product_id: &str) -> PathBuf {
        self.root.join(OPINIONS_DIR).join(format!("{}.json", product_id))
    }

    /// Writes opinions, then stats. Existing files are overwritten.
    pub fn save(&self, product: &Product) -> Result<()> {
        self.export_opinions(product)?;
        self.export_product(product)?;
        Ok(())
    }

    /// Writes the stats file.
    pub fn export_product(&self, product: &Product) -> Result<PathBuf> {
        let path = self.product_path(&product.product_id);
        write_json(&path, &product.summary())?;
        Ok(path)
    }

    /// Writes the opinions file.
    pub fn export_opinions(&self, product: &Product) -> Result<PathBuf> {
        let path = self.opinions_path(&product.product_id);
        write_json(&path, &product.opinions)?;
        Ok(path)
    }

    /// Reads a product back, with or without its opinions.
    pub fn import_product(&self, product_id: &str, with_opinions: bool) -> Result<Product> {
        let summary = self.load_summary(product_id)?;
        let opinions = if with_opinions { self.load_opinions(product_id)? } else { Vec::new() };

        Ok(Product::from_parts(summary, opinions))
    }

    pub fn load_summary(&self, product_id: &str) -> Result<ProductSummary> {
        read_json(product_id, &self.product_path(product_id))
    }

    pub fn load_opinions(&self, product_id: &str) -> Result<Vec<Opinion>> {
        read_json(product_id, &self.opinions_path(product_id))
    }

    /// Raw bytes of the stored opinions file.
    pub fn opinions_bytes(&self, product_id: &str) -> Result<Vec<u8>> {
        let path = self.opinions_path(product_id);
        std::fs::read(&path).map_err(|e| missing_or_io(product_id, &path, e))
    }

    /// Summaries of every product with stored opinions, sorted by id.
    pub fn list_products(&self) -> Result<Vec<ProductSummary>> {
        let dir = self.root.join(OPINIONS_DIR);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();

        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            match self.load_summary(&id) {
                Ok(summary) => summaries.push(summary),
                Err(e @ Error::StorageMissing { .. }) => {
                    warn!("Skipping {}: {}", id, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summaries)
    }
}

/// Pretty-prints with a 4-space indent; non-ASCII is written as-is.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    std::fs::write(path, buf)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(product_id: &str, path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| missing_or_io(product_id, path, e))?;

    serde_json::from_str(&content).map_err(|e| Error::ParseFailed {
        what: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn missing_or_io(product_id: &str, path: &Path, e: std::io::Error) -> Error {
    if e.kind() == ErrorKind::NotFound {
        Error::StorageMissing { product_id: product_id.to_string(), path: path.to_path_buf() }
    } else {
        Error::Io(e)
    }
}
