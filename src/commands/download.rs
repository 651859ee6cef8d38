//! Download command: write a per-product export file.

use crate::ceneo::models::normalize_product_id;
use crate::config::Config;
use crate::export::{self, ExportFormat};
use crate::store::Store;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Converts stored opinions to JSON, CSV, or XLSX and writes them to disk.
pub struct DownloadCommand {
    config: Config,
}

impl DownloadCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Writes `<id>.<ext>` in the working directory unless `output` is given.
    /// Returns the path written.
    pub fn execute(
        &self,
        product_id: &str,
        format: ExportFormat,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let product_id = normalize_product_id(product_id)?;

        let store = Store::new(&self.config.data_dir);
        let bytes = export::export_opinions(&store, &product_id, format)
            .with_context(|| format!("Failed to export product {} as {}", product_id, format))?;

        let path = output.map(Path::to_path_buf).unwrap_or_else(|| format.file_name(&product_id).into());
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote {} bytes ({}) to {}", bytes.len(), format.mime_type(), path.display());
        Ok(path)
    }
}
