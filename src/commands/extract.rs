//! Extract command: scrape a product's reviews and persist them.

use crate::ceneo::models::normalize_product_id;
use crate::ceneo::{CeneoClient, ReviewSource, Scraper};
use crate::config::Config;
use crate::error::Error;
use crate::format::Formatter;
use crate::store::Store;
use anyhow::{Context, Result};
use tracing::info;

/// Scrapes every review page of a product and saves stats and opinions.
pub struct ExtractCommand {
    config: Config,
}

impl ExtractCommand {
    /// Creates a new extract command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Extracts a product from Ceneo and returns its formatted summary.
    pub async fn execute(&self, product_id: &str) -> Result<String> {
        let client = CeneoClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, product_id).await
    }

    /// Extracts a product with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ReviewSource,
        product_id: &str,
    ) -> Result<String> {
        let product_id = normalize_product_id(product_id)?;

        info!("Extracting product: {}", product_id);

        let scraper = Scraper::new(client).with_max_pages(self.config.max_pages);
        let product = match scraper.extract_product(&product_id).await {
            Ok(product) => product,
            Err(Error::ProductNotFound(id)) => {
                anyhow::bail!("Product {} does not exist on Ceneo, nothing was saved.", id)
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to extract product {}", product_id))
            }
        };

        let store = Store::new(&self.config.data_dir);
        store
            .save(&product)
            .with_context(|| format!("Failed to save product {}", product_id))?;

        info!("Saved product {} to {}", product_id, store.root().display());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(&product, false)?)
    }
}
