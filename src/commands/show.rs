//! Show command: render one stored product.

use crate::ceneo::models::normalize_product_id;
use crate::config::Config;
use crate::format::Formatter;
use crate::store::Store;
use anyhow::{Context, Result};

/// Renders a stored product's stats, charts and (optionally) opinions.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Opinions are always loaded since the charts are drawn from them.
    pub fn execute(&self, product_id: &str, with_opinions: bool) -> Result<String> {
        let product_id = normalize_product_id(product_id)?;

        let store = Store::new(&self.config.data_dir);
        let product = store.import_product(&product_id, true).with_context(|| {
            format!("Product {} has not been extracted yet", product_id)
        })?;

        Ok(Formatter::new(self.config.format).format_product(&product, with_opinions)?)
    }
}
