//! Products command: list everything extracted so far.

use crate::config::Config;
use crate::format::Formatter;
use crate::store::Store;
use anyhow::{Context, Result};

/// Lists stored products with their stats.
pub struct ProductsCommand {
    config: Config,
}

impl ProductsCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<String> {
        let store = Store::new(&self.config.data_dir);
        let summaries = store.list_products().with_context(|| {
            format!("Failed to list products in {}", self.config.data_dir.display())
        })?;

        Ok(Formatter::new(self.config.format).format_summaries(&summaries)?)
    }
}
