//! Review extraction: product name lookup and the pagination loop.

use crate::ceneo::client::ReviewSource;
use crate::ceneo::models::{Opinion, Product};
use crate::ceneo::parser::Parser;
use crate::error::{Error, Result};
use tracing::{debug, info, warn};

/// Follows a product's review pages through a [`ReviewSource`].
pub struct Scraper<'a, S: ReviewSource + ?Sized> {
    source: &'a S,
    parser: Parser,
    max_pages: Option<u32>,
}

impl<'a, S: ReviewSource + ?Sized> Scraper<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, parser: Parser::new(source.base_url()), max_pages: None }
    }

    /// Stops after `max_pages` pages even if more are linked.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetches the product title. `Ok(None)` means the product does not exist.
    pub async fn extract_name(&self, product_id: &str) -> Result<Option<String>> {
        let url = self.source.reviews_url(product_id);

        let html = match self.source.fetch(&url).await {
            Ok(html) => html,
            Err(e) if e.status() == Some(404) => {
                debug!("Product {} answered 404", product_id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(self.parser.parse_product_name(&html))
    }

    /// Collects opinions from every review page, in page order.
    pub async fn extract_opinions(&self, product_id: &str) -> Result<Vec<Opinion>> {
        let mut opinions = Vec::new();
        let mut next_url = Some(self.source.reviews_url(product_id));
        let mut pages = 0u32;

        while let Some(url) = next_url {
            if self.max_pages.is_some_and(|max| pages >= max) {
                warn!("Stopping after {} pages for product {}", pages, product_id);
                break;
            }

            let html = self.source.fetch(&url).await?;
            let page = self.parser.parse_page(&html);
            pages += 1;

            debug!("Page {} yielded {} opinions", pages, page.opinions.len());
            opinions.extend(page.opinions);
            next_url = page.next_page;
        }

        info!("Extracted {} opinions from {} pages", opinions.len(), pages);
        Ok(opinions)
    }

    /// Name lookup, full opinion extraction, and stats in one go.
    pub async fn extract_product(&self, product_id: &str) -> Result<Product> {
        let name = self
            .extract_name(product_id)
            .await?
            .ok_or_else(|| Error::ProductNotFound(product_id.to_string()))?;

        info!("Extracting opinions for {} ({})", name, product_id);

        let mut product = Product::new(product_id, name);
        product.opinions = self.extract_opinions(product_id).await?;
        product.calculate_stats();

        Ok(product)
    }
}
