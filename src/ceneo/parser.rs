//! HTML parser for Ceneo review pages.

use crate::ceneo::extract::{extract, extract_list};
use crate::ceneo::models::{Opinion, Recommendation};
use crate::ceneo::selectors::{opinion, page};
use crate::error::{Error, Result};
use scraper::{ElementRef, Html};
use tracing::{debug, trace, warn};

/// Opinions found on one page and the link to the following page.
#[derive(Debug, Clone, Default)]
pub struct ReviewPage {
    pub opinions: Vec<Opinion>,
    /// Absolute URL of the next page, `None` on the last page
    pub next_page: Option<String>,
}

/// Parser for Ceneo HTML pages.
pub struct Parser {
    base_url: String,
}

impl Parser {
    /// Creates a parser resolving relative links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Parses every review card on a page plus the pagination link.
    pub fn parse_page(&self, html: &str) -> ReviewPage {
        let document = Html::parse_document(html);
        let mut result = ReviewPage::default();

        for element in document.select(&page::OPINION) {
            match self.parse_opinion(element) {
                Ok(opinion) => {
                    trace!("Parsed opinion: {}", opinion.opinion_id);
                    result.opinions.push(opinion);
                }
                Err(e) => {
                    warn!("Failed to parse opinion card: {}", e);
                    // Continue parsing other opinions
                }
            }
        }

        result.next_page = self.next_page(&document);

        debug!(
            "Parsed {} opinions (next page: {})",
            result.opinions.len(),
            result.next_page.as_deref().unwrap_or("none")
        );

        result
    }

    /// Builds an opinion from one review card.
    pub fn parse_opinion(&self, element: ElementRef) -> Result<Opinion> {
        let opinion_id = element
            .value()
            .attr(opinion::ID_ATTR)
            .ok_or(Error::FieldMissing(opinion::ID_ATTR))?
            .to_string();

        let recommendation = extract(element, &opinion::RECOMMENDATION, None);

        Ok(Opinion {
            opinion_id,
            author: extract(element, &opinion::AUTHOR, None),
            recommendation: Recommendation::from_label(recommendation.as_deref()),
            stars: extract(element, &opinion::STARS, None),
            content: extract(element, &opinion::CONTENT, None),
            useful: extract(element, &opinion::USEFUL, None).and_then(|t| parse_votes(&t)),
            useless: extract(element, &opinion::USELESS, None).and_then(|t| parse_votes(&t)),
            published: extract(element, &opinion::PUBLISHED, Some(opinion::DATE_ATTR)),
            purchased: extract(element, &opinion::PURCHASED, Some(opinion::DATE_ATTR)),
            pros: extract_list(element, &opinion::PROS),
            cons: extract_list(element, &opinion::CONS),
        })
    }

    /// Extracts the product title, `None` when the page has none.
    pub fn parse_product_name(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        extract(document.root_element(), &page::PRODUCT_NAME, None).filter(|name| !name.is_empty())
    }

    /// Resolves the "next page" link, `None` on the last page.
    pub fn next_page(&self, document: &Html) -> Option<String> {
        let href =
            extract(document.root_element(), &page::NEXT_PAGE, Some(page::NEXT_PAGE_ATTR))?;
        let href = href.trim();

        if href.is_empty() {
            None
        } else if href.starts_with("http://") || href.starts_with("https://") {
            Some(href.to_string())
        } else if let Some(rest) = href.strip_prefix("//") {
            let scheme = self.base_url.split_once("://").map_or("https", |(scheme, _)| scheme);
            Some(format!("{}://{}", scheme, rest))
        } else if href.starts_with('/') {
            Some(format!("{}{}", self.base_url, href))
        } else {
            Some(format!("{}/{}", self.base_url, href))
        }
    }
}

/// Extracts a vote count from text like "12" or "1 234".
fn parse_votes(text: &str) -> Option<u32> {
    let cleaned: String = text.chars().filter(|c| c.is_ascii_digit()).collect();

    cleaned.parse().ok()
}
