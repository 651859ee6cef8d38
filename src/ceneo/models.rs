//! Data models for Ceneo opinions and products.

use crate::error::{Error, Result};
use crate::stats::Stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the reviewer recommends the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Recommends,
    DoesNotRecommend,
    /// No recommendation given, or text we don't recognise.
    #[default]
    Unknown,
}

impl Recommendation {
    /// Maps the label shown on the page ("Polecam" / "Nie polecam").
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("polecam") => Recommendation::Recommends,
            Some("nie polecam") => Recommendation::DoesNotRecommend,
            _ => Recommendation::Unknown,
        }
    }

    /// All variants, in chart order.
    pub fn all() -> &'static [Recommendation] {
        &[Recommendation::Recommends, Recommendation::DoesNotRecommend, Recommendation::Unknown]
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Recommends => write!(f, "recommends"),
            Recommendation::DoesNotRecommend => write!(f, "does not recommend"),
            Recommendation::Unknown => write!(f, "no opinion"),
        }
    }
}

/// One customer review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    /// Review id, unique within a product
    pub opinion_id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub recommendation: Recommendation,
    /// Raw score text, e.g. "4,5/5"
    #[serde(default)]
    pub stars: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// "Useful" votes
    #[serde(default)]
    pub useful: Option<u32>,
    /// "Useless" votes
    #[serde(default)]
    pub useless: Option<u32>,
    /// Publication timestamp as shown by the site
    #[serde(default)]
    pub published: Option<String>,
    /// Purchase timestamp as shown by the site
    #[serde(default)]
    pub purchased: Option<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

impl Opinion {
    /// Creates an opinion with only its id set.
    pub fn new(opinion_id: impl Into<String>) -> Self {
        Self { opinion_id: opinion_id.into(), ..Self::default() }
    }

    /// Numeric star rating, if the score text parses.
    pub fn score(&self) -> Option<f64> {
        self.stars.as_deref().and_then(crate::stats::parse_stars)
    }
}

/// Stats file contents: everything about a product except its opinions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: String,
    pub product_name: String,
    #[serde(flatten)]
    pub stats: Stats,
}

/// All opinions of one product plus derived statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    #[serde(flatten)]
    pub stats: Stats,
    pub opinions: Vec<Opinion>,
}

impl Product {
    /// Creates an empty product.
    pub fn new(product_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            stats: Stats::default(),
            opinions: Vec::new(),
        }
    }

    /// Rebuilds a product from its stored summary and opinions.
    pub fn from_parts(summary: ProductSummary, opinions: Vec<Opinion>) -> Self {
        Self {
            product_id: summary.product_id,
            product_name: summary.product_name,
            stats: summary.stats,
            opinions,
        }
    }

    /// Recomputes stats from the current opinion list.
    pub fn calculate_stats(&mut self) -> &mut Self {
        self.stats = Stats::calculate(&self.opinions);
        self
    }

    /// Returns the stats-file view of this product.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            stats: self.stats.clone(),
        }
    }
}

/// Trims a product id and checks it is usable in URLs and file names.
pub fn normalize_product_id(product_id: &str) -> Result<String> {
    let id = product_id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidProductId(id.to_string()));
    }
    Ok(id.to_string())
}
