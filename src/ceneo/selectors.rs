//! CSS selectors for Ceneo review pages.
//!
//! This file contains all CSS selectors used for parsing Ceneo pages.
//! Update this file when Ceneo changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the review page as a whole.
pub mod page {
    use super::*;

    /// Product title above the reviews tab.
    pub static PRODUCT_NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h1.product-top__product-info__name").unwrap());

    /// One review card.
    pub static OPINION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.js_product-review").unwrap());

    /// Link to the next page of reviews.
    pub static NEXT_PAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.pagination__next").unwrap());

    /// Attribute on the next page link.
    pub static NEXT_PAGE_ATTR: &str = "href";
}

/// Selectors inside a single review card.
pub mod opinion {
    use super::*;

    /// Review id attribute on the card itself.
    pub static ID_ATTR: &str = "data-entry-id";

    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.user-post__author-name").unwrap());

    /// "Polecam" / "Nie polecam" label.
    pub static RECOMMENDATION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.user-post__author-recomendation > em").unwrap());

    /// Score text such as "4,5/5".
    pub static STARS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.user-post__score-count").unwrap());

    pub static CONTENT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.user-post__text").unwrap());

    /// "Useful" vote counter.
    pub static USEFUL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("button.vote-yes > span").unwrap());

    /// "Useless" vote counter.
    pub static USELESS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("button.vote-no > span").unwrap());

    /// Publication date; value lives in the `datetime` attribute.
    pub static PUBLISHED: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("span.user-post__published > time:nth-child(1)").unwrap()
    });

    /// Purchase date; value lives in the `datetime` attribute.
    pub static PURCHASED: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("span.user-post__published > time:nth-child(2)").unwrap()
    });

    pub static DATE_ATTR: &str = "datetime";

    /// Each listed advantage.
    pub static PROS: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div.review-feature__title--positives ~ div.review-feature__item").unwrap()
    });

    /// Each listed disadvantage.
    pub static CONS: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div.review-feature__title--negatives ~ div.review-feature__item").unwrap()
    });
}
