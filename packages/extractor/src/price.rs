//! Product price extraction.
//!
//! Probes the marketplace's price selector list, then the generic tail.
//! Element text is reduced to its first numeric token (digits, thousands
//! commas, one decimal point) and parsed; unparsable or non-positive text
//! falls through to the next candidate. `0.0` is the "unknown" sentinel,
//! never an error.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

use crate::marketplace::Marketplace;
use crate::proxy::PageFetcher;
use crate::selectors::{self, GENERIC_PRICE_SELECTORS};

lazy_static! {
    static ref NUMERIC_TOKEN_RE: Regex = Regex::new(r"\d[\d,]*\.?\d*").unwrap();
}

/// Extract a price for `url`; `0.0` means unknown.
pub async fn extract_price(url: &str, fetcher: &dyn PageFetcher) -> f64 {
    match fetcher.fetch_html(url).await {
        Ok(html) => {
            let price = probe_price(&html, Marketplace::classify(url));
            if price == 0.0 {
                tracing::debug!(url = %url, "no price selector matched");
            }
            price
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "price fetch failed");
            0.0
        }
    }
}

/// Probe markup for a price using the marketplace list plus the generic tail.
pub(crate) fn probe_price(html: &str, marketplace: Marketplace) -> f64 {
    let document = Html::parse_document(html);
    let set = selectors::for_marketplace(marketplace);

    for sel in set.prices.iter().chain(GENERIC_PRICE_SELECTORS) {
        let Ok(parsed) = Selector::parse(sel) else {
            continue;
        };
        for el in document.select(&parsed) {
            let text: String = el.text().collect();
            if let Some(price) = parse_price_text(text.trim()) {
                return price;
            }
        }
    }

    0.0
}

/// Parse price text like `"$ 1,299.50"` into `1299.5`.
///
/// Returns `None` when no positive numeric token is present, so the caller
/// can fall through to the next selector.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let token = NUMERIC_TOKEN_RE.find(text)?.as_str().replace(',', "");
    let value: f64 = token.parse().ok()?;
    (value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CannedFetcher, FailingFetcher};

    #[test]
    fn cleans_currency_symbols_and_thousands_separators() {
        assert_eq!(parse_price_text("$ 1,299.50"), Some(1299.5));
        assert_eq!(parse_price_text("SAR 49"), Some(49.0));
        assert_eq!(parse_price_text("1.299"), Some(1.299));
    }

    #[test]
    fn non_numeric_text_yields_none() {
        assert_eq!(parse_price_text("Contact us"), None);
        assert_eq!(parse_price_text(""), None);
        assert_eq!(parse_price_text("0"), None);
    }

    #[test]
    fn marketplace_selectors_win_over_generic_ones() {
        let html = r#"<html><body>
            <span class="price">99</span>
            <span class="a-price-whole">42</span>
        </body></html>"#;
        assert_eq!(probe_price(html, Marketplace::Amazon), 42.0);
    }

    #[test]
    fn unusable_text_falls_through_to_the_next_selector() {
        let html = r#"<html><body>
            <span class="product-price">Contact us</span>
            <span class="price">149.99</span>
        </body></html>"#;
        assert_eq!(probe_price(html, Marketplace::Salla), 149.99);
    }

    #[test]
    fn exhausted_selectors_yield_the_sentinel() {
        let html = "<html><body><p>no numbers here</p></body></html>";
        assert_eq!(probe_price(html, Marketplace::Generic), 0.0);
    }

    #[tokio::test]
    async fn fetch_failure_yields_the_sentinel() {
        let price = extract_price("https://www.etsy.com/listing/1/x", &FailingFetcher).await;
        assert_eq!(price, 0.0);
    }

    #[tokio::test]
    async fn end_to_end_probe_through_a_fetcher() {
        let fetcher = CannedFetcher::new(
            r#"<html><body><div class="priceNow">AED 1,050.00</div></body></html>"#,
        );
        let price = extract_price("https://www.noon.com/p/123", &fetcher).await;
        assert_eq!(price, 1050.0);
    }
}
