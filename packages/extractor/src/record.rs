//! Product draft assembly.
//!
//! The one place the extraction subsystem runs anything concurrently: image
//! and price extraction are independent network-bound operations, joined
//! before the draft is produced. Either branch may degrade internally; the
//! join itself never aborts.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::describe;
use crate::error::ExtractError;
use crate::images::extract_images;
use crate::marketplace::Currency;
use crate::name::extract_name;
use crate::price::extract_price;
use crate::proxy::PageFetcher;

/// A normalized product record before persistence.
///
/// Has no id: the persistence API assigns one on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: f64,
    pub currency: Currency,
    pub url: String,
}

/// Check that a submitted URL is usable: parsable and http(s).
pub fn is_valid_product_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Build a [`ProductDraft`] for a marketplace URL.
///
/// Name, description, and currency are computed synchronously from the URL
/// string; images and price run concurrently through the fetcher and are
/// joined; both must settle before the draft is produced. The only error is
/// an invalid input URL, rejected before any network call.
pub async fn build_draft(
    url: &str,
    fetcher: &dyn PageFetcher,
) -> Result<ProductDraft, ExtractError> {
    let url = url.trim();
    if !is_valid_product_url(url) {
        return Err(ExtractError::InvalidUrl {
            url: url.to_string(),
        });
    }

    let name = extract_name(url);
    let description = describe::synthesize(url);
    let currency = Currency::infer(url);

    let (images, price) = tokio::join!(extract_images(url, fetcher), extract_price(url, fetcher));

    tracing::info!(
        url = %url,
        name = %name,
        image_count = images.len(),
        price = price,
        currency = %currency,
        "assembled product draft"
    );

    Ok(ProductDraft {
        name,
        description,
        images,
        price,
        currency,
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::MAX_IMAGES;
    use crate::testing::{CannedFetcher, FailingFetcher};

    #[tokio::test]
    async fn builds_a_complete_draft_from_canned_markup() {
        let fetcher = CannedFetcher::new(
            r#"<html><body>
                <img src="https://i.etsystatic.com/a/il_794xN.1.jpg">
                <span class="currency-value">24.99</span>
            </body></html>"#,
        );

        let draft = build_draft(
            "https://www.etsy.com/listing/123456789/handmade-wood-box",
            &fetcher,
        )
        .await
        .unwrap();

        assert_eq!(draft.name, "handmade wood box");
        assert_eq!(draft.images, vec!["https://i.etsystatic.com/a/il_794xN.1.jpg"]);
        assert_eq!(draft.price, 24.99);
        assert_eq!(draft.currency, Currency::Usd);
        assert!(!draft.description.is_empty());
    }

    #[tokio::test]
    async fn both_branches_degrade_without_aborting_the_join() {
        let draft = build_draft("https://example.salla.sa/product/blue-mug", &FailingFetcher)
            .await
            .unwrap();

        assert_eq!(draft.name, "blue mug");
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.images.len(), MAX_IMAGES);
        assert_eq!(draft.currency, Currency::Sar);
    }

    #[tokio::test]
    async fn invalid_urls_are_rejected_before_any_fetch() {
        let err = build_draft("not a url", &FailingFetcher).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl { .. }));

        let err = build_draft("ftp://example.com/x", &FailingFetcher)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl { .. }));
    }
}
