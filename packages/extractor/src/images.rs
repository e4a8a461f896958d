//! Product image extraction.
//!
//! Fetches the rendered page through the proxy and probes the marketplace's
//! selector list top-down, accepting `data-src` over `src`, filtering by the
//! marketplace's source rule, deduplicating, and capping at [`MAX_IMAGES`].
//! When nothing matches the generic fallbacks run (Open Graph image, then
//! broad product-image probes). Every failure path returns a deterministic
//! placeholder set, never an error.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use sha2::{Digest, Sha256};

use crate::marketplace::Marketplace;
use crate::proxy::PageFetcher;
use crate::selectors::{self, SourceRule, GENERIC_IMAGE_SELECTORS, OG_IMAGE_SELECTOR};

/// Hard cap on the number of images per product.
pub const MAX_IMAGES: usize = 5;

lazy_static! {
    // eBay serves thumbnails as s-l64/s-l300/...; s-l1600 is the full size.
    static ref EBAY_SIZE_RE: Regex = Regex::new(r"s-l\d+").unwrap();
}

/// Extract up to [`MAX_IMAGES`] product image URLs for `url`.
pub async fn extract_images(url: &str, fetcher: &dyn PageFetcher) -> Vec<String> {
    let marketplace = Marketplace::classify(url);

    match fetcher.fetch_html(url).await {
        Ok(html) => {
            let images = probe_images(&html, marketplace);
            if images.is_empty() {
                tracing::debug!(
                    url = %url,
                    marketplace = ?marketplace,
                    "no image selector matched, using placeholders"
                );
                placeholder_images(marketplace, url)
            } else {
                tracing::debug!(url = %url, count = images.len(), "extracted product images");
                images
            }
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "image fetch failed, using placeholders");
            placeholder_images(marketplace, url)
        }
    }
}

/// Probe markup for image URLs using the marketplace's selector list.
pub(crate) fn probe_images(html: &str, marketplace: Marketplace) -> Vec<String> {
    let document = Html::parse_document(html);
    let set = selectors::for_marketplace(marketplace);
    let mut images: Vec<String> = Vec::new();

    for sel in set.images {
        collect_matches(&document, sel, set.image_sources, marketplace, &mut images);
        if images.len() >= MAX_IMAGES {
            break;
        }
    }

    if images.is_empty() {
        // Open Graph image first, then the broad probes.
        if let Ok(og) = Selector::parse(OG_IMAGE_SELECTOR) {
            for el in document.select(&og) {
                if let Some(content) = el.value().attr("content") {
                    if !content.is_empty() {
                        push_unique(&mut images, content.to_string());
                    }
                }
            }
        }
        for sel in GENERIC_IMAGE_SELECTORS {
            collect_matches(&document, sel, SourceRule::AnyHttp, marketplace, &mut images);
            if images.len() >= MAX_IMAGES {
                break;
            }
        }
    }

    images.truncate(MAX_IMAGES);
    images
}

fn collect_matches(
    document: &Html,
    selector: &str,
    rule: SourceRule,
    marketplace: Marketplace,
    out: &mut Vec<String>,
) {
    let Ok(parsed) = Selector::parse(selector) else {
        return;
    };

    for el in document.select(&parsed) {
        if let Some(candidate) = source_candidate(&el) {
            if rule.accepts(&candidate) {
                push_unique(out, finalize_source(candidate, marketplace));
            }
        }
    }
}

/// Pull the best source attribute off an element.
///
/// `data-src` wins over `src` (lazy-loaded galleries); Amazon additionally
/// hides the gallery in a `data-a-dynamic-image` JSON map keyed by URL.
fn source_candidate(el: &scraper::ElementRef<'_>) -> Option<String> {
    let v = el.value();
    let raw = v
        .attr("data-src")
        .or_else(|| v.attr("src"))
        .or_else(|| v.attr("data-a-dynamic-image"))?;

    if raw.trim_start().starts_with('{') {
        first_dynamic_image(raw)
    } else {
        Some(raw.to_string())
    }
}

fn first_dynamic_image(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value.as_object()?.keys().next().cloned()
}

fn finalize_source(src: String, marketplace: Marketplace) -> String {
    if marketplace == Marketplace::Ebay {
        EBAY_SIZE_RE.replace(&src, "s-l1600").into_owned()
    } else {
        src
    }
}

fn push_unique(out: &mut Vec<String>, src: String) {
    if !out.contains(&src) {
        out.push(src);
    }
}

/// Deterministic placeholder set for a marketplace.
///
/// Seeded from a hash of the URL so a given product always degrades to the
/// same five images.
pub fn placeholder_images(marketplace: Marketplace, url: &str) -> Vec<String> {
    let category = selectors::for_marketplace(marketplace).placeholder_category;
    let digest = Sha256::digest(url.as_bytes());
    let seed = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) % 1000;

    (0..MAX_IMAGES as u32)
        .map(|i| format!("https://source.unsplash.com/400x300/?{category}&sig={}", seed + i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CannedFetcher, FailingFetcher};

    #[test]
    fn etsy_gallery_images_are_collected_in_order() {
        let html = r#"
            <html><body>
                <img data-src="https://i.etsystatic.com/a/il_794xN.1.jpg">
                <img src="https://i.etsystatic.com/a/il_794xN.2.jpg">
                <img src="https://cdn.unrelated.com/ad.jpg">
            </body></html>
        "#;
        let images = probe_images(html, Marketplace::Etsy);
        assert_eq!(
            images,
            vec![
                "https://i.etsystatic.com/a/il_794xN.1.jpg",
                "https://i.etsystatic.com/a/il_794xN.2.jpg",
            ]
        );
    }

    #[test]
    fn duplicates_are_dropped_and_results_capped() {
        let mut body = String::new();
        for i in 0..8 {
            body.push_str(&format!(
                "<img src=\"https://i.etsystatic.com/a/il_794xN.{i}.jpg\">"
            ));
        }
        // Duplicate of the first image.
        body.push_str("<img src=\"https://i.etsystatic.com/a/il_794xN.0.jpg\">");
        let html = format!("<html><body>{body}</body></html>");

        let images = probe_images(&html, Marketplace::Etsy);
        assert_eq!(images.len(), MAX_IMAGES);
        assert_eq!(
            images.iter().collect::<std::collections::HashSet<_>>().len(),
            MAX_IMAGES
        );
    }

    #[test]
    fn ebay_thumbnails_are_upscaled() {
        let html = r#"<html><body>
            <img id="icImg" src="https://i.ebayimg.com/images/g/abc/s-l300.jpg">
        </body></html>"#;
        let images = probe_images(html, Marketplace::Ebay);
        assert_eq!(images, vec!["https://i.ebayimg.com/images/g/abc/s-l1600.jpg"]);
    }

    #[test]
    fn amazon_dynamic_image_map_is_parsed() {
        let html = r#"<html><body>
            <img class="a-dynamic-image"
                 data-a-dynamic-image='{"https://m.media-amazon.com/images/I/x1.jpg":[500,500]}'>
        </body></html>"#;
        let images = probe_images(html, Marketplace::Amazon);
        assert_eq!(images, vec!["https://m.media-amazon.com/images/I/x1.jpg"]);
    }

    #[test]
    fn generic_pages_fall_back_to_og_image() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://shop.example.org/hero.jpg">
        </head><body></body></html>"#;
        let images = probe_images(html, Marketplace::Generic);
        assert_eq!(images, vec!["https://shop.example.org/hero.jpg"]);
    }

    #[test]
    fn placeholders_are_deterministic_and_full_length() {
        let url = "https://www.etsy.com/listing/1/thing";
        let a = placeholder_images(Marketplace::Etsy, url);
        let b = placeholder_images(Marketplace::Etsy, url);
        assert_eq!(a, b);
        assert_eq!(a.len(), MAX_IMAGES);
        assert!(a[0].contains("handmade,craft,art"));
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_placeholders() {
        let images = extract_images("https://www.etsy.com/listing/1/x", &FailingFetcher).await;
        assert_eq!(images.len(), MAX_IMAGES);
        assert!(images[0].starts_with("https://source.unsplash.com/"));
    }

    #[tokio::test]
    async fn no_selector_match_degrades_to_placeholders() {
        let fetcher = CannedFetcher::new("<html><body><p>nothing here</p></body></html>");
        let images = extract_images("https://www.etsy.com/listing/1/x", &fetcher).await;
        assert_eq!(images.len(), MAX_IMAGES);
        assert!(images[0].starts_with("https://source.unsplash.com/"));
    }

    #[tokio::test]
    async fn results_never_exceed_the_cap() {
        let mut body = String::new();
        for i in 0..20 {
            body.push_str(&format!("<img src=\"https://cdn.salla.sa/p/{i}.jpg\">"));
        }
        let fetcher = CannedFetcher::new(format!("<html><body>{body}</body></html>"));
        let images = extract_images("https://demo.salla.sa/product/mug", &fetcher).await;
        assert_eq!(images.len(), MAX_IMAGES);
    }
}
