//! Product name extraction from URL path shapes.
//!
//! Purely syntactic: no network access. Each marketplace has a known path
//! shape (Etsy `/listing/<id>/<slug>`, eBay `/itm/<slug>`, Salla
//! `/product/<slug>`, Zid `/products/<slug>`); the slug is percent-decoded
//! and de-hyphenated. When no shape matches, the last meaningful path
//! segment is used, then a host-based placeholder, then a fixed sentinel for
//! URLs that do not parse at all. Always returns non-empty text.

use url::Url;

use crate::marketplace::{host_of, Marketplace};

/// Sentinel for URLs that cannot be parsed.
const UNKNOWN_PRODUCT: &str = "Unknown product";

/// Extract a product name from a marketplace URL.
pub fn extract_name(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return UNKNOWN_PRODUCT.to_string();
    };

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    if let Some(slug) = marketplace_slug(url, &segments) {
        return slug;
    }

    // Fallback: last meaningful path segment.
    if let Some(last) = segments.last() {
        if last.len() > 3 {
            return tidy_slug(last, true);
        }
    }

    match host_of(url) {
        Some(host) => format!("Product from {host}"),
        None => UNKNOWN_PRODUCT.to_string(),
    }
}

/// Try the marketplace-specific path shapes.
fn marketplace_slug(url: &str, segments: &[&str]) -> Option<String> {
    match Marketplace::classify(url) {
        // /listing/<numeric id>/<slug>
        Marketplace::Etsy => match segments {
            ["listing", id, slug, ..] if id.chars().all(|c| c.is_ascii_digit()) => {
                Some(tidy_slug(slug, false))
            }
            _ => None,
        },
        // /itm/<slug>
        Marketplace::Ebay => segment_after(segments, "itm").map(|s| tidy_slug(s, false)),
        // /product/<slug>
        Marketplace::Salla => segment_after(segments, "product").map(|s| tidy_slug(s, true)),
        // /products/<slug>
        Marketplace::Zid => segment_after(segments, "products").map(|s| tidy_slug(s, true)),
        _ => None,
    }
}

fn segment_after<'a>(segments: &[&'a str], marker: &str) -> Option<&'a str> {
    let idx = segments.iter().position(|s| *s == marker)?;
    segments.get(idx + 1).copied()
}

/// Percent-decode a slug and replace separators with spaces.
fn tidy_slug(slug: &str, underscores_too: bool) -> String {
    let decoded = urlencoding::decode(slug)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| slug.to_string());
    let spaced = if underscores_too {
        decoded.replace(['-', '_'], " ")
    } else {
        decoded.replace('-', " ")
    };
    spaced.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etsy_listing_slug() {
        assert_eq!(
            extract_name("https://www.etsy.com/listing/123456789/handmade-wood-box"),
            "handmade wood box"
        );
    }

    #[test]
    fn ebay_item_slug() {
        assert_eq!(
            extract_name("https://www.ebay.com/itm/vintage-camera-lens?hash=abc"),
            "vintage camera lens"
        );
    }

    #[test]
    fn salla_product_slug() {
        assert_eq!(
            extract_name("https://example.salla.sa/product/blue-mug"),
            "blue mug"
        );
    }

    #[test]
    fn zid_products_slug_with_underscores() {
        assert_eq!(
            extract_name("https://store.zid.store/products/ceramic_tea_set"),
            "ceramic tea set"
        );
    }

    #[test]
    fn percent_encoded_slugs_are_decoded() {
        assert_eq!(
            extract_name("https://www.etsy.com/listing/42/caf%C3%A9-poster"),
            "café poster"
        );
    }

    #[test]
    fn falls_back_to_last_path_segment() {
        assert_eq!(
            extract_name("https://shop.example.org/catalog/walnut-desk"),
            "walnut desk"
        );
    }

    #[test]
    fn short_segments_fall_through_to_host_placeholder() {
        assert_eq!(
            extract_name("https://shop.example.org/p/x1"),
            "Product from shop.example.org"
        );
    }

    #[test]
    fn unparsable_urls_yield_the_sentinel() {
        assert_eq!(extract_name("::: not a url :::"), "Unknown product");
    }

    #[test]
    fn never_returns_empty_text() {
        for url in [
            "https://www.etsy.com/",
            "https://example.salla.sa/product/",
            "nonsense",
            "https://a.b/c",
        ] {
            assert!(!extract_name(url).is_empty(), "empty name for {url}");
        }
    }
}
