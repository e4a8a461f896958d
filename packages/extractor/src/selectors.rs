//! Per-marketplace selector tables.
//!
//! Each marketplace gets a prioritized selector list for images and prices;
//! extractors walk a list top-down until a selector yields a usable match.
//! The lists mirror the page structures the marketplaces actually serve and
//! will drift as those sites redesign; treat entries as heuristics, not
//! contracts.

use crate::marketplace::Marketplace;

/// Which `src`/`data-src` values count as real product images.
#[derive(Debug, Clone, Copy)]
pub enum SourceRule {
    /// Keep sources containing one of these substrings.
    Contains(&'static [&'static str]),
    /// Keep sources containing one of these substrings, or any absolute
    /// http(s) URL.
    ContainsOrHttp(&'static [&'static str]),
    /// Keep any absolute http(s) URL.
    AnyHttp,
}

impl SourceRule {
    /// Check whether a candidate source URL passes this rule.
    pub fn accepts(&self, src: &str) -> bool {
        match self {
            Self::Contains(needles) => needles.iter().any(|n| src.contains(n)),
            Self::ContainsOrHttp(needles) => {
                needles.iter().any(|n| src.contains(n)) || src.starts_with("http")
            }
            Self::AnyHttp => src.starts_with("http"),
        }
    }
}

/// Selector lists and filters for one marketplace.
#[derive(Debug, Clone, Copy)]
pub struct SelectorSet {
    pub images: &'static [&'static str],
    pub image_sources: SourceRule,
    pub prices: &'static [&'static str],
    /// Keyword category used to seed placeholder image sets.
    pub placeholder_category: &'static str,
}

/// Generic image probes appended after every marketplace list.
pub const GENERIC_IMAGE_SELECTORS: &[&str] = &[
    ".product-image img",
    ".product-photo img",
    ".main-image img",
    ".featured-image img",
    "img[alt*=\"product\"]",
    "img[alt*=\"Product\"]",
    "img[class*=\"product\"]",
    "img[id*=\"product\"]",
];

/// Open Graph image meta tag, tried before the generic probes.
pub const OG_IMAGE_SELECTOR: &str = "meta[property=\"og:image\"]";

/// Generic price probes appended after every marketplace list.
pub const GENERIC_PRICE_SELECTORS: &[&str] = &[
    ".price",
    ".product-price",
    ".cost",
    ".amount",
    "[class*=\"price\"]",
    "[id*=\"price\"]",
    ".currency",
    ".money",
    ".value",
];

const DEFAULT_CATEGORY: &str = "product,item,goods";

const ETSY: SelectorSet = SelectorSet {
    images: &[
        "img[data-src*=\"il_794xN\"]",
        "img[src*=\"il_794xN\"]",
        ".carousel-image img",
        ".listing-page-image img",
        "img[alt*=\"listing\"]",
    ],
    image_sources: SourceRule::Contains(&["etsystatic.com"]),
    prices: &[
        ".currency-value",
        ".notranslate",
        "[data-test-id=\"price\"]",
        ".listing-page-title + .wt-mb-xs-2 .currency-value",
    ],
    placeholder_category: "handmade,craft,art",
};

const EBAY: SelectorSet = SelectorSet {
    images: &[
        "#icImg",
        "#mainImgHldr img",
        ".ux-image-carousel-item img",
        ".ux-image-filmstrip-carousel-item img",
        "img[src*=\"ebayimg.com\"]",
        "#PicturePanel img",
    ],
    image_sources: SourceRule::Contains(&["ebayimg.com"]),
    prices: &[
        ".notranslate",
        ".ux-textspans.notranslate",
        "[data-testid=\"x-price-primary\"] .notranslate",
        ".display-price .notranslate",
    ],
    placeholder_category: "vintage,collectible,antique",
};

const AMAZON: SelectorSet = SelectorSet {
    images: &[
        "#landingImage",
        "#imgBlkFront",
        ".a-dynamic-image",
        "img[data-src*=\"images/I/\"]",
        "img[src*=\"images/I/\"]",
        "#altImages img",
    ],
    image_sources: SourceRule::Contains(&["images/I/"]),
    prices: &[
        ".a-price-whole",
        ".a-offscreen",
        "#priceblock_dealprice",
        "#priceblock_ourprice",
        ".a-price-range .a-offscreen",
    ],
    placeholder_category: DEFAULT_CATEGORY,
};

const SALLA: SelectorSet = SelectorSet {
    images: &[
        ".product-gallery img",
        ".product-images img",
        ".gallery-item img",
        ".product-image img",
        "[data-src*=\"salla\"]",
        "img[src*=\"salla\"]",
        ".swiper-slide img",
        ".product-slider img",
    ],
    image_sources: SourceRule::ContainsOrHttp(&["salla"]),
    prices: &[
        ".product-price",
        ".price",
        ".s-product-card-price",
        "[data-price]",
        ".product-details .price",
        ".product-info .price",
    ],
    placeholder_category: "fashion,accessories,lifestyle",
};

const ZID: SelectorSet = SelectorSet {
    images: &[
        ".product-gallery img",
        ".product-images img",
        ".gallery-item img",
        ".product-image img",
        "[data-src*=\"zid\"]",
        "img[src*=\"zid\"]",
        ".swiper-slide img",
        ".product-slider img",
        ".product-photos img",
    ],
    image_sources: SourceRule::ContainsOrHttp(&["zid"]),
    prices: &[
        ".product-price",
        ".price",
        ".product-details .price",
        "[data-price]",
        ".product-info .price",
        ".price-current",
    ],
    placeholder_category: "business,commerce,retail",
};

const NOON: SelectorSet = SelectorSet {
    images: &[
        ".swiper-slide img",
        ".product-image img",
        "img[src*=\"noon.com\"]",
        "img[src*=\"nooncdn.com\"]",
        ".image-gallery img",
        ".product-gallery img",
        "img[alt*=\"product\"]",
        "img[class*=\"product\"]",
    ],
    image_sources: SourceRule::ContainsOrHttp(&["noon.com", "nooncdn.com"]),
    prices: &[
        ".priceNow",
        ".price",
        ".product-price",
        "[data-qa=\"pdp-price\"]",
        ".productPrice",
        ".price-current",
    ],
    placeholder_category: DEFAULT_CATEGORY,
};

const SHOPIFY: SelectorSet = SelectorSet {
    images: &[
        ".product__media img",
        ".product-single__photo img",
        ".product-photo-container img",
        "img[src*=\"cdn.shopify.com\"]",
        ".product-image-main img",
        ".featured-image img",
    ],
    image_sources: SourceRule::Contains(&["shopify.com"]),
    prices: &[],
    placeholder_category: DEFAULT_CATEGORY,
};

const ALIEXPRESS: SelectorSet = SelectorSet {
    images: &[
        ".images-view-item img",
        ".product-image img",
        "img[src*=\"alicdn.com\"]",
        ".image-view img",
        ".main-image img",
    ],
    image_sources: SourceRule::Contains(&["alicdn.com"]),
    prices: &[],
    placeholder_category: DEFAULT_CATEGORY,
};

const GENERIC: SelectorSet = SelectorSet {
    images: &[],
    image_sources: SourceRule::AnyHttp,
    prices: &[],
    placeholder_category: DEFAULT_CATEGORY,
};

/// Look up the selector set for a marketplace.
pub fn for_marketplace(marketplace: Marketplace) -> &'static SelectorSet {
    match marketplace {
        Marketplace::Etsy => &ETSY,
        Marketplace::Ebay => &EBAY,
        Marketplace::Amazon => &AMAZON,
        Marketplace::Salla => &SALLA,
        Marketplace::Zid => &ZID,
        Marketplace::Noon => &NOON,
        Marketplace::Shopify => &SHOPIFY,
        Marketplace::AliExpress => &ALIEXPRESS,
        Marketplace::Generic => &GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn all_marketplaces() -> [Marketplace; 9] {
        [
            Marketplace::Etsy,
            Marketplace::Ebay,
            Marketplace::Amazon,
            Marketplace::Salla,
            Marketplace::Zid,
            Marketplace::Noon,
            Marketplace::Shopify,
            Marketplace::AliExpress,
            Marketplace::Generic,
        ]
    }

    #[test]
    fn every_selector_parses() {
        for mp in all_marketplaces() {
            let set = for_marketplace(mp);
            for sel in set.images.iter().chain(set.prices.iter()) {
                assert!(Selector::parse(sel).is_ok(), "bad selector {sel:?} for {mp:?}");
            }
        }
        for sel in GENERIC_IMAGE_SELECTORS.iter().chain(GENERIC_PRICE_SELECTORS) {
            assert!(Selector::parse(sel).is_ok(), "bad generic selector {sel:?}");
        }
        assert!(Selector::parse(OG_IMAGE_SELECTOR).is_ok());
    }

    #[test]
    fn source_rules() {
        assert!(SourceRule::Contains(&["etsystatic.com"])
            .accepts("https://i.etsystatic.com/123/il_794xN.jpg"));
        assert!(!SourceRule::Contains(&["etsystatic.com"]).accepts("https://cdn.other.com/x.jpg"));
        assert!(SourceRule::ContainsOrHttp(&["salla"]).accepts("https://cdn.other.com/x.jpg"));
        assert!(!SourceRule::AnyHttp.accepts("/relative/path.jpg"));
    }
}
