//! Rule-based description synthesis.
//!
//! Classifies a product's type and tier from URL keywords, then composes a
//! sectioned marketing description: marketplace base sentences, a product
//! analysis block, a market snapshot block, and a marketing tips block,
//! separated by blank lines. Section presence and ordering are part of the
//! contract; the wording is not. Pure string work with no I/O; never fails
//! and always returns non-empty text.

use crate::marketplace::{host_of, Marketplace};

/// Product type inferred from URL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Clothing,
    Electronics,
    Home,
    Beauty,
    Jewelry,
    Books,
    Sports,
    Toys,
    Miscellaneous,
}

impl ProductType {
    /// Classify by keyword containment on the lowercased URL.
    pub fn classify(url: &str) -> Self {
        let u = url.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| u.contains(w));

        if has(&["clothing", "fashion", "shirt", "dress"]) {
            Self::Clothing
        } else if has(&["electronics", "phone", "laptop", "tech"]) {
            Self::Electronics
        } else if has(&["home", "furniture", "decor", "kitchen"]) {
            Self::Home
        } else if has(&["beauty", "cosmetic", "skincare", "makeup"]) {
            Self::Beauty
        } else if has(&["jewelry", "watch", "accessory"]) {
            Self::Jewelry
        } else if has(&["book", "education", "learning"]) {
            Self::Books
        } else if has(&["sport", "fitness", "gym"]) {
            Self::Sports
        } else if has(&["toy", "game", "kids", "children"]) {
            Self::Toys
        } else {
            Self::Miscellaneous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clothing => "clothing and fashion",
            Self::Electronics => "electronics and tech",
            Self::Home => "home and decor",
            Self::Beauty => "beauty and personal care",
            Self::Jewelry => "jewelry and accessories",
            Self::Books => "books and education",
            Self::Sports => "sports and fitness",
            Self::Toys => "toys and kids",
            Self::Miscellaneous => "general merchandise",
        }
    }

    /// Type-specific listing advice for the analysis block.
    fn note(&self) -> &'static str {
        match self {
            Self::Clothing => "Fashion items need clear sizing info and photos from several angles",
            Self::Electronics => "Tech products need precise specifications and explicit warranty terms",
            Self::Home => "Home goods sell on build quality, design, and practical function",
            Self::Beauty => "Beauty products need ingredient lists and usage instructions",
            Self::Jewelry => "Jewelry needs high-resolution photos and material details",
            Self::Books => "Educational items sell on content value and learning outcomes",
            Self::Sports => "Sports gear needs performance and durability information",
            Self::Toys => "Kids' products need visible safety and quality standards",
            Self::Miscellaneous => "A broad product benefits from a thorough, detailed description",
        }
    }
}

/// Product tier inferred from URL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductTier {
    Luxury,
    Budget,
    Handmade,
    Vintage,
    Modern,
    General,
}

impl ProductTier {
    /// Classify by keyword containment on the lowercased URL.
    pub fn classify(url: &str) -> Self {
        let u = url.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| u.contains(w));

        if has(&["luxury", "premium", "exclusive"]) {
            Self::Luxury
        } else if has(&["budget", "cheap", "affordable"]) {
            Self::Budget
        } else if has(&["handmade", "craft", "artisan"]) {
            Self::Handmade
        } else if has(&["vintage", "antique", "retro"]) {
            Self::Vintage
        } else if has(&["new", "latest", "modern"]) {
            Self::Modern
        } else {
            Self::General
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Luxury => "luxury",
            Self::Budget => "budget",
            Self::Handmade => "handmade",
            Self::Vintage => "vintage",
            Self::Modern => "modern",
            Self::General => "general",
        }
    }
}

/// Section header for the analysis block.
pub const ANALYSIS_HEADER: &str = "Product analysis:";
/// Section header for the market snapshot block.
pub const MARKET_HEADER: &str = "Market snapshot:";
/// Section header for the marketing tips block.
pub const TIPS_HEADER: &str = "Marketing tips:";

fn base_sentences(marketplace: Marketplace) -> &'static [&'static str] {
    match marketplace {
        Marketplace::Etsy => &[
            "A one-of-a-kind handmade piece, carefully crafted from quality materials.",
            "An exclusive, elegant design that suits every taste and occasion.",
            "Ideal as a personal gift or as an artistic touch for home decor.",
            "Traditional handcraft with a modern twist.",
        ],
        Marketplace::Ebay => &[
            "A competitively priced product with guaranteed quality from a trusted seller.",
            "Excellent condition, backed by the seller's guarantee and a flexible return policy.",
            "Safe, fast shipping with step-by-step tracking.",
            "A great opportunity to pick up a distinctive product at exceptional value.",
        ],
        Marketplace::Salla => &[
            "An exclusive product from a specialized, accredited Salla storefront.",
            "High quality with store warranty and attentive after-sales service.",
            "Fast delivery across Saudi Arabia within 24-48 hours.",
            "A product tuned to the Saudi and Gulf market with strong local-culture fit.",
            "Competitive pricing with cash-on-delivery and installment options.",
        ],
        Marketplace::Zid => &[
            "A high-quality product from the Zid commerce platform.",
            "A trusted, officially registered Saudi merchant.",
            "Safe, fast shipping with order tracking and full insurance.",
            "Quality guarantee with 14-day return and exchange.",
            "A product designed for customers in the region, meeting local standards.",
        ],
        _ => &[
            "A high-quality product available online from a reliable source.",
            "Excellent specifications at a fair price, with quality assured.",
            "Suitable for personal or commercial use, depending on your needs.",
            "Guaranteed quality and dependable service with support available.",
        ],
    }
}

const MARKET_BULLETS: &[&str] = &[
    "Growing demand for this product category in the Saudi market",
    "Good fit for local taste with wide marketing potential",
    "A solid opportunity for online stores and resellers",
    "Healthy margins are achievable with the right marketing strategy",
    "Multiple distinct customer segments can be targeted",
];

const TIPS_BULLETS: &[&str] = &[
    "Use high-quality photos that show product details",
    "Write a detailed description focused on benefits and features",
    "Price against a study of market competitors",
    "Target the right search keywords",
    "Offer attractive introductory deals to new customers",
];

/// Generate a multi-section marketing description for a product URL.
pub fn synthesize(url: &str) -> String {
    let marketplace = Marketplace::classify(url);
    let product_type = ProductType::classify(url);
    let tier = ProductTier::classify(url);
    let host = host_of(url).unwrap_or_else(|| "unknown storefront".to_string());

    let base = base_sentences(marketplace).join(" ");

    let analysis = format!(
        "{ANALYSIS_HEADER}\n- Type: {}\n- Tier: {}\n- Marketplace: {}\n- {}",
        product_type.label(),
        tier.label(),
        host,
        product_type.note(),
    );

    let market = format!("{MARKET_HEADER}\n- {}", MARKET_BULLETS.join("\n- "));
    let tips = format!("{TIPS_HEADER}\n- {}", TIPS_BULLETS.join("\n- "));

    format!("{base}\n\n{analysis}\n\n{market}\n\n{tips}")
}

/// Condense a description to its first, middle, and last sentences.
///
/// Text with three or fewer sentences is returned unchanged.
pub fn summarize(text: &str) -> String {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() <= 3 {
        return text.to_string();
    }

    let first = sentences[0];
    let middle = sentences[sentences.len() / 2];
    let last = sentences[sentences.len() - 1];
    format!("{first}. {middle}. {last}.")
}

const HIGHLIGHT_TAGS: &[&str] = &[
    "High-quality product",
    "Fast delivery",
    "Elegant, distinctive design",
    "Limited-time offer",
    "Excellent customer ratings",
    "Tuned for the Saudi market",
    "Quality guaranteed",
];

/// Append marketing highlights and a fixed feature list to a description.
///
/// Tag choice is seeded from the text length so repeated calls on the same
/// input stay stable.
pub fn enhance(text: &str) -> String {
    let start = text.len() % HIGHLIGHT_TAGS.len();
    let first = HIGHLIGHT_TAGS[start];
    let second = HIGHLIGHT_TAGS[(start + 1) % HIGHLIGHT_TAGS.len()];

    format!(
        "{text}\n\n{first} | {second}\n\nAdditional highlights:\n\
         - High, guaranteed quality\n\
         - Suitable for everyday use\n\
         - Contemporary design that suits every taste"
    )
}
