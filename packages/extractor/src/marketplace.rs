//! Marketplace classification and currency inference from URLs.

use serde::{Deserialize, Serialize};
use url::Url;

/// Known marketplaces with dedicated extraction rules.
///
/// Anything unrecognized (including unparsable URLs) is [`Marketplace::Generic`]
/// and falls back to the generic selector set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
    Etsy,
    Ebay,
    Amazon,
    Salla,
    Zid,
    Noon,
    Shopify,
    AliExpress,
    Generic,
}

impl Marketplace {
    /// Classify a URL by its host.
    pub fn classify(url: &str) -> Self {
        let Some(host) = host_of(url) else {
            return Self::Generic;
        };

        if host.contains("etsy.com") {
            Self::Etsy
        } else if host.contains("ebay.") {
            Self::Ebay
        } else if host.contains("amazon.") {
            Self::Amazon
        } else if host.contains("salla.sa") || host.contains(".salla.me") {
            Self::Salla
        } else if host.contains("zid.sa") || host.contains(".zid.store") {
            Self::Zid
        } else if host.contains("noon.com") || host.contains("noon.sa") {
            Self::Noon
        } else if host.contains("shopify.com") {
            Self::Shopify
        } else if host.contains("aliexpress.") {
            Self::AliExpress
        } else {
            Self::Generic
        }
    }

    /// Human-readable marketplace label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Etsy => "Etsy",
            Self::Ebay => "eBay",
            Self::Amazon => "Amazon",
            Self::Salla => "Salla",
            Self::Zid => "Zid",
            Self::Noon => "Noon",
            Self::Shopify => "Shopify",
            Self::AliExpress => "AliExpress",
            Self::Generic => "generic storefront",
        }
    }
}

/// Extract the host of a URL with any leading `www.` stripped.
///
/// Returns `None` for unparsable URLs or URLs without a host.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_ascii_lowercase())
}

/// Supported currency codes.
///
/// Serialized as their ISO-4217 codes (`"SAR"`, `"USD"`, ...), matching the
/// persistence API's wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Saudi riyal, the system default.
    #[default]
    Sar,
    Usd,
    Eur,
    Gbp,
    Aed,
    Kwd,
    Qar,
    Bhd,
    Omr,
    Jod,
    Egp,
}

impl Currency {
    /// Infer the currency for a marketplace URL.
    ///
    /// The rules form a first-match-wins priority list: Saudi domains first,
    /// then Noon, then the other Gulf/Arab ccTLDs, then Europe, then the
    /// generic Western marketplaces. The ordering is a business rule; a Saudi
    /// storefront must resolve to SAR even when a later rule would also
    /// match. Unparsable URLs fall back to the default.
    pub fn infer(url: &str) -> Self {
        let Some(host) = host_of(url) else {
            return Self::Sar;
        };

        if host.ends_with(".sa") || host.contains("salla.") || host.contains("zid.") {
            Self::Sar
        } else if host.contains("noon.com") || host.contains("noon.sa") {
            Self::Sar
        } else if host.ends_with(".ae") {
            Self::Aed
        } else if host.ends_with(".kw") {
            Self::Kwd
        } else if host.ends_with(".qa") {
            Self::Qar
        } else if host.ends_with(".bh") {
            Self::Bhd
        } else if host.ends_with(".om") {
            Self::Omr
        } else if host.ends_with(".jo") {
            Self::Jod
        } else if host.ends_with(".eg") {
            Self::Egp
        } else if host.ends_with(".uk") {
            Self::Gbp
        } else if host.ends_with(".eu")
            || host.ends_with(".de")
            || host.ends_with(".fr")
            || host.ends_with(".it")
            || host.ends_with(".es")
        {
            Self::Eur
        } else if host.contains("amazon.")
            || host.contains("ebay.")
            || host.contains("etsy.")
            || host.ends_with(".com")
            || host.ends_with(".us")
        {
            Self::Usd
        } else {
            Self::Sar
        }
    }

    /// ISO-4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sar => "SAR",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Aed => "AED",
            Self::Kwd => "KWD",
            Self::Qar => "QAR",
            Self::Bhd => "BHD",
            Self::Omr => "OMR",
            Self::Jod => "JOD",
            Self::Egp => "EGP",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
