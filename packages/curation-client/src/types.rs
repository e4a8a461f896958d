//! Wire types for the curation persistence API.

use chrono::{DateTime, Utc};
use product_extractor::Currency;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Canonical product id.
///
/// The API has historically served ids as either JSON numbers or numeric
/// strings; both forms normalize to one type here, at the deserialization
/// boundary, so lookups never compare across representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProductId(pub i64);

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(ProductId(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(ProductId)
                .map_err(|_| de::Error::custom(format!("non-numeric product id: {s:?}"))),
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Review status of a product record.
///
/// Records can arrive from older data without a status at all (defaults to
/// `Pending`) or with the legacy `"rejected"` spelling, which folds into
/// `Disapproved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Pending,
    Approved,
    #[serde(alias = "rejected")]
    Disapproved,
}

impl ProductStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Disapproved => "disapproved",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary of a server-side image archive run for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSave {
    pub folder_path: String,
    pub saved_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// A persisted product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: Currency,
    pub url: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_save: Option<LocalSave>,
}

impl ProductRecord {
    /// Primary image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Authenticated user as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
}

/// Partial update body for `PUT /api/products/{id}`.
///
/// Only the set fields are sent; `season` uses a nested option so "clear the
/// season" (`Some(None)` → JSON null) is distinct from "leave it alone".
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Option<String>>,
}

impl ProductPatch {
    pub fn status(status: ProductStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn season(season: Option<String>) -> Self {
        Self {
            season: Some(season),
            ..Self::default()
        }
    }
}

/// Result of `POST /save-images-locally`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedImages {
    pub folder_path: String,
    pub saved_count: u32,
}

// Response envelopes.

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    #[serde(default)]
    pub user: Option<CurrentUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsEnvelope {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeasonsEnvelope {
    #[serde(default)]
    pub seasons: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedEnvelope {
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_accepts_numbers_and_numeric_strings() {
        let a: ProductId = serde_json::from_str("7").unwrap();
        let b: ProductId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(a, b);

        assert!(serde_json::from_str::<ProductId>("\"seven\"").is_err());
    }

    #[test]
    fn status_defaults_to_pending_and_folds_the_legacy_alias() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": 1, "name": "x", "description": "d", "url": "https://a.b/c"}"#,
        )
        .unwrap();
        assert_eq!(record.status, ProductStatus::Pending);

        let rejected: ProductStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(rejected, ProductStatus::Disapproved);

        let disapproved: ProductStatus = serde_json::from_str("\"disapproved\"").unwrap();
        assert_eq!(disapproved, ProductStatus::Disapproved);
    }

    #[test]
    fn patch_serializes_only_the_set_fields() {
        let patch = ProductPatch::status(ProductStatus::Approved);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"status": "approved"})
        );

        let clear = ProductPatch::season(None);
        assert_eq!(
            serde_json::to_value(&clear).unwrap(),
            serde_json::json!({"season": null})
        );

        let set = ProductPatch::season(Some("Winter".into()));
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!({"season": "Winter"})
        );
    }

    #[test]
    fn record_round_trips_with_currency_codes() {
        let record = ProductRecord {
            id: ProductId(3),
            name: "blue mug".into(),
            description: "a mug".into(),
            images: vec!["https://cdn.example/1.jpg".into()],
            price: 49.0,
            currency: Currency::Sar,
            url: "https://example.salla.sa/product/blue-mug".into(),
            status: ProductStatus::Approved,
            season: Some("Winter".into()),
            local_save: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["currency"], "SAR");
        assert_eq!(json["status"], "approved");

        let back: ProductRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
