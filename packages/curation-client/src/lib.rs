//! REST client for the product curation persistence API.
//!
//! The API authenticates with a session cookie, speaks JSON, and owns all
//! record ids. This crate exposes the [`CurationApi`] trait so the review
//! workflow can run against an in-memory double in tests, and
//! [`HttpCurationClient`] as the production implementation.

pub mod error;
pub mod types;

pub use error::{ApiError, Result};
pub use types::{
    CurrentUser, LocalSave, ProductId, ProductPatch, ProductRecord, ProductStatus, SavedImages,
};

use std::time::Duration;

use async_trait::async_trait;
use product_extractor::ProductDraft;
use serde::de::DeserializeOwned;

use types::{CreatedEnvelope, ErrorEnvelope, ProductsEnvelope, SeasonsEnvelope, UserEnvelope};

/// Operations offered by the persistence API.
#[async_trait]
pub trait CurationApi: Send + Sync {
    /// Who is logged in; `None` is guest mode, not an error.
    async fn current_user(&self) -> Result<Option<CurrentUser>>;

    /// End the session.
    async fn logout(&self) -> Result<()>;

    async fn list_products(&self) -> Result<Vec<ProductRecord>>;

    /// Persist a draft; the server assigns and returns the id.
    async fn create_product(&self, draft: &ProductDraft) -> Result<ProductId>;

    /// Partially update a record (status and/or season).
    async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> Result<()>;

    async fn delete_product(&self, id: ProductId) -> Result<()>;

    async fn delete_all_products(&self) -> Result<()>;

    async fn list_seasons(&self) -> Result<Vec<String>>;

    async fn create_season(&self, name: &str) -> Result<()>;

    async fn rename_season(&self, name: &str, new_name: &str) -> Result<()>;

    async fn delete_season(&self, name: &str) -> Result<()>;

    /// Archive a record's images server-side.
    async fn save_images_locally(&self, record: &ProductRecord) -> Result<SavedImages>;
}

/// HTTP implementation of [`CurationApi`].
pub struct HttpCurationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCurationClient {
    /// Build a client for the API at `base_url`.
    ///
    /// The cookie store is enabled so the login session cookie rides along
    /// on every call.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn ensure_ok(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(())
    }
}

/// Build an [`ApiError::Api`] from a failed response body, preferring the
/// server's `{"error": ...}` message when present.
fn api_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| body.trim().to_string());
    ApiError::Api { status, message }
}

#[async_trait]
impl CurationApi for HttpCurationClient {
    async fn current_user(&self) -> Result<Option<CurrentUser>> {
        let response = self.client.get(self.api("current-user")).send().await?;
        let envelope: UserEnvelope = Self::decode(response).await?;
        Ok(envelope.user)
    }

    async fn logout(&self) -> Result<()> {
        let response = self.client.post(self.api("logout")).send().await?;
        Self::ensure_ok(response).await
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>> {
        let response = self.client.get(self.api("products")).send().await?;
        let envelope: ProductsEnvelope = Self::decode(response).await?;
        Ok(envelope.products)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<ProductId> {
        let response = self
            .client
            .post(self.api("products"))
            .json(draft)
            .send()
            .await?;
        let created: CreatedEnvelope = Self::decode(response).await?;
        tracing::info!(product_id = %created.product_id, url = %draft.url, "created product");
        Ok(created.product_id)
    }

    async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> Result<()> {
        let response = self
            .client
            .put(self.api(&format!("products/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::ensure_ok(response).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let response = self
            .client
            .delete(self.api(&format!("products/{id}")))
            .send()
            .await?;
        Self::ensure_ok(response).await
    }

    async fn delete_all_products(&self) -> Result<()> {
        let response = self
            .client
            .delete(self.api("delete_all_products"))
            .send()
            .await?;
        Self::ensure_ok(response).await
    }

    async fn list_seasons(&self) -> Result<Vec<String>> {
        let response = self.client.get(self.api("seasons")).send().await?;
        let envelope: SeasonsEnvelope = Self::decode(response).await?;
        Ok(envelope.seasons)
    }

    async fn create_season(&self, name: &str) -> Result<()> {
        let response = self
            .client
            .post(self.api("seasons"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        Self::ensure_ok(response).await
    }

    async fn rename_season(&self, name: &str, new_name: &str) -> Result<()> {
        let response = self
            .client
            .put(self.api(&format!("seasons/{}", urlencoding::encode(name))))
            .json(&serde_json::json!({ "new_name": new_name }))
            .send()
            .await?;
        Self::ensure_ok(response).await
    }

    async fn delete_season(&self, name: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.api(&format!("seasons/{}", urlencoding::encode(name))))
            .send()
            .await?;
        Self::ensure_ok(response).await
    }

    async fn save_images_locally(&self, record: &ProductRecord) -> Result<SavedImages> {
        let body = serde_json::json!({
            "product_name": record.name,
            "image_urls": record.images,
            "product_id": record.id,
            "season": record.season.as_deref().unwrap_or("archived"),
        });

        let response = self
            .client
            .post(format!("{}/save-images-locally", self.base_url))
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpCurationClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.api("products"), "http://localhost:5000/api/products");
    }

    #[test]
    fn api_error_prefers_the_server_message() {
        let err = api_error(404, r#"{"error": "product not found"}"#);
        assert!(matches!(
            err,
            ApiError::Api { status: 404, ref message } if message == "product not found"
        ));

        let err = api_error(502, "Bad Gateway");
        assert!(matches!(
            err,
            ApiError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[test]
    fn season_names_are_percent_encoded_in_paths() {
        assert_eq!(urlencoding::encode("Winter 2024"), "Winter%202024");
    }
}
