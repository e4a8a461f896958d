//! The review board: application state plus the workflow operations.
//!
//! All products and seasons live on one [`Board`] value with an explicit
//! lifecycle (`connect` → operations → `logout`); there is no global state.
//! Methods take `&mut self`, so workflow mutations cannot interleave and a
//! multi-step update (season reassignment touches two collections) is a
//! single logical unit.
//!
//! Season member lists hold record *snapshots*, not references: editing a
//! product after assignment does not rewrite the copy already filed under a
//! season. That duplication is deliberate and documented.

use chrono::Utc;
use indexmap::IndexMap;

use curation_client::{
    CurationApi, CurrentUser, LocalSave, ProductId, ProductPatch, ProductRecord, ProductStatus,
    SavedImages,
};
use product_extractor::ProductDraft;

use crate::error::BoardError;
use crate::scope::StatusScope;

/// How a status change was persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The API accepted the change.
    Synced,
    /// The API call failed; the change is local-only until the next sync.
    LocalOnly { warning: String },
}

impl PersistOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// In-memory collection of records and seasons, backed by the curation API.
pub struct Board<A: CurationApi> {
    api: A,
    user: Option<CurrentUser>,
    products: Vec<ProductRecord>,
    seasons: IndexMap<String, Vec<ProductRecord>>,
}

impl<A: CurationApi> Board<A> {
    /// Probe the session and load the operator's data.
    ///
    /// No logged-in user means guest mode: an empty board, not an error.
    pub async fn connect(api: A) -> Result<Self, BoardError> {
        let user = api.current_user().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "auth probe failed, continuing as guest");
            None
        });

        let mut board = Self {
            api,
            user,
            products: Vec::new(),
            seasons: IndexMap::new(),
        };

        if board.user.is_some() {
            board.reload().await?;
        } else {
            tracing::info!("guest mode, starting with an empty board");
        }

        Ok(board)
    }

    /// End the session and drop all local state.
    pub async fn logout(&mut self) -> Result<(), BoardError> {
        self.api.logout().await?;
        self.user = None;
        self.products.clear();
        self.seasons.clear();
        Ok(())
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn is_guest(&self) -> bool {
        self.user.is_none()
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn seasons(&self) -> &IndexMap<String, Vec<ProductRecord>> {
        &self.seasons
    }

    pub fn record(&self, id: ProductId) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Refetch products and seasons from the API.
    ///
    /// Season member lists are reseeded from each record's `season` field so
    /// the two collections start consistent.
    pub async fn reload(&mut self) -> Result<(), BoardError> {
        self.products = self.api.list_products().await?;
        let names = self.api.list_seasons().await?;

        let mut seasons: IndexMap<String, Vec<ProductRecord>> =
            names.into_iter().map(|n| (n, Vec::new())).collect();
        for record in &self.products {
            if let Some(name) = &record.season {
                seasons.entry(name.clone()).or_default().push(record.clone());
            }
        }
        self.seasons = seasons;

        tracing::info!(
            products = self.products.len(),
            seasons = self.seasons.len(),
            "board reloaded"
        );
        Ok(())
    }

    /// Find a record's index, reloading once from the API when it is missing.
    async fn locate(&mut self, id: ProductId) -> Result<usize, BoardError> {
        if let Some(idx) = self.products.iter().position(|p| p.id == id) {
            return Ok(idx);
        }

        tracing::warn!(product_id = %id, "record missing locally, reloading from API");
        self.reload().await?;

        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or(BoardError::NotFound { id })
    }

    /// Validate and persist a draft, then reload so the server-assigned
    /// record is in the collection.
    pub async fn add_product(&mut self, draft: &ProductDraft) -> Result<ProductId, BoardError> {
        if draft.name.trim().is_empty() {
            return Err(BoardError::MissingField { field: "name" });
        }
        if draft.description.trim().is_empty() {
            return Err(BoardError::MissingField { field: "description" });
        }
        if draft.url.trim().is_empty() {
            return Err(BoardError::MissingField { field: "url" });
        }

        let id = self.api.create_product(draft).await?;
        self.reload().await?;
        Ok(id)
    }

    /// Set a record's status, keeping the local copy authoritative.
    ///
    /// The local record always reflects the requested status; when the API
    /// call fails the change is applied anyway and reported as
    /// [`PersistOutcome::LocalOnly`]. Re-applying the current status is a
    /// no-op observable-wise.
    pub async fn set_status(
        &mut self,
        id: ProductId,
        status: ProductStatus,
    ) -> Result<PersistOutcome, BoardError> {
        let idx = self.locate(id).await?;

        let outcome = match self
            .api
            .update_product(id, &ProductPatch::status(status))
            .await
        {
            Ok(()) => PersistOutcome::Synced,
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "status persisted locally only");
                PersistOutcome::LocalOnly {
                    warning: format!("saved locally only, server unreachable: {e}"),
                }
            }
        };

        self.products[idx].status = status;
        Ok(outcome)
    }

    /// Flip between approved and pending, the review screen's primary action.
    pub async fn toggle_approval(&mut self, id: ProductId) -> Result<PersistOutcome, BoardError> {
        let idx = self.locate(id).await?;
        let next = if self.products[idx].status == ProductStatus::Approved {
            ProductStatus::Pending
        } else {
            ProductStatus::Approved
        };
        self.set_status(id, next).await
    }

    /// Mark a record disapproved.
    pub async fn reject(&mut self, id: ProductId) -> Result<PersistOutcome, BoardError> {
        self.set_status(id, ProductStatus::Disapproved).await
    }

    /// Bring a disapproved record back to pending review.
    pub async fn restore(&mut self, id: ProductId) -> Result<PersistOutcome, BoardError> {
        self.set_status(id, ProductStatus::Pending).await
    }

    /// Records matching a scope, in collection order.
    pub fn filter(&self, scope: StatusScope) -> Vec<&ProductRecord> {
        self.products
            .iter()
            .filter(|p| scope.matches(p.status))
            .collect()
    }

    /// Assign a record to a season, or clear its season with `None`/empty.
    ///
    /// Persists first, then updates both collections in one step: the
    /// snapshot leaves the previous season's member list, the record's
    /// `season` field is rewritten, and (for a real name) a fresh snapshot
    /// joins the target season, which is created on first use.
    pub async fn assign_season(
        &mut self,
        id: ProductId,
        season: Option<&str>,
    ) -> Result<(), BoardError> {
        let idx = self.locate(id).await?;
        let target = season
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        self.api
            .update_product(id, &ProductPatch::season(target.clone()))
            .await?;

        let record = &mut self.products[idx];
        if let Some(old) = record.season.take() {
            if let Some(members) = self.seasons.get_mut(&old) {
                members.retain(|p| p.id != id);
            }
        }
        record.season = target.clone();

        if let Some(name) = target {
            let snapshot = record.clone();
            let members = self.seasons.entry(name.clone()).or_default();
            if !members.iter().any(|p| p.id == id) {
                members.push(snapshot);
            }
            tracing::info!(product_id = %id, season = %name, "assigned record to season");
        } else {
            tracing::info!(product_id = %id, "cleared record's season");
        }

        Ok(())
    }

    /// Drop a record's snapshot from one season's member list.
    ///
    /// When the record still points at that season this is a full clear
    /// (field and membership stay consistent); otherwise only the stale
    /// snapshot is removed.
    pub async fn remove_from_season(
        &mut self,
        id: ProductId,
        season: &str,
    ) -> Result<(), BoardError> {
        if self.record(id).is_some_and(|r| r.season.as_deref() == Some(season)) {
            return self.assign_season(id, None).await;
        }
        if let Some(members) = self.seasons.get_mut(season) {
            members.retain(|p| p.id != id);
        }
        Ok(())
    }

    /// Create an empty season.
    pub async fn create_season(&mut self, name: &str) -> Result<(), BoardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::MissingField { field: "season name" });
        }
        if self.seasons.contains_key(name) {
            return Err(BoardError::DuplicateSeason {
                name: name.to_string(),
            });
        }

        self.api.create_season(name).await?;
        self.seasons.insert(name.to_string(), Vec::new());
        tracing::info!(season = %name, "created season");
        Ok(())
    }

    /// Rename a season, cascading to every referencing record and snapshot.
    pub async fn rename_season(&mut self, name: &str, new_name: &str) -> Result<(), BoardError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(BoardError::MissingField { field: "season name" });
        }
        if new_name == name {
            return Ok(());
        }
        if self.seasons.contains_key(new_name) {
            return Err(BoardError::DuplicateSeason {
                name: new_name.to_string(),
            });
        }
        if !self.seasons.contains_key(name) {
            self.reload().await?;
            if !self.seasons.contains_key(name) {
                return Err(BoardError::SeasonNotFound {
                    name: name.to_string(),
                });
            }
        }

        self.api.rename_season(name, new_name).await?;

        let mut members = self.seasons.shift_remove(name).unwrap_or_default();
        for snapshot in &mut members {
            snapshot.season = Some(new_name.to_string());
        }
        self.seasons.insert(new_name.to_string(), members);

        for record in &mut self.products {
            if record.season.as_deref() == Some(name) {
                record.season = Some(new_name.to_string());
            }
        }

        tracing::info!(from = %name, to = %new_name, "renamed season");
        Ok(())
    }

    /// Delete a season, clearing the `season` field on referencing records.
    ///
    /// Never deletes products.
    pub async fn delete_season(&mut self, name: &str) -> Result<(), BoardError> {
        if !self.seasons.contains_key(name) {
            self.reload().await?;
            if !self.seasons.contains_key(name) {
                return Err(BoardError::SeasonNotFound {
                    name: name.to_string(),
                });
            }
        }

        self.api.delete_season(name).await?;
        self.seasons.shift_remove(name);
        for record in &mut self.products {
            if record.season.as_deref() == Some(name) {
                record.season = None;
            }
        }

        tracing::info!(season = %name, "deleted season");
        Ok(())
    }

    /// Delete one record, sweeping it out of every season member list.
    pub async fn delete_product(&mut self, id: ProductId) -> Result<(), BoardError> {
        let idx = self.locate(id).await?;

        self.api.delete_product(id).await?;
        self.products.remove(idx);
        for members in self.seasons.values_mut() {
            members.retain(|p| p.id != id);
        }

        tracing::info!(product_id = %id, "deleted product");
        Ok(())
    }

    /// Delete every record unconditionally. Season names survive; their
    /// member lists are emptied along with the records they mirrored.
    pub async fn delete_all(&mut self) -> Result<(), BoardError> {
        self.api.delete_all_products().await?;
        self.products.clear();
        for members in self.seasons.values_mut() {
            members.clear();
        }

        tracing::info!("deleted all products");
        Ok(())
    }

    /// Archive a record's images server-side and note the result on the
    /// record.
    pub async fn archive_images(&mut self, id: ProductId) -> Result<SavedImages, BoardError> {
        let idx = self.locate(id).await?;

        let saved = self.api.save_images_locally(&self.products[idx]).await?;
        self.products[idx].local_save = Some(LocalSave {
            folder_path: saved.folder_path.clone(),
            saved_count: saved.saved_count,
            saved_at: Some(Utc::now()),
        });

        tracing::info!(product_id = %id, count = saved.saved_count, "archived product images");
        Ok(saved)
    }
}
