//! Typed errors for the review workflow.

use curation_client::{ApiError, ProductId};
use thiserror::Error;

/// Errors surfaced by [`crate::Board`] operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The record is unknown even after a reload from the API.
    #[error("product {id} not found; reload and try again")]
    NotFound { id: ProductId },

    /// The season is unknown even after a reload from the API.
    #[error("season {name:?} not found")]
    SeasonNotFound { name: String },

    /// A season with this name already exists.
    #[error("season {name:?} already exists")]
    DuplicateSeason { name: String },

    /// A required submission field is empty.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// Persistence API failure (for operations without a local-only fallback).
    #[error(transparent)]
    Api(#[from] ApiError),
}
