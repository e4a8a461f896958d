//! Review and classification workflow for curated products.
//!
//! A [`Board`] owns the operator's in-memory record and season collections
//! and pushes every mutation through the curation API, falling back to
//! local-only state (with a visible warning) when the server is unreachable
//! during a status change.

pub mod board;
pub mod error;
pub mod scope;

pub use board::{Board, PersistOutcome};
pub use error::BoardError;
pub use scope::StatusScope;
