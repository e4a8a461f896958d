//! Marketplace metadata extraction.
//!
//! Given a product URL, this crate classifies the marketplace it belongs to,
//! extracts a product name from the URL shape, probes the rendered page (via
//! a read-through proxy) for images and a price, synthesizes a marketing
//! description, and assembles everything into a [`ProductDraft`] ready for
//! persistence.
//!
//! Extraction never fails hard: network errors, proxy errors, and selector
//! misses all degrade to sentinel values (placeholder images, price `0.0`).
//! The only error surfaced to callers is an invalid input URL.

pub mod describe;
pub mod error;
pub mod images;
pub mod marketplace;
pub mod name;
pub mod price;
pub mod proxy;
pub mod record;
pub mod selectors;
pub mod testing;

pub use describe::{synthesize, ProductTier, ProductType};
pub use error::{ExtractError, FetchError};
pub use images::{extract_images, placeholder_images, MAX_IMAGES};
pub use marketplace::{host_of, Currency, Marketplace};
pub use name::extract_name;
pub use price::extract_price;
pub use proxy::{AllOriginsFetcher, FetchConfig, PageFetcher};
pub use record::{build_draft, is_valid_product_url, ProductDraft};
