//! # uniprot-feature-search
//!
//! Async client for the UniProtKB REST search API, built for queries the
//! server cannot fully express on its own: feature type, a tolerant
//! description match, and a length range satisfied by one and the same
//! feature.
//!
//! A search runs in two stages. The server is given a query restricting on
//! feature type and a length clause; the matching entries are then paged
//! through by following `Link: <...>; rel="next"` response headers, and each
//! decoded record is re-checked client-side by [`FeatureFilter`], which
//! recomputes the feature length from raw coordinates and matches the
//! description against a punctuation-tolerant pattern.
//!
//! ## Architecture
//!
//! - [`models`]: query construction and decoded entry shapes
//! - [`client`]: paginated and single-shot retrieval ([`SearchClient`], [`SearchPages`])
//! - [`filter`]: the pure per-record feature predicate
//! - [`utils`]: shared HTTP client and retry-with-backoff transport

pub mod client;
pub mod filter;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use client::{SearchClient, SearchError, SearchPages};
pub use filter::{DescriptionPattern, FeatureFilter};
pub use models::{FeatureQuery, LengthBound, UniProtEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
