//! Core data structures: query construction and decoded response shapes.

mod entry;
mod query;

pub use entry::{Feature, FeatureLocation, Position, SearchBody, UniProtEntry};
pub use query::{FeatureQuery, LengthBound, ParseLengthBoundError};
