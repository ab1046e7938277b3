//! Decoded shapes of UniProtKB search responses.
//!
//! Only the fields the feature filter reads are modeled; the rest of the
//! entry JSON is ignored during deserialization.

use serde::Deserialize;

/// JSON body of a `search` or `stream` response.
///
/// A body without a `results` array is a decode failure, not an empty
/// result set.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub results: Vec<UniProtEntry>,
}

/// One UniProtKB entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniProtEntry {
    /// Stable unique identifier for the entry.
    pub primary_accession: String,
    /// Annotated features, in curation order. Absent in the JSON for
    /// entries without annotations.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// An annotated sub-region of an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(default)]
    pub description: String,
    pub location: FeatureLocation,
}

/// 1-based inclusive coordinates of a feature on the sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureLocation {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    pub value: i64,
}

impl Feature {
    /// Residue count covered by the feature (`end - start + 1`).
    ///
    /// Malformed coordinates (`end < start`) yield a non-positive value
    /// rather than an error; the length range test rejects them naturally.
    pub fn length(&self) -> i64 {
        self.location.end.value - self.location.start.value + 1
    }
}
