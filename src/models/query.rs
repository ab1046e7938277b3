//! Construction of server-side search-language queries.

use std::fmt;
use std::str::FromStr;

/// One end of a feature length range: a fixed value or the `*` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    Value(i64),
    Unbounded,
}

impl LengthBound {
    /// Treat this bound as a lower limit.
    pub fn allows_min(&self, length: i64) -> bool {
        match self {
            LengthBound::Unbounded => true,
            LengthBound::Value(min) => length >= *min,
        }
    }

    /// Treat this bound as an upper limit.
    pub fn allows_max(&self, length: i64) -> bool {
        match self {
            LengthBound::Unbounded => true,
            LengthBound::Value(max) => length <= *max,
        }
    }
}

impl fmt::Display for LengthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthBound::Value(v) => write!(f, "{v}"),
            LengthBound::Unbounded => f.write_str("*"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid length bound {0:?}: expected an integer or \"*\"")]
pub struct ParseLengthBoundError(String);

impl FromStr for LengthBound {
    type Err = ParseLengthBoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(LengthBound::Unbounded);
        }
        s.parse()
            .map(LengthBound::Value)
            .map_err(|_| ParseLengthBoundError(s.to_string()))
    }
}

/// Builder for the feature clause of a UniProt query.
///
/// Renders to `(ft_{type}:{description} AND ftlen_{type}:[{min} TO {max}])`,
/// optionally ANDed with an arbitrary extra clause. The length clause is kept
/// even though records are re-filtered client-side from raw coordinates: the
/// server's length semantics and the client recomputation may legitimately
/// diverge, and the server clause prunes the bulk of non-matches cheaply.
#[derive(Debug, Clone)]
pub struct FeatureQuery {
    feature_type: String,
    description: String,
    min_length: LengthBound,
    max_length: LengthBound,
    and_query: Option<String>,
}

impl FeatureQuery {
    /// Start a query for the given feature type, matching any description
    /// and any length until constrained further.
    pub fn new(feature_type: impl Into<String>) -> Self {
        Self {
            feature_type: feature_type.into(),
            description: "*".to_string(),
            min_length: LengthBound::Unbounded,
            max_length: LengthBound::Unbounded,
            and_query: None,
        }
    }

    /// Description literal; `*` matches any description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn min_length(mut self, bound: LengthBound) -> Self {
        self.min_length = bound;
        self
    }

    pub fn max_length(mut self, bound: LengthBound) -> Self {
        self.max_length = bound;
        self
    }

    /// Extra clause ANDed after the feature clause, e.g. `(organism_id:9606)`.
    pub fn and(mut self, clause: impl Into<String>) -> Self {
        self.and_query = Some(clause.into());
        self
    }

    /// Render the query string. Type and description are embedded verbatim;
    /// the caller is responsible for their validity in the query grammar.
    pub fn build(&self) -> String {
        let mut query = format!(
            "(ft_{ft}:{desc} AND ftlen_{ft}:[{min} TO {max}])",
            ft = self.feature_type,
            desc = self.description,
            min = self.min_length,
            max = self.max_length,
        );
        if let Some(clause) = &self.and_query {
            query.push_str(" AND ");
            query.push_str(clause);
        }
        query
    }
}
