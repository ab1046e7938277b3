//! Client-side feature predicate: type, fuzzy description, and length range.
//!
//! The server query grammar can restrict on feature type and a length
//! clause, but its description matching does not line up with how curators
//! vary punctuation across entries. Each decoded record is therefore
//! re-checked here: the description against a tolerant pattern, and the
//! length recomputed from the raw feature coordinates.

use regex::{Regex, RegexBuilder};

use crate::models::{LengthBound, UniProtEntry};

/// Sentinel accepted for an unconstrained description.
pub const WILDCARD: &str = "*";

/// Compiled description constraint.
#[derive(Debug, Clone)]
pub enum DescriptionPattern {
    /// Matches any description text.
    Any,
    /// Case-insensitive pattern, matched anywhere in the description.
    Pattern(Regex),
}

impl DescriptionPattern {
    /// Compile a description literal into a tolerant pattern.
    ///
    /// `*` matches anything. Otherwise the text is matched
    /// case-insensitively, with each whitespace run standing for one or
    /// more of `-`, space, `/`, `(` or `)`, so that "substrate binding"
    /// also finds "Substrate-binding" and "substrate/binding". The
    /// separator requires at least one character: "substratebinding" does
    /// not match.
    pub fn compile(description: &str) -> Result<Self, regex::Error> {
        if description == WILDCARD {
            return Ok(DescriptionPattern::Any);
        }

        let pattern = description
            .split_whitespace()
            .map(|segment| regex::escape(segment))
            .collect::<Vec<_>>()
            .join("[- /()]+");
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(DescriptionPattern::Pattern(regex))
    }

    /// Whether the given description text satisfies the constraint.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            DescriptionPattern::Any => true,
            DescriptionPattern::Pattern(regex) => regex.is_match(text),
        }
    }
}

/// Record-level predicate over an entry's feature table.
#[derive(Debug, Clone)]
pub struct FeatureFilter {
    feature_type: String,
    description: DescriptionPattern,
    min_length: LengthBound,
    max_length: LengthBound,
}

impl FeatureFilter {
    pub fn new(
        feature_type: &str,
        description: DescriptionPattern,
        min_length: LengthBound,
        max_length: LengthBound,
    ) -> Self {
        Self {
            feature_type: feature_type.to_lowercase(),
            description,
            min_length,
            max_length,
        }
    }

    /// True when at least one feature satisfies type, description and
    /// length range at the same time.
    ///
    /// Features are scanned in order and the first satisfying one decides;
    /// a feature passing type and description but failing the length test
    /// does not stop the scan. Pure: no I/O, the record is not mutated.
    pub fn matches(&self, entry: &UniProtEntry) -> bool {
        entry.features.iter().any(|feature| {
            feature.feature_type.to_lowercase() == self.feature_type
                && self.description.matches(&feature.description)
                && self.min_length.allows_min(feature.length())
                && self.max_length.allows_max(feature.length())
        })
    }
}
