//! Structured query value produced by the parser.

use serde::Serialize;

/// A compiled search query.
///
/// Built fresh by every parse and compared by value. `highlight_terms` is
/// always derived from the other lists, so the value cannot be constructed
/// with an inconsistent highlight list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    and_terms: Vec<String>,
    or_groups: Vec<Vec<String>>,
    phrases: Vec<String>,
    exclude_terms: Vec<String>,
    highlight_terms: Vec<String>,
}

impl StructuredQuery {
    /// Assembles a query from its parts.
    ///
    /// Highlight terms are `and_terms`, then `phrases`, then every OR group
    /// term in order. Exclusions never contribute and nothing is deduplicated.
    pub fn new(
        and_terms: Vec<String>,
        or_groups: Vec<Vec<String>>,
        phrases: Vec<String>,
        exclude_terms: Vec<String>,
    ) -> Self {
        let highlight_terms = and_terms
            .iter()
            .chain(phrases.iter())
            .chain(or_groups.iter().flatten())
            .cloned()
            .collect();

        Self {
            and_terms,
            or_groups,
            phrases,
            exclude_terms,
            highlight_terms,
        }
    }

    pub fn and_terms(&self) -> &[String] {
        &self.and_terms
    }

    pub fn or_groups(&self) -> &[Vec<String>] {
        &self.or_groups
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn exclude_terms(&self) -> &[String] {
        &self.exclude_terms
    }

    /// Terms the UI should emphasize in results. Not used for matching.
    pub fn highlight_terms(&self) -> &[String] {
        &self.highlight_terms
    }

    /// Returns true if the query carries at least one positive constraint.
    ///
    /// Exclusion-only queries have none and therefore match nothing.
    pub fn has_positive_terms(&self) -> bool {
        !self.and_terms.is_empty() || !self.or_groups.is_empty() || !self.phrases.is_empty()
    }

    /// Returns true if every list is empty.
    pub fn is_empty(&self) -> bool {
        !self.has_positive_terms() && self.exclude_terms.is_empty()
    }
}
