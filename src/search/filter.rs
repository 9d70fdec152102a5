//! Case-insensitive ANY/ALL predicates over the people and tags facets
//!
//! Stored values are lower-cased only for comparison; the metadata itself is
//! never altered. Every criterion that is supplied must hold; an empty
//! criterion imposes no constraint.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::gateway::Facet;
use crate::metadata::NormalizedMetadata;

/// How the values of one facet are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Match ANY of the values (intersection is non-empty)
    #[default]
    Any,
    /// Match ALL of the values (subset)
    All,
}

/// Criteria a file's metadata must satisfy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub people_any: Vec<String>,
    #[serde(default)]
    pub people_all: Vec<String>,
    #[serde(default)]
    pub tags_any: Vec<String>,
    #[serde(default)]
    pub tags_all: Vec<String>,
}

impl FilterSpec {
    /// Build a spec that applies one mode to both facets
    #[must_use]
    pub fn with_mode(mode: SearchMode, people: Vec<String>, tags: Vec<String>) -> Self {
        match mode {
            SearchMode::Any => Self {
                people_any: people,
                tags_any: tags,
                ..Self::default()
            },
            SearchMode::All => Self {
                people_all: people,
                tags_all: tags,
                ..Self::default()
            },
        }
    }

    /// True if no criterion was supplied, so every file matches
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.people_any.is_empty()
            && self.people_all.is_empty()
            && self.tags_any.is_empty()
            && self.tags_all.is_empty()
    }

    /// Whether `meta` satisfies every supplied criterion
    #[must_use]
    pub fn matches(&self, meta: &NormalizedMetadata) -> bool {
        let people = folded(meta.facet(Facet::People));
        let tags = folded(meta.facet(Facet::Tags));

        satisfies(&people, &self.people_any, SearchMode::Any)
            && satisfies(&people, &self.people_all, SearchMode::All)
            && satisfies(&tags, &self.tags_any, SearchMode::Any)
            && satisfies(&tags, &self.tags_all, SearchMode::All)
    }
}

/// Whether `meta` satisfies `spec`.
#[must_use]
pub fn matches(meta: &NormalizedMetadata, spec: &FilterSpec) -> bool {
    spec.matches(meta)
}

fn folded<'a>(values: impl IntoIterator<Item = &'a String>) -> HashSet<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

fn satisfies(have: &HashSet<String>, wanted: &[String], mode: SearchMode) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let mut wanted = wanted.iter().map(|w| w.to_lowercase());
    match mode {
        SearchMode::Any => wanted.any(|w| have.contains(&w)),
        SearchMode::All => wanted.all(|w| have.contains(&w)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn alice_and_bob() -> NormalizedMetadata {
        NormalizedMetadata::new("a.jpg", ["Alice", "Bob"], ["Beach", "sunset"])
    }

    #[test]
    fn test_people_any_is_case_insensitive() {
        let spec = FilterSpec::with_mode(SearchMode::Any, v(&["alice"]), vec![]);
        assert!(spec.matches(&alice_and_bob()));
    }

    #[test]
    fn test_people_all_requires_subset() {
        let spec = FilterSpec::with_mode(SearchMode::All, v(&["alice", "carol"]), vec![]);
        assert!(!spec.matches(&alice_and_bob()));

        let spec = FilterSpec::with_mode(SearchMode::All, v(&["ALICE", "bob"]), vec![]);
        assert!(spec.matches(&alice_and_bob()));
    }

    #[test]
    fn test_any_with_no_overlap_fails() {
        let spec = FilterSpec::with_mode(SearchMode::Any, vec![], v(&["mountain", "lake"]));
        assert!(!spec.matches(&alice_and_bob()));
    }

    #[test]
    fn test_both_facets_must_hold() {
        let spec = FilterSpec::with_mode(SearchMode::Any, v(&["bob"]), v(&["snow"]));
        assert!(!spec.matches(&alice_and_bob()));

        let spec = FilterSpec::with_mode(SearchMode::Any, v(&["bob"]), v(&["BEACH", "snow"]));
        assert!(spec.matches(&alice_and_bob()));
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let spec = FilterSpec::default();
        assert!(spec.is_unconstrained());
        assert!(spec.matches(&alice_and_bob()));
        assert!(spec.matches(&NormalizedMetadata::new(
            "empty.jpg",
            Vec::<String>::new(),
            Vec::<String>::new()
        )));
    }

    #[test]
    fn test_criteria_against_empty_metadata() {
        let empty = NormalizedMetadata::new("e.jpg", Vec::<String>::new(), Vec::<String>::new());
        assert!(!FilterSpec::with_mode(SearchMode::Any, vec![], v(&["x"])).matches(&empty));
        assert!(!FilterSpec::with_mode(SearchMode::All, vec![], v(&["x"])).matches(&empty));
    }

    #[test]
    fn test_mixed_modes_combine_with_and() {
        let spec = FilterSpec {
            people_any: v(&["carol", "bob"]),
            tags_all: v(&["beach", "SUNSET"]),
            ..FilterSpec::default()
        };
        assert!(matches(&alice_and_bob(), &spec));
    }

    #[test]
    fn test_matching_does_not_alter_stored_case() {
        let meta = alice_and_bob();
        let spec = FilterSpec::with_mode(SearchMode::Any, v(&["alice"]), vec![]);
        assert!(spec.matches(&meta));
        assert!(meta.people().contains("Alice"));
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: SearchMode = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(mode, SearchMode::All);
        assert_eq!(SearchMode::default(), SearchMode::Any);
    }
}
