//! Canonical per-file people/tags representation
//!
//! A [`NormalizedMetadata`] is built fresh from every read and never edited
//! afterwards; the file, through the gateway, stays the single source of
//! truth. Values keep their original case and collapse only on exact
//! equality. Sets are ordered, so iteration is the sorted presentation
//! order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gateway::{Facet, GatewayError, MetadataGateway, RawMetadataRecord};

/// People and tags of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    file: PathBuf,
    people: BTreeSet<String>,
    tags: BTreeSet<String>,
}

impl NormalizedMetadata {
    /// Build from already-logical values. Duplicates collapse.
    pub fn new<P, T>(file: impl Into<PathBuf>, people: P, tags: T) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            file: file.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            people: people.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Tags in ascending order
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// People in ascending order
    #[must_use]
    pub const fn people(&self) -> &BTreeSet<String> {
        &self.people
    }

    #[must_use]
    pub const fn facet(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::People => &self.people,
            Facet::Tags => &self.tags,
        }
    }

    /// True when the file carries neither people nor tags
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.tags.is_empty()
    }
}

/// Collapse a raw record into the canonical representation.
///
/// Absent fields contribute nothing; bare values and lists are flattened;
/// the facet's storage fields are unioned.
#[must_use]
pub fn normalize(file: impl Into<PathBuf>, mut raw: RawMetadataRecord) -> NormalizedMetadata {
    let mut collect = |facet: Facet| -> BTreeSet<String> {
        facet
            .fields()
            .iter()
            .filter_map(|field| raw.take_field(*field))
            .flat_map(crate::gateway::RawValue::into_values)
            .collect()
    };
    let people = collect(Facet::People);
    let tags = collect(Facet::Tags);
    NormalizedMetadata {
        file: file.into(),
        tags,
        people,
    }
}

/// Read and normalize the metadata of one file.
///
/// # Errors
/// Returns the gateway's error for this file unchanged.
pub fn read_metadata(
    gateway: &dyn MetadataGateway,
    file: &Path,
) -> Result<NormalizedMetadata, GatewayError> {
    let raw = gateway.read(file)?;
    let meta = normalize(file, raw);
    debug!(
        file = %file.display(),
        people = meta.people.len(),
        tags = meta.tags.len(),
        "read metadata"
    );
    Ok(meta)
}
