//! Mapping between logical facets and the storage fields exiftool addresses.
//!
//! Free-form keywords live in two places for interoperability with older
//! consumers: the XMP `dc:Subject` list and the legacy IPTC `Keywords` list.
//! Everything above the gateway works with a single logical `tags` facet; this
//! module is the only place that knows it fans out to two fields.

use serde::{Deserialize, Serialize};

/// Storage field addressed on the exiftool command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `XMP-dc:Subject`
    Subject,
    /// `IPTC:Keywords`
    Keywords,
    /// `XMP-Iptc4xmpExt:PersonInImage`
    PersonInImage,
}

impl Field {
    /// Fields requested on every read, in request order.
    pub const READ_ORDER: [Self; 3] = [Self::Subject, Self::PersonInImage, Self::Keywords];

    /// Group-qualified tag name used in exiftool arguments.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Subject => "XMP-dc:Subject",
            Self::Keywords => "IPTC:Keywords",
            Self::PersonInImage => "XMP-Iptc4xmpExt:PersonInImage",
        }
    }
}

/// One of the two independent metadata categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    People,
    Tags,
}

impl Facet {
    /// Storage fields backing this facet. Writes touch all of them
    /// identically; reads union them.
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::People => &[Field::PersonInImage],
            Self::Tags => &[Field::Subject, Field::Keywords],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_facet_spans_both_keyword_fields() {
        assert_eq!(Facet::Tags.fields(), &[Field::Subject, Field::Keywords]);
        assert_eq!(Facet::People.fields(), &[Field::PersonInImage]);
    }

    #[test]
    fn test_every_field_belongs_to_exactly_one_facet() {
        for field in Field::READ_ORDER {
            let owners = [Facet::People, Facet::Tags]
                .iter()
                .filter(|facet| facet.fields().contains(&field))
                .count();
            assert_eq!(owners, 1, "{field:?} should map to one facet");
        }
    }
}
