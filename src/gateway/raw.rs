//! Literal structured response of a metadata read.
//!
//! exiftool reports a list tag holding one item as a bare value and a list
//! holding several as an array. Unless asked to quote everything, it also
//! prints values that look numeric or boolean without quotes. [`RawValue`]
//! keeps each item as the exact text exiftool printed, so `1.50` stays
//! `1.50` and never goes through a float.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue as JsonText;

use super::error::GatewayError;
use super::fields::Field;

/// Heterogeneous single/multi value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Single(String),
    Multiple(Vec<String>),
}

impl RawValue {
    /// Convenience constructor for a bare string value
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    /// Convenience constructor for a list of strings
    #[must_use]
    pub fn multiple<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multiple(values.into_iter().map(Into::into).collect())
    }

    /// Flatten into the items, in the order exiftool reported them
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        match self {
            Self::Single(v) => vec![v],
            Self::Multiple(vs) => vs,
        }
    }
}

/// Text of one JSON item: strings are unescaped, anything else is taken
/// verbatim as printed.
fn item_text(item: &JsonText) -> Result<String, serde_json::Error> {
    let text = item.get().trim();
    if text.starts_with('"') {
        serde_json::from_str(text)
    } else {
        Ok(text.to_string())
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<JsonText>::deserialize(deserializer)?;
        if raw.get().trim_start().starts_with('[') {
            let items: Vec<Box<JsonText>> =
                serde_json::from_str(raw.get()).map_err(D::Error::custom)?;
            items
                .iter()
                .map(|item| item_text(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Multiple)
                .map_err(D::Error::custom)
        } else {
            item_text(&raw).map(Self::Single).map_err(D::Error::custom)
        }
    }
}

/// The three targeted fields of one file, as read back from exiftool
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMetadataRecord {
    #[serde(rename = "Subject", default)]
    pub subject: Option<RawValue>,
    #[serde(rename = "Keywords", default)]
    pub keywords: Option<RawValue>,
    #[serde(rename = "PersonInImage", default)]
    pub person_in_image: Option<RawValue>,
}

impl RawMetadataRecord {
    /// Take the raw value of a field out of the record
    pub const fn take_field(&mut self, field: Field) -> Option<RawValue> {
        match field {
            Field::Subject => self.subject.take(),
            Field::Keywords => self.keywords.take(),
            Field::PersonInImage => self.person_in_image.take(),
        }
    }

    /// Builder-style setter
    #[must_use]
    pub fn with_field(mut self, field: Field, value: RawValue) -> Self {
        match field {
            Field::Subject => self.subject = Some(value),
            Field::Keywords => self.keywords = Some(value),
            Field::PersonInImage => self.person_in_image = Some(value),
        }
        self
    }

    /// Parse exiftool `-json` output for a single file.
    ///
    /// exiftool always prints an array with one object per file; only the
    /// first object is used.
    ///
    /// # Errors
    /// * `GatewayError::Parse` if the output is not a JSON array of objects.
    /// * `GatewayError::EmptyResult` if the array is empty.
    pub fn from_json(file: &Path, output: &str) -> Result<Self, GatewayError> {
        let records: Vec<Self> =
            serde_json::from_str(output).map_err(|e| GatewayError::Parse {
                file: file.to_path_buf(),
                reason: e.to_string(),
            })?;
        records
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::EmptyResult {
                file: file.to_path_buf(),
            })
    }
}
