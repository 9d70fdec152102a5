//! Metadata gateway - the sole boundary to the external metadata tool
//!
//! Components above this module never build command lines or look at the
//! tool's output. They talk to a [`MetadataGateway`] handle that is passed in
//! explicitly, which lets tests substitute an in-memory implementation.
//!
//! # Primitives
//!
//! - **read**: the three targeted fields as a [`RawMetadataRecord`]
//! - **additive**: append values to a facet's fields, keeping existing ones
//! - **subtractive**: remove values from a facet's fields if present
//! - **assignment**: replace a facet's fields with an empty value
//! - **thumbnail**: raw bytes of the embedded preview image

pub mod args;
pub mod error;
pub mod exiftool;
pub mod fields;
pub mod raw;

pub use error::{GatewayError, Operation};
pub use exiftool::ExifTool;
pub use fields::{Facet, Field};
pub use raw::{RawMetadataRecord, RawValue};

use std::path::Path;

/// Operations the external metadata tool is asked to perform
///
/// Additive and subtractive writes must be idempotent: applying the same
/// request twice leaves the same observable metadata as applying it once.
/// Writes with nothing to do must not touch the file.
pub trait MetadataGateway: Send + Sync {
    /// Read the people and tag fields of `file`.
    ///
    /// # Errors
    /// Returns `GatewayError` if the tool fails, its output cannot be parsed,
    /// or it returns no record.
    fn read(&self, file: &Path) -> Result<RawMetadataRecord, GatewayError>;

    /// Append `people` and `tags` to the corresponding fields.
    ///
    /// # Errors
    /// Returns `GatewayError` if the tool fails.
    fn apply_additive(
        &self,
        file: &Path,
        people: &[String],
        tags: &[String],
    ) -> Result<(), GatewayError>;

    /// Remove `people` and `tags` from the corresponding fields. Absent
    /// values are not an error.
    ///
    /// # Errors
    /// Returns `GatewayError` if the tool fails.
    fn apply_subtractive(
        &self,
        file: &Path,
        people: &[String],
        tags: &[String],
    ) -> Result<(), GatewayError>;

    /// Empty the selected facets. No request is issued when neither flag is set.
    ///
    /// # Errors
    /// Returns `GatewayError` if the tool fails.
    fn apply_assignment(
        &self,
        file: &Path,
        clear_people: bool,
        clear_tags: bool,
    ) -> Result<(), GatewayError>;

    /// Bytes of the embedded preview image.
    ///
    /// # Errors
    /// Returns `GatewayError::EmptyThumbnail` when the file has none, or
    /// another `GatewayError` if the tool fails.
    fn extract_embedded_thumbnail(&self, file: &Path) -> Result<Vec<u8>, GatewayError>;
}
