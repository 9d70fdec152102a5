//! Argument vectors for exiftool requests.
//!
//! Builders are pure so the exact wire contract can be tested without the
//! external tool installed.

use std::ffi::OsString;
use std::path::{Component, Path};

use super::fields::{Facet, Field};

/// Options prepended to every write: overwrite in place without leaving a
/// `_original` backup, and store legacy IPTC text as UTF-8.
pub const WRITE_HEADER: [&str; 3] = ["-overwrite_original", "-charset", "iptc=utf8"];

/// Options prepended to every read: decode legacy IPTC text as UTF-8, the
/// way writes store it, and quote every JSON value so items that look
/// numeric or boolean keep their exact text.
pub const READ_HEADER: [&str; 5] = [
    "-charset",
    "iptc=utf8",
    "-api",
    "StructFormat=JSONQ",
    "-json",
];

/// Tag holding the embedded preview image
pub const THUMBNAIL_TAG: &str = "ThumbnailImage";

/// Render the file operand. A relative path starting with `-` would be taken
/// for an option, so it is anchored to the current directory.
#[must_use]
pub fn file_arg(file: &Path) -> OsString {
    let starts_with_dash = matches!(
        file.components().next(),
        Some(Component::Normal(first)) if first.to_string_lossy().starts_with('-')
    );
    if starts_with_dash {
        Path::new(".").join(file).into_os_string()
    } else {
        file.as_os_str().to_os_string()
    }
}

/// `exiftool <READ_HEADER> -XMP-dc:Subject -XMP-Iptc4xmpExt:PersonInImage -IPTC:Keywords FILE`
#[must_use]
pub fn read_args(file: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = READ_HEADER.iter().map(|s| OsString::from(*s)).collect();
    args.extend(
        Field::READ_ORDER
            .iter()
            .map(|f| OsString::from(format!("-{}", f.tag()))),
    );
    args.push(file_arg(file));
    args
}

/// `exiftool -b -ThumbnailImage FILE`
#[must_use]
pub fn thumbnail_args(file: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-b"),
        OsString::from(format!("-{THUMBNAIL_TAG}")),
        file_arg(file),
    ]
}

fn write_args(file: &Path, assignments: Vec<String>) -> Option<Vec<OsString>> {
    if assignments.is_empty() {
        return None;
    }
    let mut args: Vec<OsString> = WRITE_HEADER.iter().map(|s| OsString::from(*s)).collect();
    args.extend(assignments.into_iter().map(OsString::from));
    args.push(file_arg(file));
    Some(args)
}

fn per_value(facet: Facet, values: &[String], ops: &[&str], out: &mut Vec<String>) {
    for value in values {
        for field in facet.fields() {
            for op in ops {
                out.push(format!("-{}{op}{value}", field.tag()));
            }
        }
    }
}

/// Append each value to its facet's fields.
///
/// Each append is preceded by a removal of the same value, which is how
/// exiftool appends to a list without duplicating an item already present.
/// Returns `None` when there is nothing to write.
#[must_use]
pub fn additive_args(file: &Path, people: &[String], tags: &[String]) -> Option<Vec<OsString>> {
    let mut out = Vec::new();
    per_value(Facet::Tags, tags, &["-=", "+="], &mut out);
    per_value(Facet::People, people, &["-=", "+="], &mut out);
    write_args(file, out)
}

/// Remove each value from its facet's fields. Returns `None` when there is
/// nothing to write.
#[must_use]
pub fn subtractive_args(
    file: &Path,
    people: &[String],
    tags: &[String],
) -> Option<Vec<OsString>> {
    let mut out = Vec::new();
    per_value(Facet::Tags, tags, &["-="], &mut out);
    per_value(Facet::People, people, &["-="], &mut out);
    write_args(file, out)
}

/// Set the selected facets' fields to empty. Returns `None` when neither
/// facet is selected.
#[must_use]
pub fn assignment_args(file: &Path, clear_people: bool, clear_tags: bool) -> Option<Vec<OsString>> {
    let mut out = Vec::new();
    let selected = [(Facet::Tags, clear_tags), (Facet::People, clear_people)];
    for (facet, _) in selected.iter().filter(|(_, on)| *on) {
        out.extend(facet.fields().iter().map(|f| format!("-{}=", f.tag())));
    }
    write_args(file, out)
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod args_tests;
