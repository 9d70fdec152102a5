//! Embedded thumbnail extraction
//!
//! The preview bytes are written to a temporary file whose lifetime is tied
//! to the [`Thumbnail`] handle: it is deleted when the handle is dropped, on
//! success and error paths alike.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::gateway::{GatewayError, MetadataGateway};

/// Errors from extracting a thumbnail to disk
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Failed to store thumbnail: {0}")]
    Io(#[from] io::Error),
}

impl ThumbnailError {
    /// True when the image simply has no embedded thumbnail
    #[must_use]
    pub fn is_empty_thumbnail(&self) -> bool {
        matches!(self, Self::Gateway(e) if e.is_empty_thumbnail())
    }
}

/// Temporary file holding an extracted thumbnail
#[derive(Debug)]
pub struct Thumbnail {
    file: NamedTempFile,
    len: usize,
}

impl Thumbnail {
    /// Write `bytes` to a fresh temporary `.jpg` file.
    ///
    /// # Errors
    /// Returns `io::Error` if the temporary file cannot be created or written.
    pub fn from_bytes(bytes: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("imgmeta-thumb-")
            .suffix(".jpg")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            file,
            len: bytes.len(),
        })
    }

    /// Location of the temporary file, valid while the handle lives
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Size in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the bytes back
    ///
    /// # Errors
    /// Returns `io::Error` if the temporary file cannot be read.
    pub fn bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(self.file.path())
    }

    /// Copy the thumbnail to `dest`. The temporary file is kept until drop.
    ///
    /// # Errors
    /// Returns `io::Error` if the copy fails.
    pub fn save_to(&self, dest: &Path) -> io::Result<u64> {
        fs::copy(self.file.path(), dest)
    }

    /// Stream the thumbnail into `out`
    ///
    /// # Errors
    /// Returns `io::Error` if reading or writing fails.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        let mut src = fs::File::open(self.file.path())?;
        io::copy(&mut src, out)
    }
}

/// Extract the embedded preview of `file` into a temporary file.
///
/// # Errors
/// Returns `ThumbnailError::Gateway` wrapping `GatewayError::EmptyThumbnail`
/// when the file has no preview, another gateway error if the tool fails, or
/// `ThumbnailError::Io` if the temporary file cannot be written.
pub fn extract_thumbnail(
    gateway: &dyn MetadataGateway,
    file: &Path,
) -> Result<Thumbnail, ThumbnailError> {
    let bytes = gateway.extract_embedded_thumbnail(file)?;
    let thumb = Thumbnail::from_bytes(&bytes)?;
    debug!(
        file = %file.display(),
        temp = %thumb.path().display(),
        bytes = thumb.len(),
        "extracted thumbnail"
    );
    Ok(thumb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGateway;
    use tempfile::TempDir;

    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn gateway_with_thumb() -> FakeGateway {
        let gateway = FakeGateway::new();
        gateway.insert("a.jpg");
        gateway.set_thumbnail("a.jpg", JPEG_MAGIC);
        gateway
    }

    #[test]
    fn test_extract_writes_temp_file() {
        let gateway = gateway_with_thumb();
        let thumb = extract_thumbnail(&gateway, Path::new("a.jpg")).unwrap();
        assert!(thumb.path().exists());
        assert_eq!(thumb.path().extension().unwrap(), "jpg");
        assert_eq!(thumb.bytes().unwrap(), JPEG_MAGIC);
        assert_eq!(thumb.len(), JPEG_MAGIC.len());
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let gateway = gateway_with_thumb();
        let thumb = extract_thumbnail(&gateway, Path::new("a.jpg")).unwrap();
        let path = thumb.path().to_path_buf();
        drop(thumb);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_thumbnail_is_distinguished() {
        let gateway = FakeGateway::new();
        gateway.insert("plain.png");
        let err = extract_thumbnail(&gateway, Path::new("plain.png")).unwrap_err();
        assert!(err.is_empty_thumbnail());
        assert!(err.to_string().contains("No embedded thumbnail"));
    }

    #[test]
    fn test_tool_failure_is_not_empty_thumbnail() {
        let gateway = gateway_with_thumb();
        gateway.fail_on("a.jpg");
        let err = extract_thumbnail(&gateway, Path::new("a.jpg")).unwrap_err();
        assert!(!err.is_empty_thumbnail());
    }

    #[test]
    fn test_save_and_stream() {
        let gateway = gateway_with_thumb();
        let thumb = extract_thumbnail(&gateway, Path::new("a.jpg")).unwrap();

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.jpg");
        thumb.save_to(&dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), JPEG_MAGIC);

        let mut buf = Vec::new();
        thumb.write_to(&mut buf).unwrap();
        assert_eq!(buf, JPEG_MAGIC);
        assert!(thumb.path().exists());
    }
}
