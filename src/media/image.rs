//! Image codec: file on disk to base64 text for inline request payloads.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// MIME type advertised in the data URI.
///
/// Every upload is labelled JPEG; the vision endpoint sniffs the real format.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// A base64-encoded image, alive for the duration of one analysis call.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data: String,
}

impl EncodedImage {
    /// Encode raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
        }
    }

    /// The base64 text (standard alphabet, padded).
    pub fn as_base64(&self) -> &str {
        &self.data
    }

    /// `data:image/jpeg;base64,...` for an `image_url` content part.
    pub fn data_uri(&self) -> String {
        format!("data:{IMAGE_MIME_TYPE};base64,{}", self.data)
    }
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("base64_len", &self.data.len())
            .finish()
    }
}

/// Read `path` fully and base64-encode it.
///
/// # Errors
///
/// Any I/O error opening or reading the file.
pub async fn encode_image(path: &Path) -> std::io::Result<EncodedImage> {
    let bytes = tokio::fs::read(path).await?;
    Ok(EncodedImage::from_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn encodes_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpg");
        std::fs::write(&path, b"hello").unwrap();

        let encoded = encode_image(&path).await.unwrap();
        assert_eq!(encoded.as_base64(), "aGVsbG8=");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_image(&dir.path().join("absent.jpg"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn data_uri_is_labelled_jpeg() {
        let encoded = EncodedImage::from_bytes(&[0xff, 0xd8, 0xff]);
        assert_eq!(encoded.data_uri(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn debug_does_not_dump_payload() {
        let encoded = EncodedImage::from_bytes(&[7u8; 300]);
        let printed = format!("{encoded:?}");
        assert!(printed.contains("base64_len"));
        assert!(!printed.contains(encoded.as_base64()));
    }
}
