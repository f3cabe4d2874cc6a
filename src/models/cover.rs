use std::fmt;
use std::sync::Arc;

use image::ImageFormat;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Opaque handle to an image picked from the host's photo library.
///
/// Clones share the same encoded bytes. Equality is by handle id, so two
/// picks of the same photo are still distinct covers.
#[derive(Clone)]
pub struct CoverImage {
    id: Uuid,
    format: Option<ImageFormat>,
    bytes: Arc<[u8]>,
}

impl CoverImage {
    pub fn from_encoded(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let format = image::guess_format(&bytes).ok();
        Self {
            id: Uuid::new_v4(),
            format,
            bytes,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// `None` when the bytes don't carry a recognisable image signature.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

impl PartialEq for CoverImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CoverImage {}

impl fmt::Debug for CoverImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverImage")
            .field("id", &self.id)
            .field("format", &self.format)
            .field("byte_len", &self.bytes.len())
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CoverImageSummary<'a> {
    id: Uuid,
    format: Option<&'a str>,
    byte_len: usize,
}

// Views only carry a summary; the bytes stay with the handle.
impl Serialize for CoverImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CoverImageSummary {
            id: self.id,
            format: self.format.and_then(|format| format.extensions_str().first().copied()),
            byte_len: self.bytes.len(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn detects_png_signature() {
        let cover = CoverImage::from_encoded(PNG_SIGNATURE.to_vec());
        assert_eq!(cover.format(), Some(ImageFormat::Png));
        assert_eq!(cover.byte_len(), PNG_SIGNATURE.len());
    }

    #[test]
    fn unknown_bytes_have_no_format() {
        let cover = CoverImage::from_encoded(b"not an image".to_vec());
        assert_eq!(cover.format(), None);
    }

    #[test]
    fn handles_compare_by_id() {
        let first = CoverImage::from_encoded(PNG_SIGNATURE.to_vec());
        let second = CoverImage::from_encoded(PNG_SIGNATURE.to_vec());
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn serializes_summary_without_bytes() {
        let cover = CoverImage::from_encoded(PNG_SIGNATURE.to_vec());
        let value = serde_json::to_value(&cover).unwrap();
        assert_eq!(value["format"], "png");
        assert_eq!(value["byteLen"], PNG_SIGNATURE.len());
        assert_eq!(value["id"], cover.id().to_string());
    }
}
