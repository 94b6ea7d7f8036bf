//! Binary cover image chosen locally for upload.

use std::fmt;

use bytes::Bytes;
use mime_guess::Mime;

use super::error::DraftError;

/// A locally chosen cover image, held in memory until the draft is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverFile {
    file_name: String,
    content_type: Mime,
    bytes: Bytes,
}

impl CoverFile {
    /// Build a cover from raw bytes, guessing the content type from the file name.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self, DraftError> {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
        Self::new(file_name, content_type, bytes)
    }

    pub fn new(
        file_name: impl Into<String>,
        content_type: Mime,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, DraftError> {
        let file_name = file_name.into();
        let bytes = bytes.into();

        if content_type.type_() != mime_guess::mime::IMAGE {
            return Err(DraftError::NotAnImage {
                file_name,
                content_type: content_type.to_string(),
            });
        }
        if bytes.is_empty() {
            return Err(DraftError::EmptyCover { file_name });
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image payloads are large; keep them out of logs.
impl fmt::Debug for CoverFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type.essence_str())
            .field("len", &self.bytes.len())
            .finish()
    }
}
