//! Document upload types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::validation::MAX_UPLOAD_BYTES;

/// Where a document's bytes live until it is submitted
#[derive(Debug, Clone)]
enum FileSource {
    Memory(Vec<u8>),
    Disk(PathBuf),
}

/// A document selected for analysis
///
/// Size is known up front so validation never has to read the contents.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    name: String,
    size: u64,
    source: FileSource,
}

impl DocumentFile {
    /// Wrap in-memory contents
    pub fn from_bytes(name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: contents.len() as u64,
            source: FileSource::Memory(contents),
        }
    }

    /// Reference a file on disk; only its metadata is read here
    ///
    /// # Errors
    /// Returns an I/O error if the file metadata cannot be read
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            size: metadata.len(),
            source: FileSource::Disk(path.to_path_buf()),
        })
    }

    /// File name, including extension
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Load the contents for submission
    ///
    /// Disk-backed files are re-checked against the upload ceiling, since
    /// they may have changed since selection.
    ///
    /// # Errors
    /// Returns an I/O error if a disk-backed file cannot be read, or
    /// `FileTooLarge` if it now exceeds the ceiling
    pub async fn contents(&self) -> Result<Vec<u8>> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Disk(path) => {
                let bytes = tokio::fs::read(path).await?;
                let size = bytes.len() as u64;
                if size > MAX_UPLOAD_BYTES {
                    return Err(ValidationError::FileTooLarge { size }.into());
                }
                Ok(bytes)
            }
        }
    }
}

/// Analysis the backend returns for an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Short summary
    pub summary: String,
    /// Number of pages
    pub page_count: u64,
    /// Number of words
    pub word_count: u64,
    /// Key topics
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Start of the extracted text
    #[serde(rename = "full_text", default)]
    pub full_text_preview: String,
}
