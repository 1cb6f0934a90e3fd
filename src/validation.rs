//! Client-side input checks
//!
//! Everything here runs before the API client is touched. A failure means no
//! request is issued.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::DocumentFile;

/// Largest document accepted for upload (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted document extensions, lowercase
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Length of a one-time verification code
pub const CODE_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Trim and check an email address for a `local@domain.tld` shape
///
/// # Errors
/// Returns `ValidationError::InvalidEmail` when the shape does not match
pub fn validate_email(email: &str) -> Result<&str, ValidationError> {
    let email = email.trim();
    if EMAIL_PATTERN.is_match(email) {
        Ok(email)
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Trim and check that a verification code is exactly six characters
///
/// # Errors
/// Returns `ValidationError::InvalidCode` for any other length
pub fn validate_code(code: &str) -> Result<&str, ValidationError> {
    let code = code.trim();
    if code.chars().count() == CODE_LENGTH {
        Ok(code)
    } else {
        Err(ValidationError::InvalidCode)
    }
}

/// Check a document's extension (case-insensitive) and size
///
/// # Errors
/// Returns `UnsupportedFileType` or `FileTooLarge`, checked in that order
pub fn validate_document(file: &DocumentFile) -> Result<(), ValidationError> {
    let extension = file
        .name()
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));
    if !allowed {
        return Err(ValidationError::UnsupportedFileType {
            file_name: file.name().to_string(),
        });
    }

    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge { size: file.size() });
    }
    Ok(())
}
