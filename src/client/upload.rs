//! Document upload controller

use super::{Assistant, InFlight};
use crate::error::{AssistantError, Operation, Result};
use crate::transport::Transport;
use crate::types::{DocumentFile, StatusKind, UiEvent, UploadResult};
use crate::validation::validate_document;

const PROCESSING: &str = "Processing document...";
const UPLOAD_FAILED: &str = "Failed to process document. Please try again.";

impl<T: Transport> Assistant<T> {
    /// Validate a selected document and submit it
    ///
    /// Unsupported extensions and files over 10 MiB are rejected locally.
    ///
    /// # Errors
    /// `Validation`, `Busy`, `Io`, or the backend failure
    pub async fn select_file(&self, file: DocumentFile) -> Result<UploadResult> {
        if let Err(e) = validate_document(&file) {
            log::debug!("Rejected {}: {e}", file.name());
            self.upload_status(e.to_string(), StatusKind::Error);
            return Err(e.into());
        }
        self.submit(file).await
    }

    /// Upload a document that already passed validation
    ///
    /// A successful analysis replaces the previous one. An analysis that
    /// arrives after a logout is dropped and reported as `InvalidState`.
    ///
    /// # Errors
    /// `Busy`, `Io`, `Validation` if a disk file grew past the limit,
    /// `InvalidState` after a logout, or the backend failure
    pub async fn submit(&self, file: DocumentFile) -> Result<UploadResult> {
        let _in_flight = match InFlight::acquire(&self.upload_in_flight, Operation::Upload) {
            Ok(guard) => guard,
            Err(e) => {
                self.upload_status(e.to_string(), StatusKind::Error);
                return Err(e);
            }
        };
        let epoch = self.current_epoch();
        self.upload_status(PROCESSING, StatusKind::Info);

        let result = match file.contents().await {
            Ok(contents) => self.api.process_document(file.name(), contents).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(result) => {
                {
                    let mut state = self.state.lock();
                    if self.current_epoch() != epoch {
                        log::debug!("Dropping analysis of {} that arrived after sign-out", file.name());
                        return Err(AssistantError::invalid_state(
                            "signed out while the document was being processed",
                        ));
                    }
                    state.last_upload = Some(result.clone());
                }
                log::info!(
                    "Analysed {} ({} pages, {} words)",
                    file.name(),
                    result.page_count,
                    result.word_count
                );
                self.emit(UiEvent::UploadCompleted {
                    file_name: file.name().to_string(),
                    result: result.clone(),
                });
                Ok(result)
            }
            Err(e) => {
                log::error!("Uploading {} failed: {e}", file.name());
                let message = match &e {
                    AssistantError::Application(msg) => format!("Error: {msg}"),
                    AssistantError::Validation(v) => v.to_string(),
                    _ => UPLOAD_FAILED.to_string(),
                };
                self.upload_status(message, StatusKind::Error);
                Err(e)
            }
        }
    }
}
