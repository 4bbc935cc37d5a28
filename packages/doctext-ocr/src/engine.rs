use async_trait::async_trait;
use thiserror::Error;

use crate::document::DocumentTextResponse;

/// Engine failures.
///
/// `EmptyDocument` is a malformed request caught before the call; callers treat
/// it like the service rejecting the input.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("document is empty")]
    EmptyDocument,
    #[error("service error: {0}")]
    Service(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Detects document text from raw image bytes.
///
/// Implementations return the full structured response (blocks with type tags,
/// text, confidences and geometry), not just the recognized text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn detect_document_text(&self, document: &[u8]) -> Result<DocumentTextResponse, OcrError>;
}
