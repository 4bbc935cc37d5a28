//! Error types for document text caching

use std::path::PathBuf;

use doctext_ocr::OcrError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocTextError>;

#[derive(Error, Debug)]
pub enum DocTextError {
    #[error("file {} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("error processing the document: {0}")]
    Service(String),

    #[error("error reading the response file {}: {message}", path.display())]
    CacheRead { path: PathBuf, message: String },

    #[error("block at index {index} has no {field} (Id: {id:?})")]
    MalformedBlock {
        index: usize,
        id: Option<String>,
        field: &'static str,
    },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<OcrError> for DocTextError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::Service(message) => DocTextError::Service(message),
            empty @ OcrError::EmptyDocument => DocTextError::Service(empty.to_string()),
            OcrError::Unexpected(message) => DocTextError::Unexpected(message),
        }
    }
}
