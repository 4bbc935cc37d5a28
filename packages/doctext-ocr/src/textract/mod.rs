//! AWS Textract backend.

mod convert;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_textract::{
    config::Region,
    error::{DisplayErrorContext, SdkError},
    operation::detect_document_text::DetectDocumentTextError,
    primitives::Blob,
    types::Document,
    Client,
};
use tokio::sync::OnceCell;

use crate::document::DocumentTextResponse;
use crate::engine::{OcrEngine, OcrError};

/// Document text detection through Textract's `DetectDocumentText`.
///
/// Credentials come from the standard AWS chain (environment, profile, instance role).
/// With [`TextractEngine::from_env`] that chain is only resolved on the first call.
pub struct TextractEngine {
    region: Option<String>,
    client: OnceCell<Client>,
}

impl TextractEngine {
    pub fn new(client: Client) -> Self {
        Self {
            region: None,
            client: OnceCell::new_with(Some(client)),
        }
    }

    /// Uses the shared AWS config from the environment, optionally pinning the region.
    pub fn from_env(region: Option<String>) -> Self {
        Self {
            region,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(region) = &self.region {
                    loader = loader.region(Region::new(region.clone()));
                }
                let config = loader.load().await;
                tracing::debug!(region = ?config.region(), "loaded AWS config");
                Client::new(&config)
            })
            .await
    }
}

fn classify(err: SdkError<DetectDocumentTextError>) -> OcrError {
    match err {
        SdkError::ServiceError(context) => {
            OcrError::Service(DisplayErrorContext(context.err()).to_string())
        }
        other => OcrError::Unexpected(DisplayErrorContext(&other).to_string()),
    }
}

#[async_trait]
impl OcrEngine for TextractEngine {
    async fn detect_document_text(&self, document: &[u8]) -> Result<DocumentTextResponse, OcrError> {
        if document.is_empty() {
            return Err(OcrError::EmptyDocument);
        }

        tracing::debug!(bytes = document.len(), "calling DetectDocumentText");
        let output = self
            .client()
            .await
            .detect_document_text()
            .document(Document::builder().bytes(Blob::new(document.to_vec())).build())
            .send()
            .await
            .map_err(classify)?;

        let response = convert::response_from_output(&output);
        tracing::debug!(blocks = response.blocks.len(), "DetectDocumentText returned");
        Ok(response)
    }
}
