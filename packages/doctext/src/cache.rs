//! Cache-or-fetch around a document text detection engine.
//!
//! The first run sends an image to the engine and stores the raw response as
//! JSON. Every later run reads lines back out of that file. Once written, the
//! file is authoritative: nothing here ever invalidates it, even when the
//! image it came from has changed. [`DocumentTextCache::analyze`] is the only
//! way to replace it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use doctext_ocr::{DocumentTextResponse, OcrEngine, LINE_BLOCK_TYPE};
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{DocTextError, Result};

/// Drives OCR through `E` and keeps its last response on disk.
pub struct DocumentTextCache<E> {
    engine: E,
    cache_path: PathBuf,
    default_image: PathBuf,
}

impl<E: OcrEngine> DocumentTextCache<E> {
    pub fn new(engine: E, config: &Config) -> Self {
        Self::with_paths(engine, &config.cache_file, &config.default_image)
    }

    pub fn with_paths(engine: E, cache_path: impl AsRef<Path>, default_image: impl AsRef<Path>) -> Self {
        Self {
            engine,
            cache_path: cache_path.as_ref().to_path_buf(),
            default_image: default_image.as_ref().to_path_buf(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn has_cache(&self) -> bool {
        self.cache_path.exists()
    }

    /// Runs OCR on `image` and overwrites the cache file with the full response.
    ///
    /// Failures are logged here and returned; the cache file is left exactly as
    /// it was whenever an error is returned.
    pub async fn analyze(&self, image: &Path) -> Result<()> {
        match self.fetch_and_store(image).await {
            Ok(()) => {
                tracing::info!("Response saved to {}", self.cache_path.display());
                Ok(())
            }
            Err(err) => {
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }

    async fn fetch_and_store(&self, image: &Path) -> Result<()> {
        let document = read_image(image).await?;
        tracing::debug!(image = %image.display(), bytes = document.len(), "sending document");

        let response = self.engine.detect_document_text(&document).await?;
        self.store(&response).await
    }

    async fn store(&self, response: &DocumentTextResponse) -> Result<()> {
        let json = serde_json::to_vec(response)
            .map_err(|e| DocTextError::Unexpected(format!("failed to serialize response: {e}")))?;

        let path = self.cache_path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &json))
            .await
            .map_err(|e| DocTextError::Unexpected(e.to_string()))?
            .map_err(|e| {
                DocTextError::Unexpected(format!(
                    "failed to write {}: {e}",
                    self.cache_path.display()
                ))
            })
    }

    /// Reads and parses the cache file.
    pub async fn read_cache(&self) -> Result<DocumentTextResponse> {
        let cache_read = |message: String| DocTextError::CacheRead {
            path: self.cache_path.clone(),
            message,
        };

        let contents = tokio::fs::read_to_string(&self.cache_path)
            .await
            .map_err(|e| cache_read(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| cache_read(e.to_string()))
    }

    /// Lines of the cached response, analyzing the default sample image first
    /// when there is no cache yet.
    pub async fn get_lines(&self) -> Result<Vec<String>> {
        self.get_lines_for(&self.default_image).await
    }

    /// Like [`get_lines`](Self::get_lines), analyzing `image` on a cache miss.
    ///
    /// A cache that is missing, unreadable or not valid JSON yields an empty
    /// list, so an empty result can mean either "no text" or "no usable cache".
    /// The only error returned is [`DocTextError::MalformedBlock`].
    pub async fn get_lines_for(&self, image: &Path) -> Result<Vec<String>> {
        if !self.has_cache() {
            tracing::info!(
                "File {} not found. Processing the image...",
                self.cache_path.display()
            );
            // Already logged; the read below reports the missing cache.
            let _ = self.analyze(image).await;
        }

        match self.read_cache().await {
            Ok(response) => extract_lines(&response),
            Err(err) => {
                tracing::error!("{}", err);
                Ok(Vec::new())
            }
        }
    }
}

/// Text of every `LINE` block, in response order.
///
/// A block without `BlockType`, or a `LINE` block without `Text`, is reported
/// as [`DocTextError::MalformedBlock`] naming the missing field.
pub fn extract_lines(response: &DocumentTextResponse) -> Result<Vec<String>> {
    response
        .blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let malformed = |field: &'static str| DocTextError::MalformedBlock {
                index,
                id: block.id.clone(),
                field,
            };
            match block.block_type.as_deref() {
                None => Some(Err(malformed("BlockType"))),
                Some(LINE_BLOCK_TYPE) => Some(block.text.clone().ok_or_else(|| malformed("Text"))),
                Some(_) => None,
            }
        })
        .collect()
}

async fn read_image(image: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(image).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DocTextError::InputNotFound(image.to_path_buf()),
        _ => DocTextError::Unexpected(format!("failed to read {}: {e}", image.display())),
    })
}

/// Writes through a temp file in the target's directory and renames it into place.
///
/// The result is readable like a plainly written file (0644 on Unix), not 0600.
fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctext_ocr::Block;

    #[test]
    fn test_extract_lines_filters_and_keeps_order() {
        let response = DocumentTextResponse::from_blocks(vec![
            Block::of_type("PAGE"),
            Block::line("A"),
            Block::of_type("WORD").with_text("x"),
            Block::line("B"),
        ]);

        assert_eq!(extract_lines(&response).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_extract_lines_empty_response() {
        let response = DocumentTextResponse::default();
        assert!(extract_lines(&response).unwrap().is_empty());
    }

    #[test]
    fn test_line_without_text_is_malformed() {
        let mut broken = Block::line("ignored");
        broken.text = None;
        broken.id = Some("line-2".into());
        let response = DocumentTextResponse::from_blocks(vec![Block::line("ok"), broken]);

        match extract_lines(&response) {
            Err(DocTextError::MalformedBlock { index, id, field }) => {
                assert_eq!(index, 1);
                assert_eq!(id.as_deref(), Some("line-2"));
                assert_eq!(field, "Text");
            }
            other => panic!("expected MalformedBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_word_without_text_is_ignored() {
        let response = DocumentTextResponse::from_blocks(vec![
            Block::of_type("WORD"),
            Block::line("only"),
        ]);

        assert_eq!(extract_lines(&response).unwrap(), vec!["only"]);
    }

    #[test]
    fn test_block_without_type_is_malformed() {
        let untyped = Block {
            text: Some("orphan".into()),
            ..Default::default()
        };
        let response = DocumentTextResponse::from_blocks(vec![Block::line("A"), untyped]);

        match extract_lines(&response) {
            Err(DocTextError::MalformedBlock { index, field, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "BlockType");
            }
            other => panic!("expected MalformedBlock, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomically_uses_regular_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        write_atomically(&path, b"{}").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_write_atomically_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("response.json");

        assert!(write_atomically(&path, b"{}").is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_atomically_replaces_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");

        write_atomically(&path, b"{\"Blocks\":[]}").unwrap();
        write_atomically(&path, b"{}").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_read_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpeg");

        let err = read_image(&missing).await.unwrap_err();
        assert!(matches!(err, DocTextError::InputNotFound(p) if p == missing));
    }
}
