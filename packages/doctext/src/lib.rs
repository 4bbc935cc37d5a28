//! # doctext
//!
//! Runs document text detection on an image once, keeps the service's raw
//! response in a local JSON file, and re-extracts the recognized lines from
//! that file on every later run.
//!
//! ## Features
//!
//! - **Cache-or-fetch**: the OCR service is only called when no cache file exists
//! - **Verbatim cache**: the full response (blocks, confidences, geometry) is stored as UTF-8 JSON
//! - **Line extraction**: `LINE` blocks are returned in reading order
//! - **Typed errors**: input, service, cache and data failures are distinguishable
//!
//! ## Quick Start
//!
//! ```ignore
//! use doctext::prelude::*;
//!
//! let config = Config::from_env();
//! let cache = DocumentTextCache::new(TextractEngine::from_env(config.region.clone()), &config);
//!
//! for line in cache.get_lines().await? {
//!     println!("{line}");
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;

pub use cache::{extract_lines, DocumentTextCache};
pub use config::{Config, DEFAULT_CACHE_FILE, DEFAULT_SAMPLE_IMAGE};
pub use error::{DocTextError, Result};
pub use logging::init_logging;

pub use doctext_ocr::{Block, DocumentTextResponse, OcrEngine, OcrError, TextractEngine};

/// Prelude module for convenient imports
///
/// ```ignore
/// use doctext::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        extract_lines, Block, Config, DocTextError, DocumentTextCache, DocumentTextResponse,
        OcrEngine, OcrError, TextractEngine,
    };
}
