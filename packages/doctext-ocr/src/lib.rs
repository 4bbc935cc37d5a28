pub mod document;
pub mod engine;
pub mod textract;

pub use document::{
    Block, BoundingBox, DocumentMetadata, DocumentTextResponse, Geometry, Point, Relationship,
    LINE_BLOCK_TYPE,
};
pub use engine::{OcrEngine, OcrError};
pub use textract::TextractEngine;
