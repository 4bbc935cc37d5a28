use aws_sdk_textract::operation::detect_document_text::DetectDocumentTextOutput;
use aws_sdk_textract::types as sdk;
use serde_json::Map;

use crate::document::{
    Block, BoundingBox, DocumentMetadata, DocumentTextResponse, Geometry, Point, Relationship,
};

pub(crate) fn response_from_output(output: &DetectDocumentTextOutput) -> DocumentTextResponse {
    DocumentTextResponse {
        document_metadata: output
            .document_metadata()
            .map(|m| DocumentMetadata { pages: m.pages() }),
        blocks: output.blocks().iter().map(block_from_sdk).collect(),
        detect_document_text_model_version: output
            .detect_document_text_model_version()
            .map(str::to_string),
        extra: Map::new(),
    }
}

fn block_from_sdk(block: &sdk::Block) -> Block {
    Block {
        block_type: block.block_type().map(|t| t.as_str().to_string()),
        confidence: block.confidence(),
        text: block.text().map(str::to_string),
        text_type: block.text_type().map(|t| t.as_str().to_string()),
        geometry: block.geometry().map(geometry_from_sdk),
        id: block.id().map(str::to_string),
        relationships: block
            .relationships()
            .iter()
            .map(|r| Relationship {
                kind: r.r#type().map(|t| t.as_str().to_string()),
                ids: r.ids().to_vec(),
            })
            .collect(),
        page: block.page(),
        extra: Map::new(),
    }
}

fn geometry_from_sdk(geometry: &sdk::Geometry) -> Geometry {
    Geometry {
        bounding_box: geometry.bounding_box().map(|b| BoundingBox {
            width: b.width(),
            height: b.height(),
            left: b.left(),
            top: b.top(),
        }),
        polygon: geometry
            .polygon()
            .iter()
            .map(|p| Point { x: p.x(), y: p.y() })
            .collect(),
    }
}
