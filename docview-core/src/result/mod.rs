//! Model of a fetched extraction result.
//!
//! A result artifact is a JSON object keyed by normalized document path. Each
//! value is the list of OCR response fragments returned for that document,
//! and each fragment carries a `Blocks` array.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use tracing::*;

use crate::{analysis::bbox::BoundingBox, error::*};

pub mod key;
pub mod page;

pub use key::{document_key, normalize_path};
pub use page::{DocumentStats, PageBlocks};

pub const LINE_BLOCK: &str = "LINE";
pub const WORD_BLOCK: &str = "WORD";
pub const FIGURE_BLOCK: &str = "LAYOUT_FIGURE";
pub const TABLE_BLOCK: &str = "LAYOUT_TABLE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    pub bounding_box: BoundingBox,
}

/// One detected element of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub block_type: String,
    /// 1-based page number, absent in single page responses
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Block {
    /// Page the block belongs to; blocks without a page are on page 1.
    pub fn page_no(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.geometry.as_ref().map(|g| g.bounding_box)
    }

    pub fn is(&self, block_type: &str) -> bool {
        self.block_type == block_type
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseFragment {
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<Block>,
}

/// Parsed result artifact, document key → raw fragment list.
///
/// Fragments are decoded lazily per document so an unrelated malformed entry
/// does not prevent viewing the others.
#[derive(Debug, Clone, Default)]
pub struct ResultDocument {
    documents: BTreeMap<String, serde_json::Value>,
}

impl ResultDocument {
    pub fn parse(raw: &[u8]) -> Result<Self, ViewerError> {
        let documents = serde_json::from_slice::<BTreeMap<String, serde_json::Value>>(raw)
            .with_context(|_| ParseSnafu {
                stage: "result-document",
                raw: String::from_utf8_lossy(raw),
            })?;

        debug!("parsed result document with {} keys", documents.len());
        Ok(Self { documents })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn fragments(&self, key: &str) -> Result<Vec<ResponseFragment>, ViewerError> {
        let value = self.documents.get(key).context(LookupSnafu {
            kind: "document key",
            key,
        })?;

        Vec::<ResponseFragment>::deserialize(value).with_context(|_| ParseSnafu {
            stage: "response-fragments",
            raw: value.to_string(),
        })
    }

    /// Blocks of every fragment of `key`, flattened in order.
    pub fn blocks_for(&self, key: &str) -> Result<Vec<Block>, ViewerError> {
        let blocks: Vec<Block> = self
            .fragments(key)?
            .into_iter()
            .flat_map(|fragment| fragment.blocks)
            .collect();

        info!("document `{key}` has {} blocks", blocks.len());
        Ok(blocks)
    }
}
