use serde::Serialize;
use tracing::*;

use crate::{
    analysis::category::Category,
    layout::element::RegionGroup,
    result::{Block, FIGURE_BLOCK, LINE_BLOCK, TABLE_BLOCK, WORD_BLOCK},
};

/// Document level counters shown before the pages.
///
/// Only the exact `LINE`, `WORD`, `LAYOUT_FIGURE` and `LAYOUT_TABLE` tags
/// are counted, other layout blocks never show up here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    #[serde(rename = "Page Count")]
    pub page_count: usize,
    #[serde(rename = "Line Count")]
    pub line_count: usize,
    #[serde(rename = "Word Count")]
    pub word_count: usize,
    #[serde(rename = "Figure Count")]
    pub figure_count: usize,
    #[serde(rename = "Table Count")]
    pub table_count: usize,
}

impl DocumentStats {
    pub fn collect(blocks: &[Block], page_count: usize) -> Self {
        let count = |block_type: &str| blocks.iter().filter(|b| b.is(block_type)).count();

        Self {
            page_count,
            line_count: count(LINE_BLOCK),
            word_count: count(WORD_BLOCK),
            figure_count: count(FIGURE_BLOCK),
            table_count: count(TABLE_BLOCK),
        }
    }
}

/// Blocks of a single page, sorted into what the viewer shows.
#[derive(Debug, Clone)]
pub struct PageBlocks<'a> {
    pub page_no: u32,
    pub lines: Vec<&'a Block>,
    pub words: Vec<&'a Block>,
    /// overlay regions, one group per category in paint order
    pub groups: Vec<RegionGroup>,
}

impl<'a> PageBlocks<'a> {
    /// Picks the blocks of 1-based page `page_no` out of a whole document.
    pub fn collect(blocks: &'a [Block], page_no: u32) -> Self {
        let mut lines = Vec::new();
        let mut words = Vec::new();
        let mut groups: Vec<RegionGroup> = Category::ORDER
            .iter()
            .map(|category| RegionGroup::new(*category, Vec::new()))
            .collect();

        for block in blocks.iter().filter(|b| b.page_no() == page_no) {
            if block.is(LINE_BLOCK) {
                lines.push(block);
            } else if block.is(WORD_BLOCK) {
                words.push(block);
            } else if let Some(category) = Category::from_block_type(&block.block_type) {
                match block.bounding_box() {
                    Some(bbox) => groups[category.idx()].boxes.push(bbox),
                    None => debug!(
                        "skip {} block without geometry on page {page_no}",
                        block.block_type
                    ),
                }
            }
        }

        Self {
            page_no,
            lines,
            words,
            groups,
        }
    }

    pub fn region_count(&self) -> usize {
        self.groups.iter().map(RegionGroup::len).sum()
    }

    /// Text of the page's LINE blocks, in upstream order.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.text.clone().unwrap_or_default())
            .collect()
    }
}
