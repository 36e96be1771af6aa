use serde::{Deserialize, Serialize};

/// Overlay category of a layout block.
///
/// The declaration order is the paint order: later categories are drawn on
/// top of earlier ones, so a footer inside a text block stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Figure,
    Table,
    Text,
    HeaderTitle,
    Footer,
}

impl Category {
    /// Every category, in paint order.
    pub const ORDER: [Category; 5] = [
        Category::Figure,
        Category::Table,
        Category::Text,
        Category::HeaderTitle,
        Category::Footer,
    ];

    /// Legend label, named after the block types it covers.
    pub const fn name(&self) -> &'static str {
        match self {
            Category::Figure => "LAYOUT_FIGURE",
            Category::Table => "LAYOUT_TABLE",
            Category::Text => "LAYOUT_TEXT",
            Category::HeaderTitle => "LAYOUT_HEADER/TITLE",
            Category::Footer => "LAYOUT_FOOTER",
        }
    }

    pub const fn idx(&self) -> usize {
        match self {
            Category::Figure => 0,
            Category::Table => 1,
            Category::Text => 2,
            Category::HeaderTitle => 3,
            Category::Footer => 4,
        }
    }

    pub const fn color(&self) -> [u8; 3] {
        match self {
            Category::Figure => [255, 0, 0],        // Red
            Category::Table => [0, 0, 255],         // Blue
            Category::Text => [0, 255, 0],          // Green
            Category::HeaderTitle => [128, 0, 128], // Purple
            Category::Footer => [255, 255, 0],      // Yellow
        }
    }

    /// Maps a block type tag to its overlay category.
    ///
    /// Section headers share the header/title group even though the document
    /// statistics never count them.
    pub fn from_block_type(block_type: &str) -> Option<Category> {
        match block_type {
            "LAYOUT_FIGURE" => Some(Category::Figure),
            "LAYOUT_TABLE" => Some(Category::Table),
            "LAYOUT_TEXT" => Some(Category::Text),
            "LAYOUT_SECTION_HEADER" | "LAYOUT_HEADER" | "LAYOUT_TITLE" => {
                Some(Category::HeaderTitle)
            }
            "LAYOUT_FOOTER" => Some(Category::Footer),
            _ => None,
        }
    }
}
