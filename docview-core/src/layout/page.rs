use image::RgbaImage;
use serde::Serialize;

/// One annotated page, ready to be displayed next to its text lines.
#[derive(Debug, Clone)]
pub struct PageView {
    /// 1-based page number
    pub page_no: u32,
    /// rendered page with all overlays composited
    pub image: RgbaImage,
    /// LINE texts in upstream order
    pub lines: Vec<String>,
    /// number of regions handed to the renderer
    pub region_count: usize,
}

/// Summary of a [`PageView`] without the pixels.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageSummary {
    pub page_no: u32,
    pub width: u32,
    pub height: u32,
    pub line_count: usize,
    pub region_count: usize,
}

impl PageView {
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            page_no: self.page_no,
            width: self.image.width(),
            height: self.image.height(),
            line_count: self.lines.len(),
            region_count: self.region_count,
        }
    }
}
