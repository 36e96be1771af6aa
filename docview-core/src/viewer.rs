use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Serialize;
use snafu::ResultExt;
use tracing::*;
use uuid::Uuid;

use crate::{
    config::ViewerConfig,
    error::*,
    fetch::Fetch,
    index::ResultIndex,
    layout::page::{PageSummary, PageView},
    render::{OverlayRenderer, Rasterize},
    result::{Block, DocumentStats, PageBlocks, ResultDocument, document_key},
};

/// Everything shown for one selected file.
#[derive(Debug, Clone)]
pub struct FileView {
    pub request_id: Uuid,
    pub folder: String,
    pub file: String,
    pub artifact_path: String,
    pub stats: DocumentStats,
    pub pages: Vec<PageView>,
}

#[derive(Debug, Serialize)]
struct FileSummary<'a> {
    folder: &'a str,
    file: &'a str,
    artifact_path: &'a str,
    stats: &'a DocumentStats,
    pages: Vec<PageSummary>,
}

impl FileView {
    /// Writes `page-{n}.png`, `page-{n}.txt` and `stats.json` into
    /// `{dir}/{folder}/{file}/` and returns that directory.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ViewerError> {
        let out_dir = dir.join(&self.folder).join(&self.file);
        std::fs::create_dir_all(&out_dir).context(IoWriteSnafu {
            path: out_dir.display().to_string(),
        })?;

        for page in &self.pages {
            let image_path = out_dir.join(format!("page-{}.png", page.page_no));
            page.image.save(&image_path).context(ImageWriteSnafu {
                path: image_path.display().to_string(),
            })?;

            let text_path = out_dir.join(format!("page-{}.txt", page.page_no));
            let mut text = page.lines.join("\n");
            if !text.is_empty() {
                text.push('\n');
            }
            std::fs::write(&text_path, text).context(IoWriteSnafu {
                path: text_path.display().to_string(),
            })?;
        }

        let summary = FileSummary {
            folder: &self.folder,
            file: &self.file,
            artifact_path: &self.artifact_path,
            stats: &self.stats,
            pages: self.pages.iter().map(PageView::summary).collect(),
        };
        let stats_path = out_dir.join("stats.json");
        let json = serde_json::to_vec_pretty(&summary).context(JsonWriteSnafu {
            path: stats_path.display().to_string(),
        })?;
        std::fs::write(&stats_path, json).context(IoWriteSnafu {
            path: stats_path.display().to_string(),
        })?;

        info!("wrote {} pages to {}", self.pages.len(), out_dir.display());
        Ok(out_dir)
    }
}

/// A file that could not be viewed, with the reason.
#[derive(Debug)]
pub struct FileFailure {
    pub file: String,
    pub error: ViewerError,
}

#[derive(Debug, Default)]
pub struct FolderReport {
    pub viewed: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Drives the per-file flow: lookup, fetch, parse, rasterize, annotate.
pub struct Viewer<F, R> {
    config: ViewerConfig,
    index: ResultIndex,
    fetcher: F,
    rasterizer: R,
    renderer: OverlayRenderer,
}

impl<F: Fetch, R: Rasterize> Viewer<F, R> {
    pub fn new(config: ViewerConfig, index: ResultIndex, fetcher: F, rasterizer: R) -> Self {
        let renderer = OverlayRenderer::new(config.style.clone());

        Self {
            config,
            index,
            fetcher,
            rasterizer,
            renderer,
        }
    }

    pub fn index(&self) -> &ResultIndex {
        &self.index
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    /// Builds the complete view of `folder`/`file`.
    pub fn view_file(&self, folder: &str, file: &str) -> Result<FileView, ViewerError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("view_file", %request_id, folder, file);
        let _guard = span.enter();

        let artifact_path = self.index.lookup(folder, file)?;
        info!("processing file: {artifact_path}");

        let raw = self.fetcher.fetch(&artifact_path)?;
        let result = ResultDocument::parse(&raw)?;

        let key = document_key(&self.config.document_prefix, folder, file);
        let blocks = result.blocks_for(&key)?;

        let pdf_path = self.config.pdf_path(folder, file);
        let document = self.rasterizer.open(&pdf_path)?;
        let page_count = self.rasterizer.page_count(&document);

        let stats = DocumentStats::collect(&blocks, page_count);
        info!("statistics: {stats:?}");

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let image = self.rasterizer.render(&document, index)?;
            pages.push(self.annotate_page(&image, &blocks, index as u32 + 1)?);
        }

        Ok(FileView {
            request_id,
            folder: folder.to_string(),
            file: file.to_string(),
            artifact_path,
            stats,
            pages,
        })
    }

    /// Overlays the regions of 1-based page `page_no` and collects its lines.
    pub fn annotate_page(
        &self,
        image: &DynamicImage,
        blocks: &[Block],
        page_no: u32,
    ) -> Result<PageView, ViewerError> {
        let page_blocks = PageBlocks::collect(blocks, page_no);
        let image = self.renderer.render(image, &page_blocks.groups)?;

        debug!(
            "page {page_no}: {} regions, {} lines",
            page_blocks.region_count(),
            page_blocks.lines.len()
        );

        Ok(PageView {
            page_no,
            image,
            lines: page_blocks.text_lines(),
            region_count: page_blocks.region_count(),
        })
    }

    /// Views every file in turn, handing each result to `on_view`.
    ///
    /// A failing file is logged and recorded; the remaining files are still
    /// processed.
    pub fn view_folder<I, S, V>(&self, folder: &str, files: I, mut on_view: V) -> FolderReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        V: FnMut(&FileView) -> Result<(), ViewerError>,
    {
        let mut report = FolderReport::default();

        for file in files {
            let file = file.as_ref();
            match self.view_file(folder, file).and_then(|view| on_view(&view)) {
                Ok(()) => report.viewed.push(file.to_string()),
                Err(error) => {
                    error!("Error loading processed file {folder}/{file}: {error}");
                    if let Some(diagnostic) = error.diagnostic() {
                        error!("content that failed to parse: {diagnostic}");
                    }
                    report.failures.push(FileFailure {
                        file: file.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            "viewed {} files in {folder}, {} failed",
            report.viewed.len(),
            report.failures.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;
    use image::{Rgb, RgbImage, Rgba};

    use super::*;
    use crate::analysis::category::Category;

    struct MemoryFetcher {
        artifacts: HashMap<String, Bytes>,
    }

    impl Fetch for MemoryFetcher {
        fn fetch(&self, path: &str) -> Result<Bytes, ViewerError> {
            self.artifacts.get(path).cloned().ok_or(ViewerError::EmptyResult {
                path: path.to_string(),
            })
        }
    }

    /// Renders blank white pages; documents named `broken` fail to open.
    struct BlankRasterizer {
        pages: usize,
        size: (u32, u32),
    }

    impl Rasterize for BlankRasterizer {
        type Document<'a> = usize;

        fn open<'a>(&'a self, path: &Path) -> Result<usize, ViewerError> {
            if path.file_stem().is_some_and(|stem| stem == "broken") {
                return InvalidInputSnafu {
                    stage: "open-pdf",
                    message: "corrupt",
                }
                .fail();
            }
            Ok(self.pages)
        }

        fn page_count(&self, document: &usize) -> usize {
            *document
        }

        fn render(&self, _document: &usize, _index: usize) -> Result<DynamicImage, ViewerError> {
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                self.size.0,
                self.size.1,
                Rgb([255, 255, 255]),
            )))
        }
    }

    const INDEX: &str = r#"{
        "invoices": {
            "good": "runs\\invoices\\good.json",
            "bad-json": "runs/invoices/bad-json.json",
            "broken": "runs/invoices/broken.json",
            "unfetched": "runs/invoices/unfetched.json"
        }
    }"#;

    const GOOD: &str = r#"{
        "pdpvp_textract_test_cases/invoices/good.pdf": [
            {"Blocks": [
                {"BlockType": "LINE", "Page": 1, "Text": "Invoice 42"},
                {"BlockType": "LAYOUT_TABLE", "Page": 1,
                 "Geometry": {"BoundingBox": {"Left": 0.1, "Top": 0.1, "Width": 0.2, "Height": 0.05}}}
            ]},
            {"Blocks": [
                {"BlockType": "LINE", "Page": 2, "Text": "Total"},
                {"BlockType": "WORD", "Page": 2, "Text": "Total"}
            ]}
        ],
        "pdpvp_textract_test_cases/invoices/broken.pdf": [{"Blocks": []}]
    }"#;

    fn viewer() -> Viewer<MemoryFetcher, BlankRasterizer> {
        let artifacts = HashMap::from([
            ("runs/invoices/good.json".to_string(), Bytes::from_static(GOOD.as_bytes())),
            ("runs/invoices/broken.json".to_string(), Bytes::from_static(GOOD.as_bytes())),
            ("runs/invoices/bad-json.json".to_string(), Bytes::from_static(b"{oops")),
        ]);

        Viewer::new(
            ViewerConfig::default(),
            ResultIndex::from_slice(INDEX.as_bytes()).unwrap(),
            MemoryFetcher { artifacts },
            BlankRasterizer {
                pages: 2,
                size: (1000, 2000),
            },
        )
    }

    #[test]
    fn test_view_file() {
        let view = viewer().view_file("invoices", "good").unwrap();

        assert_eq!(view.artifact_path, "runs/invoices/good.json");
        assert_eq!(view.stats.page_count, 2);
        assert_eq!(view.stats.line_count, 2);
        assert_eq!(view.stats.word_count, 1);
        assert_eq!(view.stats.table_count, 1);
        assert_eq!(view.pages.len(), 2);

        let first = &view.pages[0];
        assert_eq!(first.page_no, 1);
        assert_eq!(first.lines, vec!["Invoice 42"]);
        assert_eq!(first.region_count, 1);
        assert_ne!(*first.image.get_pixel(200, 250), Rgba([255, 255, 255, 255]));

        let second = &view.pages[1];
        assert_eq!(second.lines, vec!["Total"]);
        assert_eq!(second.region_count, 0);
        assert_eq!(*second.image.get_pixel(200, 250), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_view_file_error_kinds() {
        let viewer = viewer();

        let kind = |folder: &str, file: &str| viewer.view_file(folder, file).unwrap_err().kind();

        assert_eq!(kind("receipts", "good"), ErrorKind::Lookup);
        assert_eq!(kind("invoices", "missing"), ErrorKind::Lookup);
        assert_eq!(kind("invoices", "unfetched"), ErrorKind::Fetch);
        assert_eq!(kind("invoices", "bad-json"), ErrorKind::Parse);
        assert_eq!(kind("invoices", "broken"), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_view_folder_isolates_failures() {
        let viewer = viewer();
        let mut seen = Vec::new();

        let report = viewer.view_folder(
            "invoices",
            ["bad-json", "good", "unfetched", "broken"],
            |view| {
                seen.push(view.file.clone());
                Ok(())
            },
        );

        assert_eq!(report.viewed, vec!["good"]);
        assert_eq!(seen, vec!["good"]);
        let failed: Vec<_> = report.failures.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(failed, vec!["bad-json", "unfetched", "broken"]);
        assert_eq!(report.failures[0].error.diagnostic(), Some("{oops"));
    }

    #[test]
    fn test_view_folder_catches_output_errors() {
        let viewer = viewer();

        let report = viewer.view_folder("invoices", ["good", "good"], |_| {
            Err(ViewerError::IoWrite {
                source: std::io::Error::other("read only"),
                path: "out".to_string(),
            })
        });

        assert!(report.viewed.is_empty());
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_custom_style_reaches_renderer() {
        let config = ViewerConfig {
            style: crate::analysis::style::CategoryStyle::empty(),
            ..Default::default()
        };
        let base = viewer();
        let viewer = Viewer::new(config, base.index, base.fetcher, base.rasterizer);

        let view = viewer.view_file("invoices", "good").unwrap();
        assert_eq!(viewer.renderer().style().tint(Category::Table), None);
        assert_eq!(*view.pages[0].image.get_pixel(200, 250), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_write_to() {
        let view = viewer().view_file("invoices", "good").unwrap();
        let dir = tempfile::tempdir().unwrap();

        let out_dir = view.write_to(dir.path()).unwrap();

        assert_eq!(out_dir, dir.path().join("invoices").join("good"));
        assert!(out_dir.join("page-1.png").is_file());
        assert!(out_dir.join("page-2.png").is_file());
        assert_eq!(
            std::fs::read_to_string(out_dir.join("page-1.txt")).unwrap(),
            "Invoice 42\n"
        );

        let stats: serde_json::Value =
            serde_json::from_slice(&std::fs::read(out_dir.join("stats.json")).unwrap()).unwrap();
        assert_eq!(stats["stats"]["Table Count"], 1);
        assert_eq!(stats["pages"][0]["width"], 1000);
    }
}
