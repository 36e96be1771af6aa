use std::{path::Path, time::Instant};

use image::DynamicImage;
use pdfium_render::prelude::{PdfDocument, PdfRenderConfig, Pdfium};
use snafu::{ResultExt, ensure};
use tracing::*;

use crate::{consts::*, error::*};

/// Turns document pages into raster images.
pub trait Rasterize {
    /// An opened document, borrowed from the rasterizer.
    type Document<'a>
    where
        Self: 'a;

    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, ViewerError>;

    fn page_count(&self, document: &Self::Document<'_>) -> usize;

    /// Renders the page at 0-based `index`.
    fn render(
        &self,
        document: &Self::Document<'_>,
        index: usize,
    ) -> Result<DynamicImage, ViewerError>;
}

/// pdfium backed page rasterizer.
pub struct PageRasterizer {
    pdfium: Pdfium,
    scale: f32,
}

impl PageRasterizer {
    /// Binds pdfium and renders pages upscaled by `scale`.
    ///
    /// The library is looked up in `PDFIUM_DYNAMIC_LIB_PATH` when the
    /// variable is set, otherwise in the system library paths.
    pub fn new(scale: f32) -> Result<Self, ViewerError> {
        let bindings = match std::env::var(PDFIUM_LIB_PATH_ENV_NAME) {
            Ok(lib_path) => {
                info!("bind pdfium from {lib_path}");
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&lib_path))
                    .context(PdfiumSnafu {
                        stage: "load-dyn-lib",
                    })?
            }
            Err(_) => {
                info!("{PDFIUM_LIB_PATH_ENV_NAME} not set, bind system pdfium");
                Pdfium::bind_to_system_library().context(PdfiumSnafu {
                    stage: "load-system-lib",
                })?
            }
        };

        Ok(Self::with_pdfium(Pdfium::new(bindings), scale))
    }

    pub fn with_pdfium(pdfium: Pdfium, scale: f32) -> Self {
        Self { pdfium, scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Rasterize for PageRasterizer {
    type Document<'a> = PdfDocument<'a>;

    fn open<'a>(&'a self, path: &Path) -> Result<PdfDocument<'a>, ViewerError> {
        ensure!(
            path.is_file(),
            InvalidInputSnafu {
                stage: "open-pdf",
                message: format!("`{}` does not exist", path.display()),
            }
        );

        self.pdfium
            .load_pdf_from_file(path, None)
            .context(PdfiumSnafu { stage: "load-pdf" })
    }

    fn page_count(&self, document: &PdfDocument<'_>) -> usize {
        document.pages().len() as usize
    }

    fn render(
        &self,
        document: &PdfDocument<'_>,
        index: usize,
    ) -> Result<DynamicImage, ViewerError> {
        let page_count = self.page_count(document);
        ensure!(
            index < page_count,
            LookupSnafu {
                kind: "page",
                key: format!("{index} (document has {page_count} pages)"),
            }
        );

        let page = document
            .pages()
            .get(index as u16)
            .context(PdfiumSnafu { stage: "get-page" })?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(self.scale);

        let instant = Instant::now();
        let image = page
            .render_with_config(&render_config)
            .context(PdfiumSnafu { stage: "render" })?
            .as_image();

        info!(
            "render page {} ({}x{}) in {}ms",
            index,
            image.width(),
            image.height(),
            instant.elapsed().as_millis()
        );
        Ok(image)
    }
}
