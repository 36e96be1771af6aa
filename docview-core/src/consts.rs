/// Opacity shared by every overlay tint.
///
/// 64/255 is roughly 25%: dark enough to tell the categories apart, light
/// enough to keep the page text readable underneath.
pub const OVERLAY_ALPHA: u8 = 64;

/// Upscaling factor applied when rasterizing a PDF page for annotation.
pub const RENDER_SCALE: f32 = 2.0;

/// Environment variable pointing at the pdfium dynamic library directory.
pub const PDFIUM_LIB_PATH_ENV_NAME: &str = "PDFIUM_DYNAMIC_LIB_PATH";

/// Default location of the folder → file → artifact mapping.
pub const DEFAULT_INDEX_PATH: &str = "processing_map.json";

/// Host serving raw repository content.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Repository holding the precomputed extraction results.
pub const DEFAULT_REPO: &str = "ipos-fst/public_artefacts";

/// Branch of [`DEFAULT_REPO`] the artifacts are published on.
pub const DEFAULT_BRANCH: &str = "outputs";

/// Prefix the extraction pipeline put in front of every document key.
pub const DEFAULT_DOCUMENT_PREFIX: &str = "pdpvp_textract_test_cases/";

/// HTTP timeout for a single artifact fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
