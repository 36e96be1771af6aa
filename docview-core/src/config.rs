use std::path::{Path, PathBuf};

use serde::Deserialize;
use snafu::ResultExt;
use tracing::*;

use crate::{analysis::style::CategoryStyle, consts::*, error::*};

/// Configuration of a viewing session.
///
/// Everything the viewer needs is passed in here rather than read from
/// globals; unset fields in a config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Host serving the raw result artifacts
    pub base_url: String,
    /// `owner/name` of the results repository
    pub repo: String,
    /// Branch the artifacts live on
    pub branch: String,
    /// Prefix of every document key inside an artifact
    pub document_prefix: String,
    /// Directory holding `{folder}/{file}.pdf`
    pub pdf_root: PathBuf,
    /// Upscaling factor for page rasterization
    pub render_scale: f32,
    /// HTTP timeout per artifact, in seconds
    pub fetch_timeout_secs: u64,
    /// Overlay tint per category
    pub style: CategoryStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            document_prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
            pdf_root: PathBuf::from("."),
            render_scale: RENDER_SCALE,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            style: CategoryStyle::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).context(ConfigReadSnafu {
            path: path.display().to_string(),
        })?;

        let config = Self::from_json(&raw).context(ConfigSnafu {
            path: path.display().to_string(),
        })?;

        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Location of the source PDF of `folder`/`file`.
    pub fn pdf_path(&self, folder: &str, file: &str) -> PathBuf {
        self.pdf_root.join(folder).join(format!("{file}.pdf"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::category::Category;
    use crate::error::ErrorKind;
    use image::Rgba;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(
            r#"{"repo": "me/results", "render_scale": 1.5, "style": {"Text": [1, 2, 3, 4]}}"#,
        )
        .unwrap();

        assert_eq!(config.repo, "me/results");
        assert_eq!(config.render_scale, 1.5);
        assert_eq!(config.branch, DEFAULT_BRANCH);
        assert_eq!(config.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
        // a style table replaces the defaults as a whole
        assert_eq!(config.style.tint(Category::Text), Some(Rgba([1, 2, 3, 4])));
        assert_eq!(config.style.tint(Category::Figure), None);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_pdf_path() {
        let config = ViewerConfig {
            pdf_root: PathBuf::from("/data"),
            ..Default::default()
        };

        assert_eq!(
            config.pdf_path("invoices", "scan-01"),
            PathBuf::from("/data/invoices/scan-01.pdf")
        );
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");

        let err = ViewerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ViewerError::ConfigRead { .. }));
        assert_eq!(err.kind(), ErrorKind::Lookup);

        std::fs::write(&path, "{\"render_scale\": \"big\"}").unwrap();
        let err = ViewerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ViewerError::Config { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("viewer.json"));
    }
}
