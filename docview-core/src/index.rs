//! The result index: folder → file → location of the extraction artifact.

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;
use snafu::{OptionExt, ResultExt};
use tracing::*;

use crate::error::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ResultIndex {
    folders: BTreeMap<String, BTreeMap<String, String>>,
}

impl ResultIndex {
    /// Loads the index written by the processing run.
    ///
    /// A missing file means nothing was processed yet and is reported as a
    /// lookup failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ViewerError::Lookup {
                    kind: "previously processed results".to_string(),
                    key: path.display().to_string(),
                }
            } else {
                ViewerError::IndexRead {
                    source,
                    path: path.display().to_string(),
                }
            }
        })?;

        let index = Self::from_slice(&raw)?;
        info!(
            "loaded result index {} with {} folders",
            path.display(),
            index.folders.len()
        );
        Ok(index)
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, ViewerError> {
        serde_json::from_slice(raw).with_context(|_| ParseSnafu {
            stage: "result-index",
            raw: String::from_utf8_lossy(raw),
        })
    }

    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.folders.keys().map(String::as_str)
    }

    pub fn files(&self, folder: &str) -> Result<impl Iterator<Item = &str>, ViewerError> {
        let files = self
            .folders
            .get(folder)
            .context(LookupSnafu { kind: "folder", key: folder })?;

        Ok(files.keys().map(String::as_str))
    }

    /// Artifact path of `folder`/`file`, with `/` separators.
    pub fn lookup(&self, folder: &str, file: &str) -> Result<String, ViewerError> {
        let path = self
            .folders
            .get(folder)
            .context(LookupSnafu { kind: "folder", key: folder })?
            .get(file)
            .context(LookupSnafu {
                kind: "file",
                key: format!("{folder}/{file}"),
            })?;

        Ok(path.replace('\\', "/"))
    }
}
