use std::{path::PathBuf, time::Duration};

use bytes::Bytes;
use reqwest::blocking::Client;
use snafu::{ResultExt, ensure};
use tracing::*;

use crate::{config::ViewerConfig, error::*};

/// Retrieves the raw bytes of a result artifact.
pub trait Fetch {
    fn fetch(&self, path: &str) -> Result<Bytes, ViewerError>;
}

/// Fetches artifacts over HTTP from `{base_url}/{repo}/{branch}/{path}`.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    repo: String,
    branch: String,
}

impl HttpFetcher {
    pub fn new(config: &ViewerConfig) -> Result<Self, ViewerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .context(FetchSnafu { path: "<client>" })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            repo: config.repo.trim_matches('/').to_string(),
            branch: config.branch.trim_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            self.repo,
            self.branch,
            path.trim_start_matches('/')
        )
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, path: &str) -> Result<Bytes, ViewerError> {
        let url = self.url(path);
        info!("fetch {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .context(FetchSnafu { path })?;

        let status = response.status();
        ensure!(status.is_success(), FetchStatusSnafu { status, path });

        let body = response.bytes().context(FetchSnafu { path })?;
        ensure!(!body.is_empty(), EmptyResultSnafu { path });

        debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

/// Reads artifacts from a local checkout of the results repository.
pub struct LocalFetcher {
    root: PathBuf,
}

impl LocalFetcher {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl Fetch for LocalFetcher {
    fn fetch(&self, path: &str) -> Result<Bytes, ViewerError> {
        let full_path = self.root.join(path.trim_start_matches('/'));
        info!("read {}", full_path.display());

        let body = std::fs::read(&full_path).context(FetchLocalSnafu {
            path: full_path.display().to_string(),
        })?;
        ensure!(!body.is_empty(), EmptyResultSnafu { path });

        Ok(Bytes::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_url() {
        let config = ViewerConfig {
            base_url: "https://example.com/".to_string(),
            repo: "org/results".to_string(),
            branch: "outputs".to_string(),
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        assert_eq!(
            fetcher.url("runs/invoices/a.json"),
            "https://example.com/org/results/outputs/runs/invoices/a.json"
        );
        assert_eq!(
            fetcher.url("/a.json"),
            "https://example.com/org/results/outputs/a.json"
        );
    }

    #[test]
    fn test_default_url_points_at_raw_content() {
        let fetcher = HttpFetcher::new(&ViewerConfig::default()).unwrap();

        assert_eq!(
            fetcher.url("x.json"),
            "https://raw.githubusercontent.com/ipos-fst/public_artefacts/outputs/x.json"
        );
    }

    #[test]
    fn test_local_fetch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("runs")).unwrap();
        std::fs::write(dir.path().join("runs/a.json"), b"{}").unwrap();

        let fetcher = LocalFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("runs/a.json").unwrap(), Bytes::from_static(b"{}"));
    }

    #[test]
    fn test_local_fetch_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.json"), b"").unwrap();
        let fetcher = LocalFetcher::new(dir.path());

        let err = fetcher.fetch("missing.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);

        let err = fetcher.fetch("empty.json").unwrap_err();
        assert!(matches!(err, ViewerError::EmptyResult { .. }));
    }
}
