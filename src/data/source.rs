//! Where raw dataset documents come from: an HTTP base URL or a local directory.

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::dataset::DatasetKey;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches the raw text of one dataset document.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, key: DatasetKey) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// `GET {base_url}/{key}.yaml`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpSource { client, base_url }
    }

    pub fn url_for(&self, key: DatasetKey) -> String {
        format!("{}/{}", self.base_url, key.file_name())
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self, key: DatasetKey) -> Result<String, FetchError> {
        let url = self.url_for(key);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads `{dir}/{key}.yaml` from disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirSource { dir: dir.into() }
    }
}

impl DocumentSource for DirSource {
    async fn fetch(&self, key: DatasetKey) -> Result<String, FetchError> {
        let path = self.dir.join(key.file_name());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.display().to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Source chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnySource {
    Http(HttpSource),
    Dir(DirSource),
}

impl DocumentSource for AnySource {
    async fn fetch(&self, key: DatasetKey) -> Result<String, FetchError> {
        match self {
            AnySource::Http(source) => source.fetch(key).await,
            AnySource::Dir(source) => source.fetch(key).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AnySource::Http(source) => source.describe(),
            AnySource::Dir(source) => source.describe(),
        }
    }
}
