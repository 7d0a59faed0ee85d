//! Distribution artifact fetcher.

use std::path::Path;
use std::time::Duration;

use crate::config::DownloadSection;
use crate::error::RetrievalError;
use crate::package::PackageDescriptor;

use super::Fetcher;
use super::archive;

/// Downloads `distUrl` over HTTP and unpacks it into the destination.
#[derive(Debug, Clone)]
pub struct DistFetcher {
    timeout: Duration,
    max_bytes: u64,
}

impl Default for DistFetcher {
    fn default() -> Self {
        Self::from_config(&DownloadSection::default())
    }
}

impl DistFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> Self {
        Self { timeout, max_bytes }
    }

    pub fn from_config(config: &DownloadSection) -> Self {
        Self::new(Duration::from_secs(config.timeout_secs), config.max_archive_bytes)
    }

    /// Download a URL into memory, enforcing the size cap.
    async fn download(&self, url: &str) -> Result<Vec<u8>, RetrievalError> {
        let http_err = |source| RetrievalError::Http {
            url: url.to_string(),
            source,
        };

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(http_err)?;
        let response = client.get(url).send().await.map_err(http_err)?;

        if !response.status().is_success() {
            return Err(RetrievalError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        if let Some(len) = response.content_length()
            && len > self.max_bytes
        {
            return Err(self.too_large(url, len));
        }

        let bytes = response.bytes().await.map_err(http_err)?;
        if bytes.len() as u64 > self.max_bytes {
            return Err(self.too_large(url, bytes.len() as u64));
        }

        Ok(bytes.to_vec())
    }

    fn too_large(&self, url: &str, size: u64) -> RetrievalError {
        RetrievalError::TooLarge {
            url: url.to_string(),
            size,
            max: self.max_bytes,
        }
    }
}

impl Fetcher for DistFetcher {
    fn fetch(
        &self,
        descriptor: &PackageDescriptor,
        destination: &Path,
    ) -> Result<(), RetrievalError> {
        let url = descriptor
            .dist_url()
            .ok_or_else(|| RetrievalError::MissingLocation {
                name: descriptor.name().to_string(),
                expected: "distribution",
            })?;

        let runtime = tokio::runtime::Runtime::new()?;
        let bytes = runtime.block_on(self.download(url))?;
        tracing::debug!(url, size = bytes.len(), "downloaded artifact");

        let format = archive::unpack(&bytes, destination, &raw_file_name(url, descriptor))?;
        tracing::debug!(?format, "artifact unpacked");
        Ok(())
    }
}

/// File name for artifacts that are not archives: the last URL path
/// segment, or the package name when the URL has none.
fn raw_file_name(url: &str, descriptor: &PackageDescriptor) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string)
        })
        .unwrap_or_else(|| descriptor.name().to_string())
}
