//! The list → scan → select → download pipeline.
//!
//! One [`Pipeline`] is shared by the whole service; every request gets its
//! own [`RequestContext`] and its own offset index, so concurrent requests
//! never see each other's state.
//!
//! # Example
//!
//! ```no_run
//! use charfetch_core::config::ServiceConfig;
//! use charfetch_core::pipeline::{Pipeline, RequestContext};
//! use charfetch_core::remote::RemoteClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(RemoteClient::new()?, ServiceConfig::default());
//! let context = RequestContext::new("http://localhost:8080", "z")?;
//! let output = pipeline.run(context).await?;
//! println!("Downloaded: {:?}", output.downloaded);
//! # Ok(())
//! # }
//! ```

mod error;
mod stage;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument, warn};

pub use error::PipelineError;
pub use stage::{PipelineStage, StageTracker};

use crate::config::ServiceConfig;
use crate::download::ConcurrentDownloader;
use crate::listing::{RemoteFileReference, fetch_listing};
use crate::remote::{RemoteClient, parse_base_url};
use crate::scan::{ConcurrentScanner, LookupCharacter, select};

/// Validated inputs of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: String,
    lookup: LookupCharacter,
}

impl RequestContext {
    /// Validates the raw request values.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidRequest`] if the URL is not an
    /// http(s) URL or the lookup string is not exactly one character.
    pub fn new(remote_file_server_url: &str, lookup_character: &str) -> Result<Self, PipelineError> {
        parse_base_url(remote_file_server_url)
            .map_err(|e| PipelineError::invalid_request(e.to_string()))?;
        let lookup = LookupCharacter::parse(lookup_character)
            .map_err(|e| PipelineError::invalid_request(e.to_string()))?;
        Ok(Self {
            base_url: remote_file_server_url.trim().to_string(),
            lookup,
        })
    }

    /// Base URL of the remote file server.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Character searched for.
    #[must_use]
    pub fn lookup(&self) -> LookupCharacter {
        self.lookup
    }
}

/// What a successful request produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// The winning offset, `None` when no file matched.
    pub offset: Option<u64>,
    /// Selected file names, sorted lexicographically.
    pub files: Vec<String>,
    /// Local paths written, in the same order as `files`.
    pub downloaded: Vec<PathBuf>,
}

/// Runs requests against remote file servers.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: RemoteClient,
    config: Arc<ServiceConfig>,
}

impl Pipeline {
    /// Creates a pipeline sharing `client` across requests.
    #[must_use]
    pub fn new(client: RemoteClient, config: ServiceConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// The configuration requests run with.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Runs one request to completion under the configured deadline.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::RemoteUnavailable`] if the listing cannot be
    ///   fetched; nothing is scanned.
    /// - [`PipelineError::TaskFailures`] if any scan or download failed;
    ///   successful scans still take part in selection and successful
    ///   downloads stay on disk.
    /// - [`PipelineError::DeadlineExceeded`] if the deadline fires.
    #[instrument(skip(self, context), fields(base_url = %context.base_url(), lookup = %context.lookup()))]
    pub async fn run(&self, context: RequestContext) -> Result<PipelineOutput, PipelineError> {
        let tracker = StageTracker::new();
        let timeout = self.config.request_timeout;

        let result = match tokio::time::timeout(timeout, self.run_stages(&context, &tracker)).await {
            Ok(result) => result,
            Err(_) => Err(PipelineError::DeadlineExceeded {
                timeout,
                stage: tracker.current(),
            }),
        };

        match &result {
            Ok(output) => {
                tracker.advance(PipelineStage::Responded);
                info!(
                    offset = ?output.offset,
                    downloaded = output.downloaded.len(),
                    "request complete"
                );
            }
            Err(e) => {
                warn!(stage = %tracker.current(), error = %e, "request failed");
                tracker.advance(PipelineStage::Failed);
            }
        }
        result
    }

    async fn run_stages(
        &self,
        context: &RequestContext,
        tracker: &StageTracker,
    ) -> Result<PipelineOutput, PipelineError> {
        tracker.advance(PipelineStage::Listing);
        let listing = fetch_listing(&self.client, context.base_url())
            .await
            .map_err(PipelineError::RemoteUnavailable)?;
        info!(candidates = listing.len(), "listing fetched");

        tracker.advance(PipelineStage::Scanning);
        let scanner = ConcurrentScanner::new(
            self.client.clone(),
            self.config.concurrency,
            self.config.chunk_size,
            self.config.offset_mode,
        );
        let scan = scanner.scan_all(&listing.files, context.lookup()).await;

        tracker.advance(PipelineStage::Selecting);
        let selection = select(&scan.index);
        info!(offset = ?selection.offset, files = ?selection.files, "selection made");

        tracker.advance(PipelineStage::Downloading);
        let references: Vec<RemoteFileReference> = selection
            .files
            .iter()
            .map(|name| RemoteFileReference::new(context.base_url(), name.as_str()))
            .collect();
        let downloader = ConcurrentDownloader::new(
            self.client.clone(),
            self.config.concurrency,
            self.config.output_dir.clone(),
        );
        let report = downloader.download_all(&references).await;
        let downloaded = report.paths();

        if !scan.failures.is_empty() || !report.failures.is_empty() {
            return Err(PipelineError::TaskFailures {
                scan_failures: scan.failures,
                download_failures: report.failures,
                downloaded,
            });
        }

        Ok(PipelineOutput {
            offset: selection.offset,
            files: selection.files,
            downloaded,
        })
    }
}
