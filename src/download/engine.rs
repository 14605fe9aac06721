//! Concurrent download of the selected files.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use super::client::{DownloadedFile, download_file};
use crate::fanout::{TaskFailure, run_bounded};
use crate::listing::RemoteFileReference;
use crate::remote::RemoteClient;

/// Result of the download phase.
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written, in the order they were requested.
    pub downloaded: Vec<DownloadedFile>,
    /// Files that could not be downloaded.
    pub failures: Vec<TaskFailure>,
}

impl DownloadReport {
    /// Local paths of the downloaded files, in request order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.downloaded.iter().map(|file| file.path.clone()).collect()
    }
}

/// Downloads files concurrently into a local directory.
///
/// One task per file; a failure is recorded for that file and does not stop
/// or roll back the others.
#[derive(Debug, Clone)]
pub struct ConcurrentDownloader {
    client: RemoteClient,
    concurrency: usize,
    output_dir: Option<PathBuf>,
}

impl ConcurrentDownloader {
    /// Creates a downloader writing into `output_dir`, or the working
    /// directory when `None`.
    #[must_use]
    pub fn new(client: RemoteClient, concurrency: usize, output_dir: Option<PathBuf>) -> Self {
        Self {
            client,
            concurrency,
            output_dir,
        }
    }

    /// Downloads every reference and waits for all of them.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn download_all(&self, files: &[RemoteFileReference]) -> DownloadReport {
        let tasks: Vec<_> = files
            .iter()
            .map(|reference| {
                let client = self.client.clone();
                let reference = reference.clone();
                let output_dir = self.output_dir.clone();
                (reference.file_name().to_string(), async move {
                    download_file(&client, &reference, output_dir.as_deref()).await
                })
            })
            .collect();

        let mut report = DownloadReport::default();
        for result in run_bounded(self.concurrency, tasks).await {
            match result {
                Ok(file) => report.downloaded.push(file),
                Err(failure) => {
                    warn!(file_name = %failure.file_name, error = %failure.message, "download failed");
                    report.failures.push(failure);
                }
            }
        }

        info!(
            completed = report.downloaded.len(),
            failed = report.failures.len(),
            "download phase complete"
        );
        report
    }
}
