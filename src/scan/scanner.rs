//! Concurrent first-match scanning of remote files.

use futures_util::StreamExt;
use tracing::{debug, info, instrument, warn};

use super::chunk::{ChunkScanner, OffsetMode};
use super::index::{OffsetIndex, ScanOutcome};
use super::lookup::LookupCharacter;
use crate::fanout::{TaskFailure, run_bounded};
use crate::listing::RemoteFileReference;
use crate::remote::{RemoteClient, RemoteError};

/// Result of the scan phase.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Offsets of every file that matched.
    pub index: OffsetIndex,
    /// Files scanned to completion.
    pub scanned: usize,
    /// Files whose scan failed.
    pub failures: Vec<TaskFailure>,
}

/// Scans remote files for the first occurrence of a character.
///
/// Every file is scanned by its own task; tasks return their
/// [`ScanOutcome`] and the outcomes are folded into a fresh [`OffsetIndex`]
/// after all tasks have joined, so the index is never shared between tasks.
#[derive(Debug, Clone)]
pub struct ConcurrentScanner {
    client: RemoteClient,
    concurrency: usize,
    chunk_size: usize,
    mode: OffsetMode,
}

impl ConcurrentScanner {
    /// Creates a scanner.
    #[must_use]
    pub fn new(client: RemoteClient, concurrency: usize, chunk_size: usize, mode: OffsetMode) -> Self {
        Self {
            client,
            concurrency,
            chunk_size,
            mode,
        }
    }

    /// Scans all `files` and groups them by first-match offset.
    ///
    /// A failed scan is recorded in [`ScanReport::failures`]; the outcomes of
    /// the other files are still indexed.
    #[instrument(skip(self, files), fields(files = files.len(), lookup = %lookup))]
    pub async fn scan_all(&self, files: &[RemoteFileReference], lookup: LookupCharacter) -> ScanReport {
        let tasks: Vec<_> = files
            .iter()
            .map(|reference| {
                let client = self.client.clone();
                let reference = reference.clone();
                let chunk_size = self.chunk_size;
                let mode = self.mode;
                (reference.file_name().to_string(), async move {
                    scan_file(&client, &reference, lookup, chunk_size, mode).await
                })
            })
            .collect();

        let mut report = ScanReport::default();
        for result in run_bounded(self.concurrency, tasks).await {
            match result {
                Ok(outcome) => {
                    report.scanned += 1;
                    report.index.record(outcome);
                }
                Err(failure) => {
                    warn!(file_name = %failure.file_name, error = %failure.message, "scan failed");
                    report.failures.push(failure);
                }
            }
        }

        info!(
            scanned = report.scanned,
            failed = report.failures.len(),
            offsets = report.index.len(),
            matched = report.index.file_count(),
            "scan phase complete"
        );
        report
    }
}

/// Streams one file and finds the first offset of `lookup`.
///
/// Reading stops at the first chunk containing a match; the rest of the body
/// is dropped unread.
///
/// # Errors
///
/// Returns [`RemoteError`] if the request fails, the server answers with a
/// non-success status, or the stream breaks before a match or end of file.
#[instrument(skip(client, reference), fields(url = %reference.url()))]
pub async fn scan_file(
    client: &RemoteClient,
    reference: &RemoteFileReference,
    lookup: LookupCharacter,
    chunk_size: usize,
    mode: OffsetMode,
) -> Result<ScanOutcome, RemoteError> {
    let url = reference.url();
    let response = client.get(&url).await?;
    let mut stream = response.bytes_stream();
    let mut scanner = ChunkScanner::new(lookup.to_bytes(), chunk_size, mode);

    while let Some(frame) = stream.next().await {
        let frame = frame.map_err(|e| RemoteError::network(url.as_str(), e))?;
        if let Some(offset) = scanner.feed(&frame) {
            debug!(offset, bytes_scanned = scanner.bytes_scanned(), "match found");
            return Ok(ScanOutcome::found(reference.file_name(), offset));
        }
    }

    let outcome = match scanner.finish() {
        Some(offset) => {
            debug!(offset, bytes_scanned = scanner.bytes_scanned(), "match found in final chunk");
            ScanOutcome::found(reference.file_name(), offset)
        }
        None => {
            debug!(bytes_scanned = scanner.bytes_scanned(), "no match");
            ScanOutcome::not_found(reference.file_name())
        }
    };
    Ok(outcome)
}
