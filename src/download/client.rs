//! Streaming download of a single remote file to disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::error::DownloadError;
use super::filename::local_path;
use crate::listing::RemoteFileReference;
use crate::remote::{RemoteClient, RemoteError};

/// A file written to local storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// File name as listed by the remote server.
    pub file_name: String,
    /// Where the file was written.
    pub path: PathBuf,
    /// Bytes written.
    pub bytes: u64,
}

/// Downloads `reference` into `output_dir`, replacing any existing file.
///
/// The body is streamed into a hidden part file next to the target, which is
/// renamed over the target only once the whole body has been written. The
/// part file is removed on every other exit, including when the task is
/// aborted, so an existing file with the same name is left untouched.
///
/// # Errors
///
/// Returns [`DownloadError::Remote`] for request, status or stream failures,
/// [`DownloadError::InvalidFileName`] when the listed name is unusable and
/// [`DownloadError::Io`] when the file cannot be created, written or renamed.
#[instrument(skip(client, reference), fields(url = %reference.url()))]
pub async fn download_file(
    client: &RemoteClient,
    reference: &RemoteFileReference,
    output_dir: Option<&Path>,
) -> Result<DownloadedFile, DownloadError> {
    let file_path = local_path(output_dir, reference.file_name())?;
    let url = reference.url();

    let response = client.get(&url).await?;

    let part = PartFile::new(&file_path);
    let mut file = File::create(part.path())
        .await
        .map_err(|e| DownloadError::io(part.path(), e))?;

    let bytes = stream_to_file(&mut file, response, &url, part.path()).await?;
    drop(file);

    tokio::fs::rename(part.path(), &file_path)
        .await
        .map_err(|e| DownloadError::io(file_path.clone(), e))?;
    part.disarm();

    info!(path = %file_path.display(), bytes, "download complete");

    Ok(DownloadedFile {
        file_name: reference.file_name().to_string(),
        path: file_path,
        bytes,
    })
}

static NEXT_PART_ID: AtomicU64 = AtomicU64::new(0);

/// In-progress download target, removed on drop unless disarmed.
///
/// Drop runs on early returns and when the owning task is aborted, so no
/// truncated file outlives a failed download.
#[derive(Debug)]
struct PartFile {
    path: PathBuf,
    armed: bool,
}

impl PartFile {
    fn new(target: &Path) -> Self {
        let name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = NEXT_PART_ID.fetch_add(1, Ordering::Relaxed);
        let part_name = format!(".{name}.{}-{id}.part", std::process::id());
        Self {
            path: target.with_file_name(part_name),
            armed: true,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if self.armed {
            debug!(path = %self.path.display(), "cleaning up partial file");
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| RemoteError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
