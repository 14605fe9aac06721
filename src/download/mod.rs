//! Download of the selected files to local storage.
//!
//! This module streams remote files straight to disk, so large files are
//! never held in memory.
//!
//! # Example
//!
//! ```no_run
//! use charfetch_core::download::ConcurrentDownloader;
//! use charfetch_core::listing::RemoteFileReference;
//! use charfetch_core::remote::RemoteClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RemoteClient::new()?;
//! let downloader = ConcurrentDownloader::new(client, 10, None);
//! let files = [RemoteFileReference::new("http://localhost:8080", "a.txt")];
//! let report = downloader.download_all(&files).await;
//! println!("Downloaded: {:?}", report.paths());
//! # Ok(())
//! # }
//! ```

mod client;
mod engine;
mod error;
mod filename;

pub use client::{DownloadedFile, download_file};
pub use engine::{ConcurrentDownloader, DownloadReport};
pub use error::DownloadError;
pub use filename::local_path;
