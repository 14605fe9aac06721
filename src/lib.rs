//! Charfetch Core Library
//!
//! Given the URL of a remote directory listing and a lookup character, this
//! library finds the files in which the character appears earliest and
//! downloads exactly those files.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`remote`] - HTTP client for the remote file server
//! - [`listing`] - Directory listing parsing
//! - [`scan`] - Concurrent first-match scanning, offset index and selection
//! - [`download`] - Concurrent streaming downloads to disk
//! - [`pipeline`] - Per-request orchestration of the phases above
//! - [`server`] - axum router exposing `POST /files`
//! - [`config`] - Service configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod fanout;
pub mod listing;
pub mod pipeline;
pub mod remote;
pub mod scan;
pub mod server;
mod user_agent;

// Re-export commonly used types
pub use config::{ConfigError, DEFAULT_CONCURRENCY, ServiceConfig};
pub use download::{ConcurrentDownloader, DownloadError};
pub use listing::{Listing, RemoteFileReference, parse_listing};
pub use pipeline::{Pipeline, PipelineError, PipelineOutput, RequestContext};
pub use remote::{RemoteClient, RemoteError};
pub use scan::{ConcurrentScanner, LookupCharacter, OffsetIndex, OffsetMode, ScanOutcome, select};
pub use server::{AppState, build_router};
