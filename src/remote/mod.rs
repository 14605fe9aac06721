//! Access to the remote file server.
//!
//! Every outbound request of the service goes through [`RemoteClient`]: the
//! directory listing fetch, the per-file scan reads and the per-file
//! downloads. Failures are reported as [`RemoteError`].

mod client;
pub mod constants;
mod error;

pub use client::{RemoteClient, file_url, parse_base_url};
pub use error::RemoteError;
