//! Service configuration.
//!
//! [`ServiceConfig`] holds every tunable of the pipeline and the HTTP client.
//! The binary builds it from command-line flags; library users and tests
//! build it directly, starting from [`ServiceConfig::default`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::remote::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, SCAN_CHUNK_SIZE};
use crate::scan::OffsetMode;

/// Minimum allowed concurrency value.
pub const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 100;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Largest accepted scan chunk (1 MiB).
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Default deadline covering a whole request (5 minutes).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Errors produced when validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Invalid scan chunk size provided.
    #[error("invalid chunk size {value}: must be between 1 and {MAX_CHUNK_SIZE} bytes")]
    InvalidChunkSize {
        /// The invalid value that was provided.
        value: usize,
    },

    /// A timeout of zero seconds was provided.
    #[error("{name} must be at least one second")]
    ZeroTimeout {
        /// Which timeout was zero.
        name: &'static str,
    },
}

/// Settings shared by every request the service handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Maximum tasks in flight per phase of a request.
    pub concurrency: usize,
    /// Size of the fixed chunks files are scanned in.
    pub chunk_size: usize,
    /// How match offsets are measured.
    pub offset_mode: OffsetMode,
    /// Directory downloads are written to; the working directory when `None`.
    pub output_dir: Option<PathBuf>,
    /// Deadline for a whole request, all phases included.
    pub request_timeout: Duration,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Longest pause between reads of a remote response, in seconds.
    pub read_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            chunk_size: SCAN_CHUNK_SIZE,
            offset_mode: OffsetMode::default(),
            output_dir: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Checks every value is within range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&self.concurrency) {
            return Err(ConfigError::InvalidConcurrency {
                value: self.concurrency,
            });
        }
        if !(1..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(ConfigError::InvalidChunkSize {
                value: self.chunk_size,
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: "request timeout",
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                name: "connect timeout",
            });
        }
        if self.read_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                name: "read timeout",
            });
        }
        Ok(())
    }
}
