//! Error types for the request pipeline.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::stage::PipelineStage;
use crate::fanout::{TaskFailure, concat_failures};
use crate::remote::RemoteError;

/// Errors a request can end with.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The request values cannot be used (bad URL, bad lookup character).
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// The remote listing could not be fetched.
    #[error("remote file server unavailable: {0}")]
    RemoteUnavailable(#[source] RemoteError),

    /// One or more scan or download tasks failed.
    ///
    /// Files downloaded before the failure was reported stay on disk and
    /// are listed in `downloaded`.
    #[error("{} task(s) failed:{}", failure_count(.scan_failures, .download_failures), render_failures(.scan_failures, .download_failures))]
    TaskFailures {
        /// Files whose scan failed.
        scan_failures: Vec<TaskFailure>,
        /// Files whose download failed.
        download_failures: Vec<TaskFailure>,
        /// Files written successfully.
        downloaded: Vec<PathBuf>,
    },

    /// The request deadline elapsed.
    #[error("request deadline of {}s exceeded while {stage}", whole_secs(.timeout))]
    DeadlineExceeded {
        /// The configured deadline.
        timeout: Duration,
        /// The stage that was running when the deadline fired.
        stage: PipelineStage,
    },
}

impl PipelineError {
    /// Creates an invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Paths downloaded before the error, if any.
    #[must_use]
    pub fn downloaded(&self) -> &[PathBuf] {
        match self {
            Self::TaskFailures { downloaded, .. } => downloaded,
            _ => &[],
        }
    }
}

fn failure_count(scan: &[TaskFailure], download: &[TaskFailure]) -> usize {
    scan.len() + download.len()
}

fn whole_secs(timeout: &Duration) -> u64 {
    timeout.as_secs()
}

fn render_failures(scan: &[TaskFailure], download: &[TaskFailure]) -> String {
    let mut rendered = String::new();
    if !scan.is_empty() {
        rendered.push_str(" scan: ");
        rendered.push_str(&concat_failures(scan));
    }
    if !download.is_empty() {
        rendered.push_str(" download: ");
        rendered.push_str(&concat_failures(download));
    }
    rendered
}
