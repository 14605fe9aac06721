//! Per-request lifecycle stages.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::debug;

/// Where a request is in its lifecycle.
///
/// `Idle → Listing → Scanning → Selecting → Downloading → Responded`, with
/// `Failed` reachable from any stage that talks to the remote server.
/// `Responded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PipelineStage {
    /// Request accepted, nothing started.
    Idle = 0,
    /// Fetching and parsing the listing.
    Listing = 1,
    /// Scanning candidate files.
    Scanning = 2,
    /// Picking the earliest offset group.
    Selecting = 3,
    /// Downloading the selected files.
    Downloading = 4,
    /// Finished successfully.
    Responded = 5,
    /// Finished with an error.
    Failed = 6,
}

impl PipelineStage {
    /// Returns true for `Responded` and `Failed`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Responded | Self::Failed)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Listing,
            2 => Self::Scanning,
            3 => Self::Selecting,
            4 => Self::Downloading,
            5 => Self::Responded,
            _ => Self::Failed,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Listing => "listing",
            Self::Scanning => "scanning",
            Self::Selecting => "selecting",
            Self::Downloading => "downloading",
            Self::Responded => "responded",
            Self::Failed => "failed",
        })
    }
}

/// Shared view of a request's current stage.
///
/// The pipeline advances it; the deadline wrapper reads it to report which
/// stage was interrupted.
#[derive(Debug, Clone)]
pub struct StageTracker(Arc<AtomicU8>);

impl Default for StageTracker {
    fn default() -> Self {
        Self(Arc::new(AtomicU8::new(PipelineStage::Idle as u8)))
    }
}

impl StageTracker {
    /// Creates a tracker in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage.
    #[must_use]
    pub fn current(&self) -> PipelineStage {
        PipelineStage::from_u8(self.0.load(Ordering::SeqCst))
    }

    /// Moves to `next`. Terminal stages are never left.
    pub fn advance(&self, next: PipelineStage) {
        let previous = self.current();
        if previous.is_terminal() {
            return;
        }
        self.0.store(next as u8, Ordering::SeqCst);
        debug!(from = %previous, to = %next, "pipeline stage");
    }
}
