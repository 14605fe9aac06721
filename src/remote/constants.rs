//! Constants for remote requests (timeouts, scan chunking).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout between reads of a response (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Size of the fixed chunks a file is scanned in.
pub const SCAN_CHUNK_SIZE: usize = 4096;
