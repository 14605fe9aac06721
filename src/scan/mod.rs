//! Scan, group and select.
//!
//! Each listed file is streamed in fixed-size chunks until the lookup
//! character shows up. Files are grouped by the offset of that first match in
//! an [`OffsetIndex`] and the group with the smallest offset is selected for
//! download.
//!
//! # Offset semantics
//!
//! With [`OffsetMode::Chunk`] (the default) the offset is the position of the
//! match inside the chunk it was found in, so a match at byte 4099 of a file
//! ranks like a match at byte 3. [`OffsetMode::Absolute`] reports the byte
//! position from the start of the file instead.

mod chunk;
mod index;
mod lookup;
mod scanner;
mod select;

pub use chunk::{ChunkScanner, OffsetMode};
pub use index::{OffsetIndex, ScanOutcome};
pub use lookup::{LookupCharacter, LookupError};
pub use scanner::{ConcurrentScanner, ScanReport, scan_file};
pub use select::{Selection, select};
