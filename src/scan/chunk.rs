//! Fixed-size chunk matching over a byte stream.
//!
//! Network reads arrive in arbitrary frames; [`ChunkScanner`] regroups them
//! into chunks of exactly `chunk_size` bytes (the final chunk may be shorter)
//! so the offsets it reports depend only on file content.

use std::fmt;
use std::str::FromStr;

/// How a match position is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetMode {
    /// Position inside the chunk that contained the match.
    #[default]
    Chunk,
    /// Byte position from the start of the file.
    Absolute,
}

impl OffsetMode {
    /// Lowercase name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chunk => "chunk",
            Self::Absolute => "absolute",
        }
    }
}

impl FromStr for OffsetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chunk" => Ok(Self::Chunk),
            "absolute" => Ok(Self::Absolute),
            other => Err(format!(
                "unknown offset mode '{other}' (expected 'chunk' or 'absolute')"
            )),
        }
    }
}

impl fmt::Display for OffsetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incremental first-match search over fixed-size chunks.
///
/// In [`OffsetMode::Chunk`] a pattern is only found when it lies entirely in
/// one chunk. In [`OffsetMode::Absolute`] the tail of the previous chunk is
/// carried over so a multi-byte pattern straddling a boundary is still found.
#[derive(Debug)]
pub struct ChunkScanner {
    needle: Vec<u8>,
    chunk_size: usize,
    mode: OffsetMode,
    pending: Vec<u8>,
    carry: Vec<u8>,
    consumed: u64,
}

impl ChunkScanner {
    /// Creates a scanner for `needle`.
    ///
    /// `needle` must be non-empty and `chunk_size` at least one byte.
    #[must_use]
    pub fn new(needle: Vec<u8>, chunk_size: usize, mode: OffsetMode) -> Self {
        debug_assert!(!needle.is_empty());
        let chunk_size = chunk_size.max(1);
        Self {
            needle,
            chunk_size,
            mode,
            pending: Vec::with_capacity(chunk_size),
            carry: Vec::new(),
            consumed: 0,
        }
    }

    /// Feeds the next frame of the stream.
    ///
    /// Returns the offset of the first match as soon as a completed chunk
    /// contains one. Bytes after the matching chunk are never examined.
    pub fn feed(&mut self, mut data: &[u8]) -> Option<u64> {
        while !data.is_empty() {
            let take = (self.chunk_size - self.pending.len()).min(data.len());
            self.pending.extend_from_slice(&data[..take]);
            data = &data[take..];

            if self.pending.len() == self.chunk_size
                && let Some(offset) = self.scan_pending()
            {
                return Some(offset);
            }
        }
        None
    }

    /// Scans the final, possibly short, chunk at end of stream.
    pub fn finish(&mut self) -> Option<u64> {
        if self.pending.is_empty() {
            return None;
        }
        self.scan_pending()
    }

    /// Total bytes handed to chunk matching so far.
    #[must_use]
    pub fn bytes_scanned(&self) -> u64 {
        self.consumed
    }

    fn scan_pending(&mut self) -> Option<u64> {
        let chunk_len = self.pending.len();
        let found = match self.mode {
            OffsetMode::Chunk => find(&self.pending, &self.needle).map(|pos| pos as u64),
            OffsetMode::Absolute => {
                let mut window = std::mem::take(&mut self.carry);
                let carried = window.len() as u64;
                window.extend_from_slice(&self.pending);
                let found = find(&window, &self.needle)
                    .map(|pos| self.consumed - carried + pos as u64);
                let keep = self.needle.len() - 1;
                self.carry = window.split_off(window.len().saturating_sub(keep));
                found
            }
        };
        self.consumed += chunk_len as u64;
        self.pending.clear();
        found
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() == 1 {
        return haystack.iter().position(|b| *b == needle[0]);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(content: &[u8], needle: &[u8], chunk_size: usize, mode: OffsetMode) -> Option<u64> {
        let mut scanner = ChunkScanner::new(needle.to_vec(), chunk_size, mode);
        scanner.feed(content).or_else(|| scanner.finish())
    }

    #[test]
    fn test_match_in_first_chunk() {
        assert_eq!(scan_all(b"abczdef", b"z", 4096, OffsetMode::Chunk), Some(3));
        assert_eq!(scan_all(b"abczdef", b"z", 4096, OffsetMode::Absolute), Some(3));
    }

    #[test]
    fn test_no_match_returns_none() {
        assert_eq!(scan_all(b"abcdef", b"z", 4, OffsetMode::Chunk), None);
        assert_eq!(scan_all(b"", b"z", 4, OffsetMode::Chunk), None);
    }

    #[test]
    fn test_chunk_mode_reports_position_within_chunk() {
        // chunks: "abcd" "efzh"
        assert_eq!(scan_all(b"abcdefzh", b"z", 4, OffsetMode::Chunk), Some(2));
    }

    #[test]
    fn test_absolute_mode_reports_position_from_start() {
        assert_eq!(scan_all(b"abcdefzh", b"z", 4, OffsetMode::Absolute), Some(6));
    }

    #[test]
    fn test_match_in_short_final_chunk() {
        // chunks: "abcd" "ez"
        assert_eq!(scan_all(b"abcdez", b"z", 4, OffsetMode::Chunk), Some(1));
        assert_eq!(scan_all(b"abcdez", b"z", 4, OffsetMode::Absolute), Some(5));
    }

    #[test]
    fn test_frames_are_regrouped_into_fixed_chunks() {
        let mut scanner = ChunkScanner::new(b"z".to_vec(), 4, OffsetMode::Chunk);
        assert_eq!(scanner.feed(b"ab"), None);
        assert_eq!(scanner.feed(b"cde"), None);
        assert_eq!(scanner.bytes_scanned(), 4);
        assert_eq!(scanner.feed(b"z"), None);
        // "ez" is only matched once the stream ends
        assert_eq!(scanner.finish(), Some(1));
    }

    #[test]
    fn test_first_match_stops_scan() {
        let mut scanner = ChunkScanner::new(b"z".to_vec(), 2, OffsetMode::Chunk);
        assert_eq!(scanner.feed(b"azzzzzzz"), Some(1));
        assert_eq!(scanner.bytes_scanned(), 2);
    }

    #[test]
    fn test_multibyte_straddling_boundary() {
        let content = "abcé".as_bytes(); // 'é' spans bytes 3..5
        assert_eq!(scan_all(content, "é".as_bytes(), 4, OffsetMode::Chunk), None);
        assert_eq!(
            scan_all(content, "é".as_bytes(), 4, OffsetMode::Absolute),
            Some(3)
        );
    }

    #[test]
    fn test_offset_mode_parse_and_display() {
        assert_eq!("chunk".parse::<OffsetMode>(), Ok(OffsetMode::Chunk));
        assert_eq!("ABSOLUTE".parse::<OffsetMode>(), Ok(OffsetMode::Absolute));
        assert!("bytes".parse::<OffsetMode>().is_err());
        assert_eq!(OffsetMode::default().to_string(), "chunk");
    }
}
