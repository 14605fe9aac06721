//! Grouping of scanned files by first-match offset.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Result of scanning one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// File name as listed by the remote server.
    pub file_name: String,
    /// Offset of the first match, `None` if the character never appears.
    pub offset: Option<u64>,
}

impl ScanOutcome {
    /// Outcome for a file where the character was found at `offset`.
    pub fn found(file_name: impl Into<String>, offset: u64) -> Self {
        Self {
            file_name: file_name.into(),
            offset: Some(offset),
        }
    }

    /// Outcome for a file where the character never appears.
    pub fn not_found(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            offset: None,
        }
    }
}

/// Mapping from first-match offset to the files that matched there.
///
/// Built per request from the outcomes of the scan phase. A file name is
/// filed under at most one offset; if the same name is recorded twice the
/// smaller offset is kept. Files without a match are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    groups: BTreeMap<u64, BTreeSet<String>>,
    positions: HashMap<String, u64>,
}

impl OffsetIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one scan outcome.
    ///
    /// Returns `true` if the outcome changed the index.
    pub fn record(&mut self, outcome: ScanOutcome) -> bool {
        let Some(offset) = outcome.offset else {
            return false;
        };
        self.insert(outcome.file_name, offset)
    }

    /// Files `file_name` under `offset`.
    ///
    /// Returns `true` if the index changed.
    pub fn insert(&mut self, file_name: String, offset: u64) -> bool {
        if let Some(&existing) = self.positions.get(&file_name) {
            if existing <= offset {
                return false;
            }
            if let Some(group) = self.groups.get_mut(&existing) {
                group.remove(&file_name);
                if group.is_empty() {
                    self.groups.remove(&existing);
                }
            }
        }
        self.positions.insert(file_name.clone(), offset);
        self.groups.entry(offset).or_default().insert(file_name)
    }

    /// Number of distinct offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no file matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of files recorded across all offsets.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.positions.len()
    }

    /// Offset recorded for `file_name`.
    #[must_use]
    pub fn offset_of(&self, file_name: &str) -> Option<u64> {
        self.positions.get(file_name).copied()
    }

    /// Files recorded at `offset`, in lexicographic order.
    #[must_use]
    pub fn files_at(&self, offset: u64) -> Option<&BTreeSet<String>> {
        self.groups.get(&offset)
    }

    /// Recorded offsets in ascending order.
    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        self.groups.keys().copied()
    }

    /// The smallest offset and its files.
    #[must_use]
    pub fn earliest(&self) -> Option<(u64, &BTreeSet<String>)> {
        self.groups
            .first_key_value()
            .map(|(offset, files)| (*offset, files))
    }
}

impl FromIterator<ScanOutcome> for OffsetIndex {
    fn from_iter<T: IntoIterator<Item = ScanOutcome>>(iter: T) -> Self {
        let mut index = Self::new();
        for outcome in iter {
            index.record(outcome);
        }
        index
    }
}
