//! Selection of the files to download.

use super::index::OffsetIndex;

/// Files chosen for download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// The winning offset, `None` when no file matched.
    pub offset: Option<u64>,
    /// Winning file names, sorted lexicographically ascending.
    pub files: Vec<String>,
}

impl Selection {
    /// Returns true if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Picks the group of files with the smallest offset.
///
/// An empty index selects nothing. With a single offset, that offset wins
/// whatever its value.
#[must_use]
pub fn select(index: &OffsetIndex) -> Selection {
    match index.earliest() {
        Some((offset, files)) => {
            let mut files: Vec<String> = files.iter().cloned().collect();
            files.sort();
            Selection {
                offset: Some(offset),
                files,
            }
        }
        None => Selection::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanOutcome;

    fn index_of(outcomes: &[(&str, Option<u64>)]) -> OffsetIndex {
        outcomes
            .iter()
            .map(|(name, offset)| ScanOutcome {
                file_name: (*name).to_string(),
                offset: *offset,
            })
            .collect()
    }

    #[test]
    fn test_select_empty_index_selects_nothing() {
        let selection = select(&OffsetIndex::new());
        assert!(selection.is_empty());
        assert_eq!(selection.offset, None);
    }

    #[test]
    fn test_select_single_entry_regardless_of_offset() {
        let index = index_of(&[("only.txt", Some(4000))]);
        let selection = select(&index);
        assert_eq!(selection.offset, Some(4000));
        assert_eq!(selection.files, vec!["only.txt"]);
    }

    #[test]
    fn test_select_shared_offset_sorted() {
        let index = index_of(&[("c.txt", Some(3)), ("b.txt", None), ("a.txt", Some(3))]);
        let selection = select(&index);
        assert_eq!(selection.files, vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_select_smallest_offset_wins() {
        let index = index_of(&[("late.txt", Some(5)), ("early.txt", Some(2))]);
        let selection = select(&index);
        assert_eq!(selection.offset, Some(2));
        assert_eq!(selection.files, vec!["early.txt"]);
    }

    #[test]
    fn test_select_numeric_not_lexicographic_offsets() {
        let index = index_of(&[("ten", Some(10)), ("nine", Some(9))]);
        assert_eq!(select(&index).files, vec!["nine"]);
    }
}
