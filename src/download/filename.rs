//! Local file naming for downloaded files.

use std::path::{Path, PathBuf};

use super::error::DownloadError;

/// Resolves where a listed file is written.
///
/// The listed name is used unchanged as a base name inside `output_dir`
/// (or the working directory when `output_dir` is `None`). Names that would
/// escape that directory are rejected.
///
/// # Errors
///
/// Returns [`DownloadError::InvalidFileName`] for empty names, `.`/`..`,
/// names containing a path separator or a NUL byte.
pub fn local_path(output_dir: Option<&Path>, file_name: &str) -> Result<PathBuf, DownloadError> {
    validate_file_name(file_name)?;
    Ok(match output_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    })
}

fn validate_file_name(name: &str) -> Result<(), DownloadError> {
    if name.trim().is_empty() {
        return Err(DownloadError::invalid_file_name(name, "name is empty"));
    }
    if name == "." || name == ".." {
        return Err(DownloadError::invalid_file_name(
            name,
            "name refers to a directory",
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(DownloadError::invalid_file_name(
            name,
            "contains a path separator",
        ));
    }
    if name.contains('\0') {
        return Err(DownloadError::invalid_file_name(name, "contains a NUL byte"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_in_working_directory() {
        assert_eq!(local_path(None, "a.txt").unwrap(), PathBuf::from("a.txt"));
    }

    #[test]
    fn test_local_path_in_output_dir() {
        let path = local_path(Some(Path::new("/srv/out")), "a.txt").unwrap();
        assert_eq!(path, PathBuf::from("/srv/out/a.txt"));
    }

    #[test]
    fn test_local_path_keeps_spaces_and_dots() {
        let path = local_path(None, "my report.v2.txt").unwrap();
        assert_eq!(path, PathBuf::from("my report.v2.txt"));
    }

    #[test]
    fn test_local_path_rejects_traversal() {
        for name in ["", "  ", ".", "..", "../x", "dir/x", "dir\\x", "a\0b"] {
            let result = local_path(None, name);
            assert!(
                matches!(result, Err(DownloadError::InvalidFileName { .. })),
                "expected {name:?} to be rejected"
            );
        }
    }
}
