//! Input tree walking.
//!
//! Finds every regular file below the input root. Symlinks are followed, so a
//! linked asset directory is copied as if it lived in the tree. Entries are
//! yielded sorted by file name within each directory, which keeps the log and
//! the run summary stable between runs.
//!
//! The root is validated up front by [`validate_input_root`]; nothing is
//! walked, and nothing is written, when it is missing.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Input directory does not exist: {0}")]
    InputNotFound(PathBuf),
    #[error("Input path is not a directory: {0}")]
    InputNotDirectory(PathBuf),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Check that `root` exists and is a directory.
pub fn validate_input_root(root: &Path) -> Result<(), ScanError> {
    if !root.exists() {
        return Err(ScanError::InputNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::InputNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Lazily list every regular file under `root`, recursively.
///
/// Directories themselves are not yielded. The first walk error ends the
/// caller's iteration with `Err`; there is no skipping of unreadable entries.
pub fn walk_files(
    root: &Path,
) -> Result<impl Iterator<Item = Result<PathBuf, ScanError>>, ScanError> {
    validate_input_root(root)?;
    let files = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(ScanError::from(e))),
        });
    Ok(files)
}
