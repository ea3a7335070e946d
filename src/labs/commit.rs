use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::date::DateStamp;
use crate::labs::source::{SourceFile, list_source_files};
use crate::labs::staging::{check_file_names, stage_file};
use crate::labs::types::{FolderRoots, SortOptions};
use crate::normalize_path;

/// Receives progress from [`commit_files`].
///
/// All methods have empty default implementations.
pub trait MoveObserver {
    /// Called before the file at `index` is processed.
    fn file_started(&mut self, _index: usize, _total: usize, _file: &SourceFile) {}

    /// Called after a file has been copied.
    fn file_copied(&mut self, _file: &SourceFile, _destination: &Path) {}

    /// Called once after all files have been processed.
    fn completed(&mut self, _copied: usize) {}
}

impl MoveObserver for () {}

/// Copy all source files into `<dest>/<lab>/<date>/`.
///
/// The source directory is listed again, independent of any earlier preview.
/// Sleeps for the configured throttle before each file.
/// The destination root is never cleared. The first failure stops the batch
/// and files copied before it stay in place.
/// Returns the number of copied files.
///
/// # Errors
/// Returns an error if the source cannot be listed or a directory or copy operation fails.
pub fn commit_files(
    roots: &FolderRoots,
    date: &DateStamp,
    options: &SortOptions,
    observer: &mut impl MoveObserver,
) -> anyhow::Result<usize> {
    let files = list_source_files(&roots.source)?;
    check_file_names(&files, options)?;

    let dest_root = normalize_path(&roots.dest);
    let total = files.len();
    let mut copied = 0;
    for (index, file) in files.iter().enumerate() {
        observer.file_started(index, total, file);
        throttle(options.throttle);
        if let Some(copy) = stage_file(file, &dest_root, date, options)? {
            observer.file_copied(file, &copy.destination);
            copied += 1;
        }
    }

    observer.completed(copied);
    Ok(copied)
}

fn throttle(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
