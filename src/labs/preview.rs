use std::path::PathBuf;

use crate::date::DateStamp;
use crate::labs::source::list_source_files;
use crate::labs::staging::{check_file_names, reset_directory, stage_file};
use crate::labs::types::{FolderRoots, GroupedTree, SortOptions};
use crate::resolve_path;

/// Copy all source files into a freshly reset temp tree and group them by lab.
///
/// The temp root is deleted and recreated first.
/// Groups are ordered by the first file seen for each lab in sorted file name order.
/// Any filesystem error aborts the pass and leaves whatever was already copied in place.
///
/// # Errors
/// Returns an error if the source cannot be listed, the temp root would contain the source
/// or overlap the destination, or a directory or copy operation fails.
pub fn build_preview(roots: &FolderRoots, date: &DateStamp, options: &SortOptions) -> anyhow::Result<GroupedTree> {
    let files = list_source_files(&roots.source)?;
    check_file_names(&files, options)?;

    let temp_root = resolve_temp_root(roots)?;
    reset_directory(&temp_root)?;

    let mut tree = GroupedTree::new(*date);
    for file in &files {
        if let Some(copy) = stage_file(file, &temp_root, date, options)? {
            tree.insert(copy.key, file.name.clone());
        }
    }

    Ok(tree)
}

/// Resolve the temp root to the real directory that gets reset.
///
/// Resetting it must not delete the source directory or anything in the destination,
/// so the resolved temp root may not contain the source and may not overlap the destination.
fn resolve_temp_root(roots: &FolderRoots) -> anyhow::Result<PathBuf> {
    let temp = resolve_path(&roots.temp)?;
    let source = resolve_path(&roots.source)?;
    let dest = resolve_path(&roots.dest)?;

    if source.starts_with(&temp) {
        anyhow::bail!(
            "Temp directory {} must not be the source directory or contain it",
            temp.display()
        );
    }
    if dest.starts_with(&temp) || temp.starts_with(&dest) {
        anyhow::bail!(
            "Temp directory {} must not overlap the destination directory {}",
            temp.display(),
            dest.display()
        );
    }
    Ok(temp)
}
