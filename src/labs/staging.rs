//! Creating the `<root>/<lab>/<date>` directories and copying files into them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::date::DateStamp;
use crate::labs::source::SourceFile;
use crate::labs::types::{LabKey, SortOptions, UnparsedPolicy};
use crate::normalize_path;

/// A file copied into a staging root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedCopy {
    pub key: LabKey,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Delete the directory and everything in it if it exists, then create it empty.
///
/// The parent directory must exist.
///
/// # Errors
/// Returns an error if deleting or creating the directory fails.
pub fn reset_directory(path: &Path) -> anyhow::Result<PathBuf> {
    let path = normalize_path(path);
    if path.exists() {
        fs::remove_dir_all(&path).with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    fs::create_dir(&path).with_context(|| format!("Failed to create directory: {}", path.display()))?;
    Ok(path)
}

/// Create `target` and `target/date` if they do not exist yet.
///
/// Only one directory level is created for `target`,
/// so a staging root that does not exist is an error.
/// Returns the path of the date directory.
///
/// # Errors
/// Returns an error if a directory cannot be created.
pub fn stage_directory(target: &Path, date: &str) -> anyhow::Result<PathBuf> {
    let target = normalize_path(target);
    let date = normalize_path(Path::new(date));

    if !target.exists() {
        fs::create_dir(&target).with_context(|| format!("Failed to create directory: {}", target.display()))?;
    }

    let dated = target.join(date);
    if !dated.exists() {
        fs::create_dir(&dated).with_context(|| format!("Failed to create directory: {}", dated.display()))?;
    }

    Ok(dated)
}

/// Copy file contents, replacing the destination if it exists.
/// Returns the number of bytes copied.
///
/// # Errors
/// Returns an error if the copy fails.
pub fn copy_file(source: &Path, destination: &Path) -> anyhow::Result<u64> {
    fs::copy(normalize_path(source), normalize_path(destination)).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            destination.display()
        )
    })
}

/// Stage the lab and date directories for one file under `root` and copy the file there.
///
/// Returns `None` for unparsed files that are skipped.
///
/// # Errors
/// Returns an error if the file name is rejected or a filesystem operation fails.
pub fn stage_file(
    file: &SourceFile,
    root: &Path,
    date: &DateStamp,
    options: &SortOptions,
) -> anyhow::Result<Option<StagedCopy>> {
    let key = file.lab_key();
    let Some(dir_name) = options.target_dir_name(&key, &file.name)? else {
        return Ok(None);
    };

    let dated = stage_directory(&root.join(dir_name), &date.dir_name())?;
    let destination = dated.join(file.path.file_name().unwrap_or_else(|| file.name.as_ref()));
    let bytes = copy_file(&file.path, &destination)?;

    Ok(Some(StagedCopy {
        key,
        destination,
        bytes,
    }))
}

/// Fail before anything is touched if the file names cannot be staged with these options.
///
/// Unparsed files are refused with [`UnparsedPolicy::Error`],
/// and the unparsed directory must not share its name with a lab that has files.
pub(crate) fn check_file_names(files: &[SourceFile], options: &SortOptions) -> anyhow::Result<()> {
    options.validate()?;

    let unparsed: Vec<&str> = files
        .iter()
        .filter(|file| file.lab_key().is_unparsed())
        .map(|file| file.name.as_str())
        .collect();
    if unparsed.is_empty() {
        return Ok(());
    }

    match options.unparsed {
        UnparsedPolicy::Error => anyhow::bail!(
            "{} file name(s) do not contain a lab name:\n  {}",
            unparsed.len(),
            unparsed.join("\n  ")
        ),
        UnparsedPolicy::Bucket => {
            let bucket = LabKey::Lab(options.unparsed_dir.clone());
            if let Some(file) = files.iter().find(|file| file.lab_key() == bucket) {
                anyhow::bail!(
                    "Unparsed directory '{}' is also the lab name of {}",
                    options.unparsed_dir,
                    file.name
                );
            }
            Ok(())
        }
        UnparsedPolicy::Skip => Ok(()),
    }
}
