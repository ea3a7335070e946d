pub mod config;
pub mod date;
pub mod labs;

use std::env;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::Command;
use clap_complete::Shell;
use colored::{ColoredString, Colorize};

pub use config::config_path;

/// Format bool value as a coloured string.
#[must_use]
pub fn colorize_bool(value: bool) -> ColoredString {
    if value { "true".green() } else { "false".red() }
}

/// Resolve the source directory to an absolute, canonical path.
///
/// An empty or missing path means the current working directory.
/// ```rust
/// use std::path::Path;
/// use lab_sort::resolve_input_path;
///
/// let absolute_path = resolve_input_path(Some(Path::new("src"))).unwrap();
/// assert!(absolute_path.is_absolute());
/// ```
pub fn resolve_input_path(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path.filter(|path| !path.to_string_lossy().trim().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().context("Failed to get current working directory")?,
    };
    dunce::canonicalize(&path)
        .with_context(|| format!("Input path does not exist or is not accessible: '{}'", path.display()))
}

/// Resolve a path that might not exist yet to an absolute path.
///
/// Relative paths are joined to the current working directory and normalized.
/// The deepest existing ancestor is canonicalized, so symlinks are followed,
/// and the missing components are appended after it.
///
/// # Errors
/// Returns an error if the current working directory cannot be read.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    let absolute = normalize_path(&absolute);

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = dunce::canonicalize(existing) {
            return Ok(missing
                .iter()
                .rev()
                .fold(canonical, |resolved, part| resolved.join(part)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }
}

/// Lexically normalize a path for the host filesystem.
///
/// Drops `.` components and redundant separators, and folds `..` into the preceding
/// normal component where there is one. Does not touch the filesystem,
/// so the path does not need to exist.
///
/// ```rust
/// use std::path::Path;
/// use lab_sort::normalize_path;
///
/// assert_eq!(normalize_path(Path::new("root/./lab//2024-01-01")), Path::new("root/lab/2024-01-01"));
/// assert_eq!(normalize_path(Path::new("root/lab/../other")), Path::new("root/other"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in dunce::simplified(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Gets the relative path or filename from a full path based on a root directory.
///
/// If the full path is within the root directory, the function returns the relative path.
/// Otherwise, it returns just the filename. If the filename cannot be determined, the
/// full path is returned.
///
/// ```rust
/// use std::path::Path;
/// use lab_sort::get_relative_path_or_filename;
///
/// let root = Path::new("/root/dir");
/// let full_path = root.join("Acme/2024-01-01");
/// assert_eq!(get_relative_path_or_filename(&full_path, root), "Acme/2024-01-01");
/// ```
#[must_use]
pub fn get_relative_path_or_filename(full_path: &Path, root: &Path) -> String {
    if full_path == root {
        return full_path.file_name().unwrap_or_default().to_string_lossy().to_string();
    }
    full_path.strip_prefix(root).map_or_else(
        |_| {
            full_path.file_name().map_or_else(
                || full_path.display().to_string(),
                |name| name.to_string_lossy().to_string(),
            )
        },
        |relative_path| relative_path.display().to_string(),
    )
}

/// Convert `OsStr` to String with invalid Unicode handling.
pub fn os_str_to_string(name: &OsStr) -> String {
    name.to_str().map_or_else(
        || name.to_string_lossy().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

#[inline]
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        $crate::print_warning(&format!($($arg)*))
    };
}

#[inline]
pub fn print_bold(message: &str) {
    println!("{}", message.bold());
}

#[macro_export]
macro_rules! print_bold {
    ($($arg:tt)*) => {
        $crate::print_bold(&format!($($arg)*))
    };
}

/// Format duration as a human-readable string
#[must_use]
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

/// Write a shell completion script for the given shell to stdout.
pub fn generate_shell_completion(shell: Shell, mut command: Command, command_name: &str) {
    clap_complete::generate(shell, &mut command, command_name, &mut std::io::stdout());
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_resolve_input_path_valid() {
        let dir = tempdir().unwrap();
        let path = dir.path();
        let resolved = resolve_input_path(Some(path));
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_resolve_input_path_nonexistent() {
        let path = Path::new("nonexistent");
        let resolved = resolve_input_path(Some(path));
        assert!(resolved.is_err());
    }

    #[test]
    fn test_resolve_input_path_empty() {
        let path = Path::new("  \n");
        let resolved = resolve_input_path(Some(path));
        assert_eq!(resolved.unwrap(), dunce::canonicalize(env::current_dir().unwrap()).unwrap());
    }

    #[test]
    fn test_resolve_input_path_default() {
        let resolved = resolve_input_path(None);
        assert_eq!(resolved.unwrap(), dunce::canonicalize(env::current_dir().unwrap()).unwrap());
    }

    #[test]
    fn test_normalize_path_removes_current_dir() {
        assert_eq!(normalize_path(Path::new("./a/./b")), Path::new("a/b"));
    }

    #[test]
    fn test_normalize_path_folds_parent_dir() {
        assert_eq!(normalize_path(Path::new("a/b/../c")), Path::new("a/c"));
        assert_eq!(normalize_path(Path::new("../a")), Path::new("../a"));
    }

    #[test]
    fn test_normalize_path_empty_becomes_current_dir() {
        assert_eq!(normalize_path(Path::new("")), Path::new("."));
        assert_eq!(normalize_path(Path::new("a/..")), Path::new("."));
    }

    #[test]
    fn test_normalize_path_keeps_absolute_root() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x").join(".").join("y");
        assert_eq!(normalize_path(&path), dir.path().join("x").join("y"));
    }

    #[test]
    fn test_resolve_path_relative_to_current_dir() {
        let current = dunce::canonicalize(env::current_dir().unwrap()).unwrap();
        assert_eq!(resolve_path(Path::new(".")).unwrap(), current);
        assert_eq!(resolve_path(Path::new("missing/child")).unwrap(), current.join("missing/child"));
    }

    #[test]
    fn test_resolve_path_folds_parent_dir() {
        let dir = tempdir().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        fs::create_dir(root.join("a")).unwrap();
        assert_eq!(resolve_path(&root.join("a/../b/c")).unwrap(), root.join("b/c"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_path_follows_symlinks() {
        let dir = tempdir().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        fs::create_dir(root.join("target")).unwrap();
        std::os::unix::fs::symlink(root.join("target"), root.join("link")).unwrap();
        assert_eq!(resolve_path(&root.join("link")).unwrap(), root.join("target"));
        assert_eq!(resolve_path(&root.join("link/new")).unwrap(), root.join("target/new"));
    }

    #[test]
    fn test_get_relative_path_or_filename_outside_root() {
        let root = Path::new("/root/dir");
        assert_eq!(
            get_relative_path_or_filename(Path::new("/other/file.pdf"), root),
            "file.pdf"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(std::time::Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(65)), "1m 05s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 02m 05s");
    }
}
