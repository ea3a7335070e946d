use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use itertools::Itertools;

use crate::labs::filename;
use crate::labs::types::LabKey;
use crate::os_str_to_string;

/// A report file in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name used for parsing and display.
    pub name: String,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let name = os_str_to_string(path.file_name().unwrap_or_default());
        Self { path, name }
    }

    /// Whether the file name follows the `<date>_<id>_<lab>.pdf` convention.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        filename::is_valid_file_name(&self.name)
    }

    /// Parsed lab name, if any.
    #[must_use]
    pub fn lab_name(&self) -> Option<&str> {
        filename::lab_name(&self.name)
    }

    #[must_use]
    pub fn lab_key(&self) -> LabKey {
        LabKey::from_file_name(&self.name)
    }
}

/// List the regular files directly under `source`, sorted by file name.
///
/// Directories are ignored. Symlinks are followed.
///
/// # Errors
/// Returns an error if the directory or one of its entries cannot be read.
pub fn list_source_files(source: &Path) -> anyhow::Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(source).with_context(|| format!("Failed to read source directory: {}", source.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", source.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    Ok(files
        .into_iter()
        .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
        .map(SourceFile::new)
        .collect())
}

#[cfg(test)]
mod source_tests {
    use super::*;

    use std::fs::File;

    use tempfile::tempdir;

    #[test]
    fn lists_only_files_sorted_by_name() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("2024-01-02_002_Beta.pdf")).unwrap();
        File::create(dir.path().join("2024-01-01_001_Acme.pdf")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        fs::create_dir(dir.path().join("temp")).unwrap();
        fs::create_dir(dir.path().join("2024-01-00_000_Dir.pdf")).unwrap();

        let names: Vec<String> = list_source_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|file| file.name)
            .collect();
        assert_eq!(
            names,
            vec!["2024-01-01_001_Acme.pdf", "2024-01-02_002_Beta.pdf", "notes.txt"]
        );
    }

    #[test]
    fn sort_is_case_sensitive_byte_order() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b_1_Lab.pdf")).unwrap();
        File::create(dir.path().join("B_2_Lab.pdf")).unwrap();
        File::create(dir.path().join("a_1_Lab.pdf")).unwrap();

        let names: Vec<String> = list_source_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|file| file.name)
            .collect();
        assert_eq!(names, vec!["B_2_Lab.pdf", "a_1_Lab.pdf", "b_1_Lab.pdf"]);
    }

    #[test]
    fn empty_directory_gives_no_files() {
        let dir = tempdir().unwrap();
        assert!(list_source_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let result = list_source_files(&dir.path().join("missing"));
        assert!(result.is_err());
    }

    #[test]
    fn source_file_parses_name() {
        let file = SourceFile::new(PathBuf::from("/tmp/source/2024-01-01_001_Acme.pdf"));
        assert_eq!(file.name, "2024-01-01_001_Acme.pdf");
        assert!(file.is_valid());
        assert_eq!(file.lab_name(), Some("Acme"));
        assert_eq!(file.lab_key(), LabKey::Lab("Acme".to_string()));

        let file = SourceFile::new(PathBuf::from("/tmp/source/badname.pdf"));
        assert!(!file.is_valid());
        assert_eq!(file.lab_name(), None);
        assert!(file.lab_key().is_unparsed());
    }
}
