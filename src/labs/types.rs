use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::date::DateStamp;
use crate::labs::filename;

/// Name of the preview directory created under the source root.
pub const DEFAULT_TEMP_DIR: &str = "temp";

/// Name of the destination directory created next to the source root.
pub const DEFAULT_DEST_DIR: &str = "dest";

/// Directory name used for files whose name does not contain a lab.
pub const DEFAULT_UNPARSED_DIR: &str = "_unparsed";

/// Pause before each file is copied to the destination.
pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_secs(1);

/// Grouping key for a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LabKey {
    /// Lab name parsed from the file name.
    Lab(String),
    /// File name did not follow the naming convention,
    /// or the lab name is not usable as a directory name.
    Unparsed,
}

/// What to do with files whose name does not parse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnparsedPolicy {
    /// Copy them into a separate directory.
    #[default]
    Bucket,
    /// Leave them out of the preview and the move.
    Skip,
    /// Refuse to run before anything is copied.
    Error,
}

/// A group of files belonging to the same lab, in sorted file name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabGroup {
    pub key: LabKey,
    pub files: Vec<String>,
}

/// Lab groups in order of the first file seen for each lab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedTree {
    pub date: DateStamp,
    pub groups: Vec<LabGroup>,
}

/// Root directories used for sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRoots {
    /// Directory containing the report files.
    pub source: PathBuf,
    /// Preview directory. Deleted and recreated on every preview.
    pub temp: PathBuf,
    /// Final destination. Only ever added to.
    pub dest: PathBuf,
}

/// Options shared by the preview and the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    /// Fixed date for the date directories. Today's date is used when not set.
    pub date: Option<DateStamp>,
    /// Pause before each file is copied during the move.
    pub throttle: Duration,
    pub unparsed: UnparsedPolicy,
    /// Directory name for unparsed files when using [`UnparsedPolicy::Bucket`].
    pub unparsed_dir: String,
}

impl LabKey {
    /// Create the grouping key for a file name.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        match filename::lab_name(file_name) {
            Some(lab) if is_single_component(lab) => Self::Lab(lab.to_string()),
            _ => Self::Unparsed,
        }
    }

    #[must_use]
    pub const fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed)
    }
}

impl fmt::Display for LabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lab(name) => write!(f, "{name}"),
            Self::Unparsed => write!(f, "Unparsed"),
        }
    }
}

impl LabGroup {
    #[must_use]
    pub const fn new(key: LabKey) -> Self {
        Self {
            key,
            files: Vec::new(),
        }
    }

    /// Number of files in the group.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.files.len()
    }
}

impl fmt::Display for LabGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.count())
    }
}

impl GroupedTree {
    #[must_use]
    pub const fn new(date: DateStamp) -> Self {
        Self {
            date,
            groups: Vec::new(),
        }
    }

    /// Add a file to the group for `key`, creating the group at the end if it is new.
    pub fn insert(&mut self, key: LabKey, file_name: String) {
        if let Some(group) = self.groups.iter_mut().find(|group| group.key == key) {
            group.files.push(file_name);
        } else {
            let mut group = LabGroup::new(key);
            group.files.push(file_name);
            self.groups.push(group);
        }
    }

    #[must_use]
    pub fn get(&self, key: &LabKey) -> Option<&LabGroup> {
        self.groups.iter().find(|group| &group.key == key)
    }

    /// Total number of files over all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(LabGroup::count).sum()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for GroupedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        for group in &self.groups {
            writeln!(f, "{group}")?;
            for file in &group.files {
                writeln!(f, "  {file}")?;
            }
        }
        Ok(())
    }
}

impl FolderRoots {
    /// Create roots with the default temp and destination directories for the given source:
    /// `<source>/temp` and `<source>/../dest`.
    #[must_use]
    pub fn from_source(source: PathBuf) -> Self {
        let temp = source.join(DEFAULT_TEMP_DIR);
        let dest = source
            .parent()
            .map_or_else(|| source.join(DEFAULT_DEST_DIR), |parent| parent.join(DEFAULT_DEST_DIR));
        Self { source, temp, dest }
    }

    #[must_use]
    pub const fn new(source: PathBuf, temp: PathBuf, dest: PathBuf) -> Self {
        Self { source, temp, dest }
    }
}

impl SortOptions {
    /// Directory name under a staging root for the given key.
    ///
    /// Returns `None` when the file should be left out.
    ///
    /// # Errors
    /// Returns an error for unparsed files with [`UnparsedPolicy::Error`],
    /// or with [`UnparsedPolicy::Bucket`] when the unparsed directory name is not valid.
    pub fn target_dir_name<'a>(&'a self, key: &'a LabKey, file_name: &str) -> anyhow::Result<Option<&'a str>> {
        match key {
            LabKey::Lab(name) => Ok(Some(name.as_str())),
            LabKey::Unparsed => match self.unparsed {
                UnparsedPolicy::Bucket => {
                    self.validate()?;
                    Ok(Some(self.unparsed_dir.as_str()))
                }
                UnparsedPolicy::Skip => Ok(None),
                UnparsedPolicy::Error => anyhow::bail!("File name does not contain a lab name: {file_name}"),
            },
        }
    }

    /// Check that the unparsed directory name stays inside a staging root.
    ///
    /// # Errors
    /// Returns an error if the name is not a single plain directory name.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_single_component(&self.unparsed_dir) {
            anyhow::bail!(
                "Unparsed directory must be a plain directory name, got '{}'",
                self.unparsed_dir
            );
        }
        Ok(())
    }

    /// Date for the date directories: the fixed date if set, otherwise today.
    #[must_use]
    pub fn date_stamp(&self) -> DateStamp {
        self.date.unwrap_or_else(DateStamp::today)
    }
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            date: None,
            throttle: DEFAULT_MOVE_DELAY,
            unparsed: UnparsedPolicy::default(),
            unparsed_dir: DEFAULT_UNPARSED_DIR.to_string(),
        }
    }
}

impl fmt::Display for UnparsedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bucket => write!(f, "bucket"),
            Self::Skip => write!(f, "skip"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Check that a name is exactly one normal path component, so it stays inside the staging root.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}
