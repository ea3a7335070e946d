//! Sort lab report PDFs into per-lab, per-date directories.
//!
//! Report files follow the naming convention `<DATE>_<ID>_<LABNAME>.pdf`.
//! A preview pass copies every file from the source directory into a freshly reset
//! temporary tree `<temp>/<lab>/<date>/` and groups the files by lab name.
//! The commit pass repeats the same copy against the destination root.

mod commit;
mod filename;
mod preview;
mod session;
mod source;
mod staging;
mod types;

pub use commit::{MoveObserver, commit_files};
pub use filename::{FILE_EXTENSION, SEPARATOR, is_valid_file_name, lab_name};
pub use preview::build_preview;
pub use session::{LabSorter, State};
pub use source::{SourceFile, list_source_files};
pub use staging::{StagedCopy, copy_file, reset_directory, stage_directory, stage_file};
pub use types::{
    DEFAULT_DEST_DIR, DEFAULT_MOVE_DELAY, DEFAULT_TEMP_DIR, DEFAULT_UNPARSED_DIR, FolderRoots, GroupedTree, LabGroup,
    LabKey, SortOptions, UnparsedPolicy,
};
