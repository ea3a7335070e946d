use std::path::PathBuf;

use anyhow::Context;

use crate::labs::commit::{MoveObserver, commit_files};
use crate::labs::preview::build_preview;
use crate::labs::types::{DEFAULT_TEMP_DIR, FolderRoots, GroupedTree, SortOptions};

/// Where a sorting session is at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Nothing done yet. Moving is not allowed.
    Idle,
    /// Preview succeeded. Holds the grouping shown to the user.
    Previewed(GroupedTree),
    /// Files were copied to the destination.
    Moved { copied: usize },
}

/// Preview and move lab reports with explicit folder roots and state.
#[derive(Debug)]
pub struct LabSorter {
    roots: FolderRoots,
    options: SortOptions,
    state: State,
}

impl LabSorter {
    #[must_use]
    pub const fn new(roots: FolderRoots, options: SortOptions) -> Self {
        Self {
            roots,
            options,
            state: State::Idle,
        }
    }

    #[must_use]
    pub const fn roots(&self) -> &FolderRoots {
        &self.roots
    }

    #[must_use]
    pub const fn options(&self) -> &SortOptions {
        &self.options
    }

    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Moving is only allowed after a successful preview.
    #[must_use]
    pub const fn can_move(&self) -> bool {
        matches!(self.state, State::Previewed(_))
    }

    /// Grouping from the last successful preview.
    #[must_use]
    pub const fn grouping(&self) -> Option<&GroupedTree> {
        match &self.state {
            State::Previewed(tree) => Some(tree),
            _ => None,
        }
    }

    /// Change the source directory. Any earlier preview no longer applies.
    ///
    /// A temp root at the default location under the old source moves along with it.
    pub fn set_source(&mut self, source: PathBuf) {
        if self.roots.temp == self.roots.source.join(DEFAULT_TEMP_DIR) {
            self.roots.temp = source.join(DEFAULT_TEMP_DIR);
        }
        self.roots.source = source;
        if self.can_move() {
            self.state = State::Idle;
        }
    }

    /// Change the destination directory.
    pub fn set_dest(&mut self, dest: PathBuf) {
        self.roots.dest = dest;
    }

    /// Build the preview tree in the temp root and enable moving.
    ///
    /// A failed preview leaves the state unchanged.
    ///
    /// # Errors
    /// Returns an error if the session has already moved the files or the preview fails.
    pub fn preview(&mut self) -> anyhow::Result<&GroupedTree> {
        if matches!(self.state, State::Moved { .. }) {
            anyhow::bail!("Files have already been moved in this session");
        }
        let date = self.options.date_stamp();
        let tree = build_preview(&self.roots, &date, &self.options)?;
        self.state = State::Previewed(tree);
        self.grouping().context("Missing preview grouping")
    }

    /// Copy the files into the destination root.
    ///
    /// A failed move leaves the session in the previewed state.
    ///
    /// # Errors
    /// Returns an error if there is no preview yet or the move fails.
    pub fn commit(&mut self, observer: &mut impl MoveObserver) -> anyhow::Result<usize> {
        if !self.can_move() {
            anyhow::bail!("Preview the files before moving them");
        }
        let date = self.options.date_stamp();
        let copied = commit_files(&self.roots, &date, &self.options, observer)?;
        self.state = State::Moved { copied };
        Ok(copied)
    }
}
