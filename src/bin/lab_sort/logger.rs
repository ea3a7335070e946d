use std::fs;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;

use lab_sort::labs::{FolderRoots, GroupedTree};

use crate::config::Config;

/// Simple file logger for sorting operations with buffered writes
pub struct FileLogger {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileLogger {
    /// Create a new file logger, writing to `~/logs/lab-sort/labsort_<timestamp>.log`
    pub(crate) fn new() -> Result<Self> {
        let log_dir = lab_sort::config::log_dir().context("Failed to get home directory")?;
        Self::in_directory(log_dir)
    }

    /// Create a new file logger in the given directory.
    pub(crate) fn in_directory(log_dir: &Path) -> Result<Self> {
        if !log_dir.exists() {
            fs::create_dir_all(log_dir).context("Failed to create log directory")?;
        }

        let log_path = log_dir.join(format!("labsort_{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S")));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path: log_path,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Log when starting the program
    pub(crate) fn log_init(&mut self, roots: &FolderRoots, config: &Config) {
        let _ = writeln!(
            self.writer,
            "[{}] INIT \"{}\"",
            Self::timestamp(),
            roots.source.display()
        );
        let _ = writeln!(self.writer, "  temp: {}", roots.temp.display());
        let _ = writeln!(self.writer, "  dest: {}", roots.dest.display());
        if let Some(date) = config.date {
            let _ = writeln!(self.writer, "  date: {date}");
        }
        let _ = writeln!(self.writer, "  delay: {} ms", config.delay.as_millis());
        let _ = writeln!(self.writer, "  unparsed: {}", config.unparsed);
        let _ = writeln!(self.writer, "  unparsed_dir: {}", config.unparsed_dir);
        let _ = writeln!(self.writer, "  dryrun: {}", config.dryrun);
        let _ = writeln!(self.writer, "  auto: {}", config.auto);
        let _ = self.writer.flush();
    }

    /// Log the preview grouping
    pub(crate) fn log_preview(&mut self, tree: &GroupedTree) {
        let _ = writeln!(
            self.writer,
            "[{}] PREVIEW {} file(s) in {} group(s)",
            Self::timestamp(),
            tree.file_count(),
            tree.groups.len()
        );
        for group in &tree.groups {
            let _ = writeln!(self.writer, "  {group}");
        }
        let _ = self.writer.flush();
    }

    /// Log a copied file
    pub(crate) fn log_copy(&mut self, file_index: &str, source: &Path, destination: &Path) {
        let _ = writeln!(
            self.writer,
            "[{}] COPY    {} - \"{}\" -> \"{}\"",
            Self::timestamp(),
            file_index,
            source.display(),
            destination.display()
        );
        let _ = self.writer.flush();
    }

    /// Log when an operation fails
    pub(crate) fn log_failure(&mut self, operation: &str, error: &anyhow::Error) {
        let _ = writeln!(
            self.writer,
            "[{}] ERROR   {} | {error:#}",
            Self::timestamp(),
            operation.to_uppercase(),
        );
        let _ = self.writer.flush();
    }

    /// Log when the move is done
    pub(crate) fn log_done(&mut self, copied: usize, duration: Duration) {
        let _ = writeln!(
            self.writer,
            "[{}] DONE    {copied} file(s) | Time: {}",
            Self::timestamp(),
            lab_sort::format_duration(duration)
        );
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod logger_tests {
    use super::*;

    use tempfile::tempdir;

    use lab_sort::date::DateStamp;
    use lab_sort::labs::LabKey;

    #[test]
    fn writes_records_to_log_file() {
        let dir = tempdir().unwrap();
        let mut logger = FileLogger::in_directory(&dir.path().join("logs")).unwrap();

        let mut tree = GroupedTree::new(DateStamp::parse("2024-01-01").unwrap());
        tree.insert(LabKey::Lab("Acme".to_string()), "x_1_Acme.pdf".to_string());
        logger.log_preview(&tree);
        logger.log_copy("[1/1]", Path::new("source/x_1_Acme.pdf"), Path::new("dest/Acme"));
        logger.log_failure("move", &anyhow::anyhow!("disk full"));
        logger.log_done(1, Duration::from_secs(2));

        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.contains("PREVIEW 1 file(s) in 1 group(s)"));
        assert!(content.contains("  Acme (1)"));
        assert!(content.contains("COPY    [1/1]"));
        assert!(content.contains("ERROR   MOVE | disk full"));
        assert!(content.contains("DONE    1 file(s) | Time: 2s"));
    }
}
