use std::io::Write;
use std::path::Path;
use std::time::Instant;

use colored::Colorize;
use indicatif::ProgressBar;

use lab_sort::labs::{GroupedTree, LabKey, LabSorter, MoveObserver, SourceFile};
use lab_sort::{get_relative_path_or_filename, print_bold, print_warning};

use crate::Args;
use crate::config::Config;
use crate::logger::FileLogger;

#[cfg(not(test))]
const PROGRESS_BAR_CHARS: &str = "=> ";

#[cfg(not(test))]
const PROGRESS_BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:60.cyan/blue} {pos}/{len} {msg}";

/// Command line front end: preview, confirm, move.
pub struct LabSort {
    sorter: LabSorter,
    config: Config,
    logger: Option<FileLogger>,
}

/// Shows move progress and writes copied files to the log.
struct MoveProgress<'a> {
    progress_bar: ProgressBar,
    logger: Option<&'a mut FileLogger>,
    dest_root: &'a Path,
    verbose: bool,
    index: String,
}

impl LabSort {
    pub fn new(args: Args) -> anyhow::Result<Self> {
        let config = Config::from_args(args)?;
        let source = lab_sort::resolve_input_path(config.source.as_deref())?;
        let roots = config.folder_roots(source)?;
        if config.debug {
            eprintln!("{config}");
            eprintln!("Roots: {roots:#?}");
        }

        let logger = if config.log {
            let mut logger = FileLogger::new()?;
            logger.log_init(&roots, &config);
            if config.verbose {
                println!("Logging to: {}", logger.path().display());
            }
            Some(logger)
        } else {
            None
        };

        let sorter = LabSorter::new(roots, config.sort_options());
        Ok(Self { sorter, config, logger })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let tree = match self.sorter.preview() {
            Ok(tree) => tree.clone(),
            Err(error) => {
                if let Some(logger) = self.logger.as_mut() {
                    logger.log_failure("preview", &error);
                }
                return Err(error);
            }
        };
        if let Some(logger) = self.logger.as_mut() {
            logger.log_preview(&tree);
        }

        if tree.is_empty() {
            println!("No files found in {}", self.sorter.roots().source.display());
            return Ok(());
        }

        print_tree(&tree);
        if self.config.verbose {
            println!(
                "Preview copied to: {}",
                self.sorter.roots().temp.display().to_string().cyan()
            );
        }

        if self.config.dryrun {
            return Ok(());
        }

        println!(
            "{} Move to: {}",
            "→".green(),
            self.sorter.roots().dest.display()
        );
        if !self.confirm()? {
            println!("Skipped");
            return Ok(());
        }

        self.move_files()
    }

    fn confirm(&self) -> anyhow::Result<bool> {
        if self.config.auto {
            return Ok(true);
        }
        print!("{}", "Move files to destination? (y/n): ".magenta());
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    }

    fn move_files(&mut self) -> anyhow::Result<()> {
        let start = Instant::now();
        let dest_root = self.sorter.roots().dest.clone();
        let result = {
            let mut progress = MoveProgress::new(self.logger.as_mut(), &dest_root, self.config.verbose);
            let result = self.sorter.commit(&mut progress);
            if result.is_ok() {
                progress.progress_bar.finish_and_clear();
            } else {
                progress.progress_bar.abandon();
            }
            result
        };

        match result {
            Ok(copied) => {
                if let Some(logger) = self.logger.as_mut() {
                    logger.log_done(copied, start.elapsed());
                }
                print_bold!("Move labs completed");
                Ok(())
            }
            Err(error) => {
                if let Some(logger) = self.logger.as_mut() {
                    logger.log_failure("move", &error);
                }
                Err(error)
            }
        }
    }
}

impl<'a> MoveProgress<'a> {
    fn new(logger: Option<&'a mut FileLogger>, dest_root: &'a Path, verbose: bool) -> Self {
        Self {
            progress_bar: create_progress_bar(),
            logger,
            dest_root,
            verbose,
            index: String::new(),
        }
    }
}

impl MoveObserver for MoveProgress<'_> {
    fn file_started(&mut self, index: usize, total: usize, file: &SourceFile) {
        if index == 0 {
            self.progress_bar.set_length(total as u64);
        }
        self.index = format!("[{}/{total}]", index + 1);
        self.progress_bar.set_message(file.name.clone());
    }

    fn file_copied(&mut self, file: &SourceFile, destination: &Path) {
        self.progress_bar.inc(1);
        if self.verbose {
            self.progress_bar.println(format!(
                "{} {} {}",
                file.name,
                "→".green(),
                get_relative_path_or_filename(destination, self.dest_root)
            ));
        }
        if let Some(logger) = self.logger.as_mut() {
            logger.log_copy(&self.index, &file.path, destination);
        }
    }

    fn completed(&mut self, copied: usize) {
        self.progress_bar.set_position(copied as u64);
    }
}

/// Print lab groups with file counts and the files under each group.
fn print_tree(tree: &GroupedTree) {
    print_bold!("{}", tree.date);
    for group in &tree.groups {
        let label = format!("{group}");
        match group.key {
            LabKey::Lab(_) => println!("{}", label.cyan().bold()),
            LabKey::Unparsed => print_warning!("{label}"),
        }
        for file in &group.files {
            println!("  {file}");
        }
    }
    println!(
        "{} file(s) in {} group(s)",
        tree.file_count(),
        tree.groups.len()
    );
}

/// Create a progress bar that is hidden during tests.
fn create_progress_bar() -> ProgressBar {
    #[cfg(test)]
    {
        ProgressBar::hidden()
    }
    #[cfg(not(test))]
    {
        let progress_bar = ProgressBar::new(0);
        if let Ok(style) = indicatif::ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
            progress_bar.set_style(style.progress_chars(PROGRESS_BAR_CHARS));
        }
        progress_bar
    }
}
