mod config;
mod labsort;
mod logger;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use lab_sort::labs::UnparsedPolicy;

use crate::labsort::LabSort;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Sort lab report PDFs into per-lab, per-date directories"
)]
pub(crate) struct Args {
    /// Optional source directory containing the report files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Destination directory [default: "dest" next to the source directory]
    #[arg(short = 'o', long, value_hint = clap::ValueHint::DirPath)]
    dest: Option<PathBuf>,

    /// Preview directory [default: "temp" inside the source directory]
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    temp: Option<PathBuf>,

    /// Pause before copying each file to the destination in milliseconds
    #[arg(short = 'w', long, name = "MS")]
    delay: Option<u64>,

    /// What to do with files that don't contain a lab name
    #[arg(short, long, value_enum, name = "POLICY")]
    unparsed: Option<UnparsedPolicy>,

    /// Directory name for files that don't contain a lab name
    #[arg(long, name = "NAME")]
    unparsed_dir: Option<String>,

    /// Use the given date (YYYY-MM-DD) instead of today for the date directories
    #[arg(long, name = "DATE")]
    date: Option<String>,

    /// Auto-confirm the move without asking
    #[arg(short, long)]
    auto: bool,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Write a log file
    #[arg(short = 'L', long)]
    log: bool,

    /// Only preview without moving files
    #[arg(short, long)]
    print: bool,

    /// Print shell completion script
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(shell) = args.completion {
        lab_sort::generate_shell_completion(shell, Args::command(), env!("CARGO_BIN_NAME"));
        Ok(())
    } else {
        LabSort::new(args)?.run()
    }
}
