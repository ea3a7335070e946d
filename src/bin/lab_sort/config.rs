use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use lab_sort::date::DateStamp;
use lab_sort::labs::{DEFAULT_MOVE_DELAY, DEFAULT_UNPARSED_DIR, FolderRoots, SortOptions, UnparsedPolicy};

use crate::Args;

/// Final config combined from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    pub(crate) auto: bool,
    pub(crate) date: Option<DateStamp>,
    pub(crate) debug: bool,
    pub(crate) delay: Duration,
    pub(crate) dest: Option<PathBuf>,
    pub(crate) dryrun: bool,
    pub(crate) log: bool,
    pub(crate) source: Option<PathBuf>,
    pub(crate) temp: Option<PathBuf>,
    pub(crate) unparsed: UnparsedPolicy,
    pub(crate) unparsed_dir: String,
    pub(crate) verbose: bool,
}

/// Config from the user config file
#[derive(Debug, Default, Deserialize)]
struct LabSortConfig {
    #[serde(default)]
    auto: bool,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    delay_ms: Option<u64>,
    #[serde(default)]
    dest: Option<PathBuf>,
    #[serde(default)]
    dryrun: bool,
    #[serde(default)]
    log: bool,
    #[serde(default)]
    source: Option<PathBuf>,
    #[serde(default)]
    temp: Option<PathBuf>,
    #[serde(default)]
    unparsed: Option<UnparsedPolicy>,
    #[serde(default)]
    unparsed_dir: Option<String>,
    #[serde(default)]
    verbose: bool,
}

/// Wrapper needed for parsing the user config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    lab_sort: LabSortConfig,
}

impl LabSortConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = lab_sort::config_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.lab_sort)
            .context("Failed to parse lab_sort config TOML")
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed,
    /// the date is invalid, or the unparsed directory name is not a plain directory name.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let user_config = LabSortConfig::get_user_config()?;
        Self::from_args_and_user_config(args, user_config)
    }

    fn from_args_and_user_config(args: Args, user_config: LabSortConfig) -> anyhow::Result<Self> {
        let date = args.date.as_deref().map(DateStamp::parse).transpose()?;

        let unparsed_dir = args
            .unparsed_dir
            .or(user_config.unparsed_dir)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_UNPARSED_DIR.to_string());

        let delay = args
            .delay
            .or(user_config.delay_ms)
            .map_or(DEFAULT_MOVE_DELAY, Duration::from_millis);

        let config = Self {
            auto: args.auto || user_config.auto,
            date,
            debug: args.debug || user_config.debug,
            delay,
            dest: args.dest.or(user_config.dest),
            dryrun: args.print || user_config.dryrun,
            log: args.log || user_config.log,
            source: args.path.or(user_config.source),
            temp: args.temp.or(user_config.temp),
            unparsed: args.unparsed.or(user_config.unparsed).unwrap_or_default(),
            unparsed_dir,
            verbose: args.verbose || user_config.verbose,
        };
        config.sort_options().validate()?;
        Ok(config)
    }

    /// Resolve the folder roots for the given absolute source directory.
    ///
    /// Temp and destination overrides are resolved to absolute paths.
    ///
    /// # Errors
    /// Returns an error if a relative override cannot be resolved.
    pub fn folder_roots(&self, source: PathBuf) -> anyhow::Result<FolderRoots> {
        let mut roots = FolderRoots::from_source(source);
        if let Some(ref temp) = self.temp {
            roots.temp = lab_sort::resolve_path(temp)?;
        }
        if let Some(ref dest) = self.dest {
            roots.dest = lab_sort::resolve_path(dest)?;
        }
        Ok(roots)
    }

    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            date: self.date,
            throttle: self.delay,
            unparsed: self.unparsed,
            unparsed_dir: self.unparsed_dir.clone(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  auto: {}", lab_sort::colorize_bool(self.auto))?;
        writeln!(
            f,
            "  date: {}",
            self.date.map_or_else(|| "today".to_string(), |date| date.to_string())
        )?;
        writeln!(f, "  delay: {} ms", self.delay.as_millis())?;
        writeln!(f, "  dryrun: {}", lab_sort::colorize_bool(self.dryrun))?;
        writeln!(f, "  log: {}", lab_sort::colorize_bool(self.log))?;
        writeln!(f, "  unparsed: {}", self.unparsed)?;
        writeln!(f, "  unparsed_dir: {}", self.unparsed_dir)?;
        write!(f, "  verbose: {}", lab_sort::colorize_bool(self.verbose))
    }
}
