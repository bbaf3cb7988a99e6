use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use glamour_core::config::RuntimeOverrides;

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "glamour",
    version,
    about = "Build curated glamour bundles from an item catalog",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub build: BuildArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Inspect or change the persisted settings in config.toml.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration.
    Show,
    /// Update one or more persisted settings.
    Set(ConfigSetArgs),
    /// Restore the default configuration.
    Reset,
}

/// Arguments for the default command: one rebuild printed to stdout.
#[derive(Debug, Clone, Args, Default)]
pub struct BuildArgs {
    /// Catalog JSON export (relative paths resolve inside the data directory).
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub catalog: Option<String>,

    /// Directory holding manual_bundles.csv, banlist.csv and set images.
    #[arg(long = "data-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub data_dir: Option<String>,

    /// Lowest required level to show.
    #[arg(long = "min-level", value_name = "LEVEL")]
    pub min_level: Option<u32>,

    /// Highest required level to show.
    #[arg(long = "max-level", value_name = "LEVEL")]
    pub max_level: Option<u32>,

    /// Only show bundles whose name or item names contain this text.
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Print the bundle list and rebuild report as JSON.
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Mirror log output to stderr.
    #[arg(long = "log-stderr", action = ArgAction::SetTrue)]
    pub log_stderr: bool,
}

impl BuildArgs {
    /// True when no build flag was given, so subcommands can reject mixed use.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_none()
            && self.data_dir.is_none()
            && self.min_level.is_none()
            && self.max_level.is_none()
            && self.search.is_none()
            && !self.json
            && !self.log_stderr
    }

    pub fn to_runtime_overrides(&self) -> RuntimeOverrides {
        RuntimeOverrides {
            min_level: self.min_level,
            max_level: self.max_level,
            search: self.search.clone(),
            data_dir: self.data_dir.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

#[derive(Debug, Clone, Args, Default)]
pub struct ConfigSetArgs {
    #[arg(long = "min-level", value_name = "LEVEL")]
    pub min_level: Option<u32>,

    #[arg(long = "max-level", value_name = "LEVEL")]
    pub max_level: Option<u32>,

    /// Highest level the platform allows; level bounds are clamped to it.
    #[arg(long = "level-ceiling", value_name = "LEVEL")]
    pub level_ceiling: Option<u32>,

    /// Saved search text (pass an empty string to clear it).
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    #[arg(long = "data-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub data_dir: Option<String>,

    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub catalog: Option<String>,

    #[arg(long = "manual-bundles", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub manual_bundles_file: Option<String>,

    #[arg(long = "banlist", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub banlist_file: Option<String>,

    /// Directory scanned for `<id>;<name>.<ext>` images (empty resets to the data directory).
    #[arg(long = "image-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub image_dir: Option<String>,
}
