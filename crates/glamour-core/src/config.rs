use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{DEFAULT_BANLIST_FILE, DEFAULT_MANUAL_BUNDLES_FILE, EngineSources};
use crate::filters::{DEFAULT_LEVEL_CEILING, LEVEL_FLOOR, LevelRange};
use crate::validate::BundleQuery;

const CONFIG_DIR_NAME: &str = "glamour";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Ser(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {err}"),
            ConfigError::Ser(err) => write!(f, "TOML serialization error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Ser(value)
    }
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub data: DataPreferences,
    #[serde(default)]
    pub filters: FilterPreferences,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            data: DataPreferences::default(),
            filters: FilterPreferences::default(),
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn query(&self) -> BundleQuery {
        BundleQuery::new(
            LevelRange::clamped(
                self.filters.min_level,
                self.filters.max_level,
                self.filters.level_ceiling,
            ),
            self.filters.search.clone(),
        )
    }

    pub fn sources(&self) -> EngineSources {
        let data_dir = expand_path(&self.data.data_dir);
        let image_dir = match self.data.image_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => resolve_in(&data_dir, dir),
            _ => data_dir.clone(),
        };
        EngineSources {
            manual_bundles: resolve_in(&data_dir, &self.data.manual_bundles_file),
            banlist: resolve_in(&data_dir, &self.data.banlist_file),
            image_dir,
            data_dir,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        resolve_in(&expand_path(&self.data.data_dir), &self.data.catalog)
    }
}

/// Locations of the catalog export and the hand-authored data files.
/// Relative file names resolve inside `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPreferences {
    #[serde(default = "DataPreferences::default_data_dir")]
    pub data_dir: String,
    #[serde(default = "DataPreferences::default_catalog")]
    pub catalog: String,
    #[serde(default = "DataPreferences::default_manual_bundles_file")]
    pub manual_bundles_file: String,
    #[serde(default = "DataPreferences::default_banlist_file")]
    pub banlist_file: String,
    #[serde(default)]
    pub image_dir: Option<String>,
}

impl Default for DataPreferences {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            catalog: Self::default_catalog(),
            manual_bundles_file: Self::default_manual_bundles_file(),
            banlist_file: Self::default_banlist_file(),
            image_dir: None,
        }
    }
}

impl DataPreferences {
    fn default_data_dir() -> String {
        config_directory().join("data").to_string_lossy().into_owned()
    }

    fn default_catalog() -> String {
        DEFAULT_CATALOG_FILE.to_string()
    }

    fn default_manual_bundles_file() -> String {
        DEFAULT_MANUAL_BUNDLES_FILE.to_string()
    }

    fn default_banlist_file() -> String {
        DEFAULT_BANLIST_FILE.to_string()
    }
}

/// Level window and search text applied on every rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreferences {
    #[serde(default = "FilterPreferences::default_min_level")]
    pub min_level: u32,
    #[serde(default = "FilterPreferences::default_level_ceiling")]
    pub max_level: u32,
    #[serde(default = "FilterPreferences::default_level_ceiling")]
    pub level_ceiling: u32,
    #[serde(default)]
    pub search: String,
}

impl Default for FilterPreferences {
    fn default() -> Self {
        Self {
            min_level: LEVEL_FLOOR,
            max_level: DEFAULT_LEVEL_CEILING,
            level_ceiling: DEFAULT_LEVEL_CEILING,
            search: String::new(),
        }
    }
}

impl FilterPreferences {
    const fn default_min_level() -> u32 {
        LEVEL_FLOOR
    }

    const fn default_level_ceiling() -> u32 {
        DEFAULT_LEVEL_CEILING
    }
}

/// Represents overrides sourced from runtime inputs (CLI flags).
#[derive(Debug, Default, Clone)]
pub struct RuntimeOverrides {
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
    pub search: Option<String>,
    pub data_dir: Option<String>,
    pub catalog: Option<String>,
}

impl RuntimeOverrides {
    pub fn is_empty(&self) -> bool {
        self.min_level.is_none()
            && self.max_level.is_none()
            && self.search.is_none()
            && self.data_dir.is_none()
            && self.catalog.is_none()
    }
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Load the configuration, falling back to defaults.
pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(cfg) => {
                    let (cfg, mut sanitize_warnings) = sanitize_config(cfg);
                    warnings.append(&mut sanitize_warnings);
                    return ConfigLoadResult {
                        config: cfg,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {} as TOML: {}. Falling back to defaults.",
                        CONFIG_FILE_NAME, err
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {}. Falling back to defaults.",
                    CONFIG_FILE_NAME, err
                ));
            }
        }
    }

    // Default fallback
    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

/// Persist the configuration to disk.
pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    save_config_to(&config_path(), config)
}

pub fn save_config_to(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)?;
    Ok(())
}

fn sanitize_config(mut config: FileConfig) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.schema_version != CURRENT_SCHEMA_VERSION {
        warnings.push(format!(
            "Unknown config schema version {}. Resetting to {}.",
            config.schema_version, CURRENT_SCHEMA_VERSION
        ));
        config = FileConfig::default();
        return (config, warnings);
    }

    let filters = &mut config.filters;
    if filters.level_ceiling < LEVEL_FLOOR {
        warnings.push(format!(
            "level_ceiling must be at least {LEVEL_FLOOR}. Resetting to {DEFAULT_LEVEL_CEILING}."
        ));
        filters.level_ceiling = DEFAULT_LEVEL_CEILING;
    }

    let range = LevelRange::clamped(filters.min_level, filters.max_level, filters.level_ceiling);
    if filters.min_level > filters.max_level {
        warnings.push(format!(
            "min_level {} exceeds max_level {}. Swapping the bounds.",
            filters.min_level, filters.max_level
        ));
    }
    let ordered = (
        filters.min_level.min(filters.max_level),
        filters.min_level.max(filters.max_level),
    );
    if (range.min(), range.max()) != ordered {
        warnings.push(format!(
            "Level range {}-{} falls outside 1-{}. Clamping to {}-{}.",
            filters.min_level,
            filters.max_level,
            filters.level_ceiling,
            range.min(),
            range.max()
        ));
    }
    filters.min_level = range.min();
    filters.max_level = range.max();

    if config.data.data_dir.trim().is_empty() {
        warnings.push("data_dir is empty. Using the default data directory.".to_string());
        config.data.data_dir = DataPreferences::default_data_dir();
    }

    (config, warnings)
}

/// Apply runtime overrides on top of the persisted configuration.
pub fn apply_runtime_overrides(
    config: &mut FileConfig,
    overrides: &RuntimeOverrides,
    warnings: &mut Vec<String>,
) {
    if let Some(min) = overrides.min_level {
        config.filters.min_level = min;
    }
    if let Some(max) = overrides.max_level {
        config.filters.max_level = max;
    }
    if overrides.min_level.is_some() || overrides.max_level.is_some() {
        let requested = (config.filters.min_level, config.filters.max_level);
        let range = LevelRange::clamped(requested.0, requested.1, config.filters.level_ceiling);
        if (range.min(), range.max()) != requested {
            warnings.push(format!(
                "Level range {}-{} adjusted to {}-{}.",
                requested.0,
                requested.1,
                range.min(),
                range.max()
            ));
        }
        config.filters.min_level = range.min();
        config.filters.max_level = range.max();
    }
    if let Some(search) = overrides.search.as_ref() {
        config.filters.search = search.trim().to_string();
    }
    if let Some(dir) = overrides.data_dir.as_ref() {
        if dir.trim().is_empty() {
            warnings.push("Ignoring empty data directory override.".to_string());
        } else {
            config.data.data_dir = dir.trim().to_string();
        }
    }
    if let Some(catalog) = overrides.catalog.as_ref() {
        if catalog.trim().is_empty() {
            warnings.push("Ignoring empty catalog override.".to_string());
        } else {
            config.data.catalog = catalog.trim().to_string();
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

fn resolve_in(base: &Path, raw: &str) -> PathBuf {
    let path = expand_path(raw);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
