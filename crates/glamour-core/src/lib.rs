//! Core library crate: builds curated glamour bundles from an item catalog.

pub mod banlist;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod grouper;
pub mod images;
pub mod logging;
pub mod manual;
pub mod model;
pub mod sort;
pub mod tabular;
pub mod validate;

pub use catalog::CatalogSnapshot;
pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, RuntimeOverrides,
    apply_runtime_overrides, config_directory, config_path, load_config, save_config,
};
pub use engine::{BundleEngine, EngineSources, Rebuild, RebuildReport};
pub use error::{BundleError, Result};
pub use filters::LevelRange;
pub use model::{
    BUNDLE_CAPACITY, Bundle, BundleId, BundleOrigin, CatalogSource, ClassificationResolver,
    EligibilityFlags, Item, ItemId, SlotFlags,
};
pub use validate::BundleQuery;
