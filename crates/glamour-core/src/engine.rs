//! One full rebuild of the bundle list.
//!
//! Loaders run first and produce the banned and claimed id sets, the catalog is
//! filtered against them, the grouper forms automatic bundles, manual and
//! automatic bundles are validated, images are attached and the result is sorted.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::banlist::load_banlist;
use crate::filters::passes_reference_filters;
use crate::grouper::group_contiguous;
use crate::images::{associate_images, scan_images};
use crate::manual::{ManualBundles, load_manual_bundles};
use crate::model::{Bundle, CatalogSource, ClassificationResolver, Item, ItemId};
use crate::sort::sort_bundles;
use crate::validate::BundleQuery;

pub const DEFAULT_MANUAL_BUNDLES_FILE: &str = "manual_bundles.csv";
pub const DEFAULT_BANLIST_FILE: &str = "banlist.csv";

/// Where a rebuild reads its curated data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSources {
    pub data_dir: PathBuf,
    pub manual_bundles: PathBuf,
    pub banlist: PathBuf,
    pub image_dir: PathBuf,
}

impl EngineSources {
    /// Default file names, all inside `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            manual_bundles: data_dir.join(DEFAULT_MANUAL_BUNDLES_FILE),
            banlist: data_dir.join(DEFAULT_BANLIST_FILE),
            image_dir: data_dir.clone(),
            data_dir,
        }
    }
}

/// Counts and non-fatal problems collected during a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RebuildReport {
    pub banned: usize,
    pub claimed: usize,
    pub manual: usize,
    pub automatic: usize,
    pub images_applied: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rebuild {
    pub bundles: Vec<Bundle>,
    pub report: RebuildReport,
}

pub struct BundleEngine<C, R> {
    catalog: C,
    resolver: R,
    sources: EngineSources,
}

impl<C, R> BundleEngine<C, R>
where
    C: CatalogSource,
    R: ClassificationResolver,
{
    pub fn new(catalog: C, resolver: R, sources: EngineSources) -> Self {
        Self {
            catalog,
            resolver,
            sources,
        }
    }

    pub fn sources(&self) -> &EngineSources {
        &self.sources
    }

    /// Rebuilds the full bundle list from scratch. Nothing here is fatal:
    /// unreadable resources are treated as empty and recorded as warnings.
    pub fn rebuild(&self, query: &BundleQuery) -> Rebuild {
        let mut report = RebuildReport::default();

        let banned = load_banlist(&self.sources.banlist).unwrap_or_else(|err| {
            record_warning(
                &mut report,
                format!(
                    "Failed to load banlist {}: {err}",
                    self.sources.banlist.display()
                ),
            );
            HashSet::new()
        });

        let mut items = self.catalog.all_items();
        items.sort_by_key(|item| item.id);
        items.dedup_by_key(|item| item.id);
        let index: HashMap<ItemId, Item> = items
            .iter()
            .map(|item| (item.id, item.clone()))
            .collect();

        let manual = load_manual_bundles(
            &self.sources.manual_bundles,
            &self.sources.data_dir,
            &index,
            &banned,
        )
        .unwrap_or_else(|err| {
            record_warning(
                &mut report,
                format!(
                    "Failed to load manual bundles {}: {err}",
                    self.sources.manual_bundles.display()
                ),
            );
            ManualBundles::default()
        });
        report.warnings.extend(manual.warnings.iter().cloned());
        report.banned = banned.len();
        report.claimed = manual.claimed.len();

        let survivors = items.into_iter().filter(|item| {
            !banned.contains(&item.id)
                && !manual.claimed.contains(&item.id)
                && passes_reference_filters(item, &query.levels, &self.resolver)
        });
        let automatic = group_contiguous(survivors, |bundle| query.accepts(bundle));

        let mut bundles: Vec<Bundle> = manual
            .bundles
            .into_iter()
            .filter(|bundle| query.accepts(bundle))
            .collect();
        report.manual = bundles.len();
        report.automatic = automatic.len();
        bundles.extend(automatic);

        match scan_images(&self.sources.image_dir) {
            Ok(images) => report.images_applied = associate_images(&mut bundles, &images),
            Err(err) => record_warning(
                &mut report,
                format!(
                    "Failed to scan images in {}: {err}",
                    self.sources.image_dir.display()
                ),
            ),
        }

        sort_bundles(&mut bundles);

        info!(
            bundles = bundles.len(),
            manual = report.manual,
            automatic = report.automatic,
            banned = report.banned,
            claimed = report.claimed,
            images = report.images_applied,
            min_level = query.levels.min(),
            max_level = query.levels.max(),
            search = %query.search,
            "Rebuilt bundle list"
        );

        Rebuild { bundles, report }
    }
}

fn record_warning(report: &mut RebuildReport, message: String) {
    warn!("{message}");
    report.warnings.push(message);
}
