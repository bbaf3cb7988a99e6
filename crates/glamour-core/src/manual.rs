//! Hand-curated bundles authored in `manual_bundles.csv`.
//!
//! Rows are `identifier,name,imageFile,itemIds`. The item list is itself
//! comma-separated and is normally quoted; rows written with `;` between the
//! leading fields need no quoting. Every id a loaded row lists is claimed and
//! kept out of automatic grouping, even if the bundle is later filtered out.
//! A bundle keeps at most the first five distinct items of its list.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{BUNDLE_CAPACITY, Bundle, BundleId, BundleOrigin, Item, ItemId};
use crate::tabular::{Row, data_rows};

const LEADING_FIELDS: usize = 3;

/// Manual bundles in file order together with every id they claim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualBundles {
    pub bundles: Vec<Bundle>,
    pub claimed: HashSet<ItemId>,
    pub warnings: Vec<String>,
}

pub fn load_manual_bundles(
    path: &Path,
    data_dir: &Path,
    catalog: &HashMap<ItemId, Item>,
    banned: &HashSet<ItemId>,
) -> Result<ManualBundles> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No manual bundle file found");
            return Ok(ManualBundles::default());
        }
        Err(err) => return Err(err.into()),
    };

    let loaded = parse_manual_bundles(&raw, data_dir, catalog, banned);
    info!(
        bundles = loaded.bundles.len(),
        claimed = loaded.claimed.len(),
        "Loaded manual bundles"
    );
    Ok(loaded)
}

pub fn parse_manual_bundles(
    raw: &str,
    data_dir: &Path,
    catalog: &HashMap<ItemId, Item>,
    banned: &HashSet<ItemId>,
) -> ManualBundles {
    let mut loaded = ManualBundles::default();
    let mut seen: HashSet<BundleId> = HashSet::new();

    for row in data_rows(raw) {
        let Some(entry) = ManualRow::from_row(&row) else {
            debug!(line = row.line, "Skipping malformed manual bundle row");
            continue;
        };

        if !seen.insert(entry.id) {
            let message = format!(
                "Manual bundle {} on line {} reuses an existing identifier; row skipped.",
                entry.id, row.line
            );
            warn!("{message}");
            loaded.warnings.push(message);
            continue;
        }

        loaded.claimed.extend(entry.item_ids.iter().copied());

        let mut bundle = Bundle::new(entry.id, BundleOrigin::Manual);
        bundle.name = entry.name;
        bundle.image = entry.image.map(|file| data_dir.join(file));
        let mut listed: HashSet<ItemId> = HashSet::new();
        bundle.items = entry
            .item_ids
            .iter()
            .filter(|id| !banned.contains(*id))
            .filter(|id| listed.insert(**id))
            .filter_map(|id| {
                let item = catalog.get(id);
                if item.is_none() {
                    debug!(bundle = entry.id, item = id, "Dropping unknown item id");
                }
                item.cloned()
            })
            .collect();

        if bundle.items.len() > BUNDLE_CAPACITY {
            let message = format!(
                "Manual bundle {} on line {} lists {} items; keeping the first {}.",
                entry.id,
                row.line,
                bundle.items.len(),
                BUNDLE_CAPACITY
            );
            warn!("{message}");
            loaded.warnings.push(message);
            bundle.items.truncate(BUNDLE_CAPACITY);
        }

        if bundle.is_empty() {
            debug!(bundle = entry.id, "Manual bundle resolved no items; dropped");
            continue;
        }
        loaded.bundles.push(bundle);
    }

    loaded
}

#[derive(Debug)]
struct ManualRow {
    id: BundleId,
    name: String,
    image: Option<String>,
    item_ids: Vec<ItemId>,
}

impl ManualRow {
    fn from_row(row: &Row) -> Option<Self> {
        if row.fields.len() <= LEADING_FIELDS {
            return None;
        }
        let id = row.fields[0].trim().parse::<BundleId>().ok()?;
        let name = row.fields[1].trim().to_string();
        let image = Some(row.fields[2].trim())
            .filter(|file| !file.is_empty())
            .map(str::to_string);

        // An unquoted item list spills over into trailing fields.
        let item_ids = row.fields[LEADING_FIELDS..]
            .iter()
            .flat_map(|field| field.split(','))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| match token.parse::<ItemId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    debug!(line = row.line, token, "Skipping malformed item id");
                    None
                }
            })
            .collect();

        Some(Self {
            id,
            name,
            image,
            item_ids,
        })
    }
}
