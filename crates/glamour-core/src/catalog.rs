//! File-backed catalog: a JSON export of the host's item and classification sheets.
//!
//! ```json
//! {
//!   "items": [{ "id": 1, "name": "Iron Cuirass", "level": 50, "filter_group": 4,
//!               "slot_ref": 4, "eligibility_ref": 2, "icon": 4021 }],
//!   "slots": { "4": { "body": true } },
//!   "eligibility": { "1": { "universal": true } }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{BundleError, Result};
use crate::model::{CatalogSource, ClassificationResolver, EligibilityFlags, Item, SlotFlags};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub slots: HashMap<u32, SlotFlags>,
    #[serde(default)]
    pub eligibility: HashMap<u32, EligibilityFlags>,
}

impl CatalogSnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(raw)?;
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            BundleError::catalog(format!("failed to read {}: {err}", path.display()))
        })?;
        let snapshot = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            items = snapshot.items.len(),
            slots = snapshot.slots.len(),
            eligibility = snapshot.eligibility.len(),
            "Loaded catalog"
        );
        Ok(snapshot)
    }
}

impl CatalogSource for CatalogSnapshot {
    fn all_items(&self) -> Vec<Item> {
        self.items.clone()
    }
}

impl ClassificationResolver for CatalogSnapshot {
    fn slot_flags(&self, slot_ref: u32) -> Option<SlotFlags> {
        self.slots.get(&slot_ref).copied()
    }

    fn eligibility_flags(&self, eligibility_ref: u32) -> Option<EligibilityFlags> {
        self.eligibility.get(&eligibility_ref).copied()
    }
}
