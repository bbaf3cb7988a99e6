//! Item and bundle types plus the host capabilities the engine consumes.

use std::borrow::Cow;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub type ItemId = u32;
pub type BundleId = u32;

/// Coarse category tag carried by every wearable equipment row.
pub const EQUIPMENT_FILTER_GROUP: u8 = 4;

/// Upper bound on the number of items in a single bundle.
pub const BUNDLE_CAPACITY: usize = 5;

/// A catalog row as supplied by the host. The engine never mutates items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub level: u32,
    pub filter_group: u8,
    /// Slot classification row; `0` means the item has none.
    #[serde(default)]
    pub slot_ref: u32,
    /// Eligibility classification row; `0` means the item has none.
    #[serde(default)]
    pub eligibility_ref: u32,
    #[serde(default)]
    pub icon: u32,
}

/// Equipment slots an item occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotFlags {
    pub main_hand: bool,
    pub off_hand: bool,
    pub head: bool,
    pub body: bool,
    pub hands: bool,
    pub legs: bool,
    pub feet: bool,
    pub ears: bool,
    pub neck: bool,
    pub wrists: bool,
    pub finger_l: bool,
    pub finger_r: bool,
}

impl SlotFlags {
    /// Ears, neck, wrists and rings never take part in outfit sets.
    pub fn is_accessory(&self) -> bool {
        self.ears || self.neck || self.wrists || self.finger_l || self.finger_r
    }
}

/// Which classes may equip an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityFlags {
    /// Set for the base class category every job can equip.
    pub universal: bool,
}

/// Where a bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleOrigin {
    Manual,
    Automatic,
}

/// A named, ordered group of up to [`BUNDLE_CAPACITY`] items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    pub id: BundleId,
    pub name: String,
    pub items: Vec<Item>,
    pub image: Option<PathBuf>,
    pub origin: BundleOrigin,
}

impl Bundle {
    pub fn new(id: BundleId, origin: BundleOrigin) -> Self {
        Self {
            id,
            name: String::new(),
            items: Vec::new(),
            image: None,
            origin,
        }
    }

    /// Name to show for the bundle, falling back to `Set <id>` when unnamed.
    pub fn display_name(&self) -> Cow<'_, str> {
        if self.name.trim().is_empty() {
            Cow::Owned(format!("Set {}", self.id))
        } else {
            Cow::Borrowed(self.name.as_str())
        }
    }

    /// Lowest required level across the items, `None` for an empty bundle.
    pub fn min_level(&self) -> Option<u32> {
        self.items.iter().map(|item| item.level).min()
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Enumerates the host's item catalog.
pub trait CatalogSource {
    fn all_items(&self) -> Vec<Item>;
}

/// Resolves classification references carried by items.
pub trait ClassificationResolver {
    fn slot_flags(&self, slot_ref: u32) -> Option<SlotFlags>;
    fn eligibility_flags(&self, eligibility_ref: u32) -> Option<EligibilityFlags>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn all_items(&self) -> Vec<Item> {
        (**self).all_items()
    }
}

impl<T: ClassificationResolver + ?Sized> ClassificationResolver for &T {
    fn slot_flags(&self, slot_ref: u32) -> Option<SlotFlags> {
        (**self).slot_flags(slot_ref)
    }

    fn eligibility_flags(&self, eligibility_ref: u32) -> Option<EligibilityFlags> {
        (**self).eligibility_flags(eligibility_ref)
    }
}
