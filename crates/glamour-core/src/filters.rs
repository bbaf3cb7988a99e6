//! Per-item predicates applied while scanning the catalog.

use crate::model::{ClassificationResolver, EQUIPMENT_FILTER_GROUP, Item};

pub const LEVEL_FLOOR: u32 = 1;
pub const DEFAULT_LEVEL_CEILING: u32 = 100;

/// Inclusive required-level window. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    min: u32,
    max: u32,
}

impl Default for LevelRange {
    fn default() -> Self {
        Self {
            min: LEVEL_FLOOR,
            max: DEFAULT_LEVEL_CEILING,
        }
    }
}

impl LevelRange {
    /// Builds a range, swapping the bounds when given in reverse.
    pub fn new(min: u32, max: u32) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Clamps both bounds into `[LEVEL_FLOOR, ceiling]` before ordering them.
    pub fn clamped(min: u32, max: u32, ceiling: u32) -> Self {
        let ceiling = ceiling.max(LEVEL_FLOOR);
        Self::new(
            min.clamp(LEVEL_FLOOR, ceiling),
            max.clamp(LEVEL_FLOOR, ceiling),
        )
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, level: u32) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

/// Id `0` and blank names mark filler rows in the host catalog.
pub fn is_placeholder(item: &Item) -> bool {
    item.id == 0 || item.name.trim().is_empty()
}

pub fn is_equipment(item: &Item) -> bool {
    item.filter_group == EQUIPMENT_FILTER_GROUP
}

/// True when the item's slot classification resolves to an accessory slot.
/// Items without a resolvable classification are kept.
pub fn is_accessory_slot<R: ClassificationResolver + ?Sized>(item: &Item, resolver: &R) -> bool {
    if item.slot_ref == 0 {
        return false;
    }
    resolver
        .slot_flags(item.slot_ref)
        .is_some_and(|flags| flags.is_accessory())
}

/// Universal-class items above level 1 are duplicate entries of the level 1 row.
pub fn is_degenerate_universal<R: ClassificationResolver + ?Sized>(
    item: &Item,
    resolver: &R,
) -> bool {
    if item.eligibility_ref == 0 || item.level <= 1 {
        return false;
    }
    resolver
        .eligibility_flags(item.eligibility_ref)
        .is_some_and(|flags| flags.universal)
}

/// Every reference filter at once: the catalog scan keeps only items passing this.
pub fn passes_reference_filters<R: ClassificationResolver + ?Sized>(
    item: &Item,
    levels: &LevelRange,
    resolver: &R,
) -> bool {
    !is_placeholder(item)
        && is_equipment(item)
        && levels.contains(item.level)
        && !is_accessory_slot(item, resolver)
        && !is_degenerate_universal(item, resolver)
}

/// Case-insensitive containment. A blank needle matches anything; otherwise
/// the needle is matched as given, surrounding whitespace included.
pub fn name_matches(haystack: &str, needle: &str) -> bool {
    if needle.trim().is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::fixtures::item;
    use crate::model::{EligibilityFlags, SlotFlags};

    #[derive(Default)]
    struct Tables {
        slots: HashMap<u32, SlotFlags>,
        eligibility: HashMap<u32, EligibilityFlags>,
    }

    impl ClassificationResolver for Tables {
        fn slot_flags(&self, slot_ref: u32) -> Option<SlotFlags> {
            self.slots.get(&slot_ref).copied()
        }

        fn eligibility_flags(&self, eligibility_ref: u32) -> Option<EligibilityFlags> {
            self.eligibility.get(&eligibility_ref).copied()
        }
    }

    fn tables() -> Tables {
        let mut tables = Tables::default();
        tables.slots.insert(
            1,
            SlotFlags {
                body: true,
                ..SlotFlags::default()
            },
        );
        tables.slots.insert(
            2,
            SlotFlags {
                neck: true,
                ..SlotFlags::default()
            },
        );
        tables
            .eligibility
            .insert(1, EligibilityFlags { universal: true });
        tables
            .eligibility
            .insert(2, EligibilityFlags { universal: false });
        tables
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let range = LevelRange::new(90, 10);
        assert_eq!((range.min(), range.max()), (10, 90));
        assert!(range.contains(10));
        assert!(range.contains(90));
        assert!(!range.contains(91));
    }

    #[test]
    fn clamped_range_respects_floor_and_ceiling() {
        let range = LevelRange::clamped(0, 250, 100);
        assert_eq!((range.min(), range.max()), (1, 100));

        let range = LevelRange::clamped(120, 3, 90);
        assert_eq!((range.min(), range.max()), (3, 90));
    }

    #[test]
    fn accessory_slots_are_excluded() {
        let tables = tables();
        let mut necklace = item(10, 50);
        necklace.slot_ref = 2;
        let mut coat = item(11, 50);
        coat.slot_ref = 1;
        let mut unknown = item(12, 50);
        unknown.slot_ref = 99;

        assert!(is_accessory_slot(&necklace, &tables));
        assert!(!is_accessory_slot(&coat, &tables));
        assert!(!is_accessory_slot(&unknown, &tables));
        assert!(!is_accessory_slot(&item(13, 50), &tables));
    }

    #[test]
    fn universal_items_only_survive_at_level_one() {
        let tables = tables();
        let mut starter = item(20, 1);
        starter.eligibility_ref = 1;
        let mut duplicate = item(21, 30);
        duplicate.eligibility_ref = 1;
        let mut class_gear = item(22, 30);
        class_gear.eligibility_ref = 2;

        assert!(!is_degenerate_universal(&starter, &tables));
        assert!(is_degenerate_universal(&duplicate, &tables));
        assert!(!is_degenerate_universal(&class_gear, &tables));
    }

    #[test]
    fn reference_filters_combine_every_rule() {
        let tables = tables();
        let levels = LevelRange::new(10, 60);

        assert!(passes_reference_filters(&item(30, 40), &levels, &tables));
        assert!(!passes_reference_filters(&item(31, 61), &levels, &tables));

        let mut material = item(32, 40);
        material.filter_group = 12;
        assert!(!passes_reference_filters(&material, &levels, &tables));

        let mut blank = item(33, 40);
        blank.name = " ".to_string();
        assert!(!passes_reference_filters(&blank, &levels, &tables));
        assert!(!passes_reference_filters(&item(0, 40), &levels, &tables));
    }

    #[test]
    fn name_matching_ignores_case() {
        assert!(name_matches("Augmented Iron Cuirass", "iron"));
        assert!(name_matches("Augmented Iron Cuirass", "  "));
        assert!(!name_matches("Linen Robe", "iron"));
    }

    #[test]
    fn name_matching_keeps_needle_whitespace() {
        assert!(!name_matches("Augmented Iron", "iron "));
        assert!(name_matches("Iron Cuirass", "iron "));
        assert!(name_matches("Iron Cuirass", " cuirass"));
    }
}
