use std::collections::HashSet;
use std::fs;
use std::path::Path;

use glamour_core::{
    Bundle, BundleEngine, BundleOrigin, BundleQuery, CatalogSnapshot, EligibilityFlags,
    EngineSources, Item, ItemId, LevelRange, SlotFlags,
};
use tempfile::tempdir;

const NECK_SLOT: u32 = 10;
const BODY_SLOT: u32 = 4;
const UNIVERSAL: u32 = 1;

fn item(id: ItemId, level: u32, name: &str) -> Item {
    Item {
        id,
        name: name.to_string(),
        level,
        filter_group: 4,
        slot_ref: BODY_SLOT,
        eligibility_ref: 0,
        icon: 40_000 + id,
    }
}

fn catalog(items: Vec<Item>) -> CatalogSnapshot {
    let mut snapshot = CatalogSnapshot {
        items,
        ..CatalogSnapshot::default()
    };
    snapshot.slots.insert(
        BODY_SLOT,
        SlotFlags {
            body: true,
            ..SlotFlags::default()
        },
    );
    snapshot.slots.insert(
        NECK_SLOT,
        SlotFlags {
            neck: true,
            ..SlotFlags::default()
        },
    );
    snapshot
        .eligibility
        .insert(UNIVERSAL, EligibilityFlags { universal: true });
    snapshot
}

fn numbered(ids: &[ItemId], level: u32) -> Vec<Item> {
    ids.iter()
        .map(|&id| item(id, level, &format!("Piece {id}")))
        .collect()
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

fn automatic_ids(bundles: &[Bundle]) -> Vec<Vec<ItemId>> {
    bundles
        .iter()
        .filter(|bundle| bundle.origin == BundleOrigin::Automatic)
        .map(Bundle::item_ids)
        .collect()
}

#[test]
fn six_adjacent_ids_split_at_the_cap_and_gap() {
    let temp = tempdir().expect("tempdir");
    let snapshot = catalog(numbered(&[100, 101, 102, 103, 104, 105, 200], 50));
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::default());

    assert_eq!(
        automatic_ids(&rebuild.bundles),
        vec![vec![100, 101, 102, 103, 104], vec![105], vec![200]]
    );
    let bundle_ids: Vec<_> = rebuild.bundles.iter().map(|bundle| bundle.id).collect();
    assert_eq!(bundle_ids, vec![100, 105, 200]);
}

#[test]
fn manual_row_claims_its_items() {
    let temp = tempdir().expect("tempdir");
    write(
        temp.path(),
        "manual_bundles.csv",
        "identifier;name;imageFile;items\n7;Iron Suit;iron.png;1,2,3\n",
    );
    let snapshot = catalog(numbered(&[1, 2, 3, 4, 5, 6], 50));
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::default());

    let manual: Vec<_> = rebuild
        .bundles
        .iter()
        .filter(|bundle| bundle.origin == BundleOrigin::Manual)
        .collect();
    assert_eq!(manual.len(), 1);
    assert_eq!(manual[0].id, 7);
    assert_eq!(manual[0].name, "Iron Suit");
    assert_eq!(manual[0].item_ids(), vec![1, 2, 3]);
    assert_eq!(manual[0].image, Some(temp.path().join("iron.png")));

    assert_eq!(automatic_ids(&rebuild.bundles), vec![vec![4, 5, 6]]);
}

#[test]
fn claimed_ids_stay_claimed_when_manual_bundle_is_filtered_out() {
    let temp = tempdir().expect("tempdir");
    write(
        temp.path(),
        "manual_bundles.csv",
        "identifier,name,imageFile,items\n7,Low Set,,\"1,2\"\n",
    );
    let mut items = numbered(&[1, 2], 5);
    items.extend(numbered(&[3, 4], 60));
    let snapshot = catalog(items);
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::new(LevelRange::new(50, 70), ""));

    assert!(
        rebuild
            .bundles
            .iter()
            .all(|bundle| bundle.origin == BundleOrigin::Automatic)
    );
    assert_eq!(automatic_ids(&rebuild.bundles), vec![vec![3, 4]]);
}

#[test]
fn banned_ids_appear_nowhere() {
    let temp = tempdir().expect("tempdir");
    write(temp.path(), "banlist.csv", "item_id\n3\noops\n22\n");
    write(
        temp.path(),
        "manual_bundles.csv",
        "identifier,name,imageFile,items\n50,Mixed,,\"21,22,23\"\n",
    );
    let snapshot = catalog(numbered(&[1, 2, 3, 4, 5, 21, 22, 23], 50));
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::default());

    let every_id: HashSet<ItemId> = rebuild
        .bundles
        .iter()
        .flat_map(|bundle| bundle.item_ids())
        .collect();
    assert!(!every_id.contains(&3));
    assert!(!every_id.contains(&22));
    assert_eq!(
        automatic_ids(&rebuild.bundles),
        vec![vec![1, 2], vec![4, 5]]
    );
    assert_eq!(rebuild.report.banned, 2);
}

#[test]
fn reference_filters_shape_the_runs() {
    let temp = tempdir().expect("tempdir");
    let mut necklace = item(11, 50, "Pearl Necklace");
    necklace.slot_ref = NECK_SLOT;
    let mut starter = item(13, 1, "Weathered Shirt");
    starter.eligibility_ref = UNIVERSAL;
    let mut duplicate = item(14, 40, "Weathered Shirt");
    duplicate.eligibility_ref = UNIVERSAL;
    let mut material = item(15, 50, "Iron Ore");
    material.filter_group = 12;
    let snapshot = catalog(vec![
        item(10, 50, "Coat"),
        necklace,
        item(12, 50, "Trousers"),
        starter,
        duplicate,
        material,
        item(16, 50, "Boots"),
    ]);
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::default());

    // The necklace, the level 40 universal shirt and the ore are filtered out,
    // so 12-13 form a run while 10 and 16 stand alone. The level 1 shirt puts
    // [12, 13] first.
    assert_eq!(
        automatic_ids(&rebuild.bundles),
        vec![vec![12, 13], vec![10], vec![16]]
    );
}

#[test]
fn images_rename_and_decorate_bundles() {
    let temp = tempdir().expect("tempdir");
    write(
        temp.path(),
        "manual_bundles.csv",
        "identifier,name,imageFile,items\n7,Draft Name,,\"1,2\"\n",
    );
    write(temp.path(), "7;Iron Suit.png", "png");
    write(temp.path(), "30;Dragoon Set.jpg", "jpg");
    write(temp.path(), "999;Nobody.png", "png");
    write(temp.path(), "notes.txt", "ignored");
    let snapshot = catalog(numbered(&[1, 2, 30, 31], 50));
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::default());

    let names: Vec<_> = rebuild.bundles.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Dragoon Set", "Iron Suit"]);
    assert_eq!(
        rebuild.bundles[1].image,
        Some(temp.path().join("7;Iron Suit.png"))
    );
    assert_eq!(rebuild.report.images_applied, 2);
}

#[test]
fn search_matches_bundle_and_item_names() {
    let temp = tempdir().expect("tempdir");
    write(
        temp.path(),
        "manual_bundles.csv",
        "identifier,name,imageFile,items\n7,Dragoon Mail,,\"1\"\n",
    );
    let snapshot = catalog(vec![
        item(1, 50, "Plate Cuirass"),
        item(20, 50, "Dragoon Helm"),
        item(21, 50, "Dragoon Greaves"),
        item(40, 50, "Linen Robe"),
    ]);
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::new(LevelRange::default(), "dRaGoOn"));

    let ids: Vec<_> = rebuild.bundles.iter().map(|bundle| bundle.id).collect();
    // The unnamed automatic run sorts ahead of "Dragoon Mail" at equal level.
    assert_eq!(ids, vec![20, 7]);
}

#[test]
fn final_order_uses_level_then_name_then_id() {
    let temp = tempdir().expect("tempdir");
    write(
        temp.path(),
        "manual_bundles.csv",
        "identifier,name,imageFile,items\n\
         1,Zeta,,\"10\"\n\
         2,Alpha,,\"20\"\n\
         3,Omega,,\"30\"\n",
    );
    let mut items = numbered(&[10, 20], 10);
    items.extend(numbered(&[30], 5));
    let snapshot = catalog(items);
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));

    let rebuild = engine.rebuild(&BundleQuery::default());

    let names: Vec<_> = rebuild.bundles.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Omega", "Alpha", "Zeta"]);
}

#[test]
fn rebuilding_twice_is_deterministic() {
    let temp = tempdir().expect("tempdir");
    write(temp.path(), "banlist.csv", "item_id\n104\n");
    write(
        temp.path(),
        "manual_bundles.csv",
        "identifier;name;imageFile;items\n7;Iron Suit;iron.png;1,2,3\n",
    );
    write(temp.path(), "100;Ranger.png", "png");
    let mut items = numbered(&[1, 2, 3, 4, 5], 30);
    items.extend(numbered(&[100, 101, 102, 103, 104, 105, 106, 200], 60));
    let snapshot = catalog(items);
    let engine = BundleEngine::new(&snapshot, &snapshot, EngineSources::in_dir(temp.path()));
    let query = BundleQuery::new(LevelRange::new(20, 80), "");

    let first = engine.rebuild(&query);
    let second = engine.rebuild(&query);

    assert_eq!(first, second);
    assert!(!first.bundles.is_empty());
}

#[test]
fn missing_resources_yield_a_clean_report() {
    let temp = tempdir().expect("tempdir");
    let snapshot = catalog(numbered(&[1], 50));
    let sources = EngineSources::in_dir(temp.path().join("does-not-exist"));
    let engine = BundleEngine::new(&snapshot, &snapshot, sources);

    let rebuild = engine.rebuild(&BundleQuery::default());

    assert_eq!(automatic_ids(&rebuild.bundles), vec![vec![1]]);
    assert!(rebuild.report.warnings.is_empty());
}
