use std::cmp::Ordering;

use crate::model::Bundle;

/// Orders bundles by lowest item level, then case-insensitive name, then id.
/// The sort is stable, so exact ties keep their insertion order.
pub fn sort_bundles(bundles: &mut [Bundle]) {
    bundles.sort_by(compare_bundles);
}

pub fn compare_bundles(a: &Bundle, b: &Bundle) -> Ordering {
    compare_min_level(a, b)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.id.cmp(&b.id))
}

// Bundles without items sort after everything else.
fn compare_min_level(a: &Bundle, b: &Bundle) -> Ordering {
    match (a.min_level(), b.min_level()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
