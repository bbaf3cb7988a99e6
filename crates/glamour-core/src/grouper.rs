//! Automatic grouping of adjacent catalog ids into bundles.

use crate::model::{BUNDLE_CAPACITY, Bundle, BundleOrigin, Item, ItemId};

/// Accumulator threaded through the fold: the open run, the previous id and
/// everything emitted so far.
#[derive(Debug, Default)]
struct RunState {
    open: Option<Bundle>,
    previous: Option<ItemId>,
    emitted: Vec<Bundle>,
}

impl RunState {
    fn close<F>(&mut self, accept: &mut F)
    where
        F: FnMut(&Bundle) -> bool,
    {
        if let Some(bundle) = self.open.take() {
            if !bundle.is_empty() && accept(&bundle) {
                self.emitted.push(bundle);
            }
        }
    }
}

/// Partitions `items` into runs of consecutive ids, at most
/// [`BUNDLE_CAPACITY`] long, keeping only the runs `accept` approves.
///
/// `items` must be strictly ascending by id. Each bundle takes the id of its
/// first item.
pub fn group_contiguous<I, F>(items: I, mut accept: F) -> Vec<Bundle>
where
    I: IntoIterator<Item = Item>,
    F: FnMut(&Bundle) -> bool,
{
    let mut state = items
        .into_iter()
        .fold(RunState::default(), |mut state, item| {
            let id = item.id;
            if let Some(previous) = state.previous {
                if previous.checked_add(1) != Some(id) {
                    state.close(&mut accept);
                }
            }

            let open = state
                .open
                .get_or_insert_with(|| Bundle::new(id, BundleOrigin::Automatic));
            open.items.push(item);

            if open.items.len() == BUNDLE_CAPACITY {
                state.close(&mut accept);
            }
            state.previous = Some(id);
            state
        });

    state.close(&mut accept);
    state.emitted
}
