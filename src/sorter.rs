//! Policy application over one partition of a directory level.

use crate::Entry;
use crate::manual::ManualOrder;
use crate::resolver::SortPolicy;

/// Orders one partition of a directory level by `policy`.
///
/// Pure over its inputs; `items` is never mutated. Directories and files
/// are ordered by separate calls, the caller composes the two lists.
///
/// Under `Manual` the order list at `order_key` is walked in sequence and
/// each listed name claims the first remaining item with that exact name;
/// items the list never mentions keep their original relative order at the
/// end. A missing or empty list leaves the partition in natural order. All
/// sorts are stable, so equal keys preserve filesystem iteration order.
pub fn order(
    items: &[Entry],
    policy: SortPolicy,
    manual: &ManualOrder,
    order_key: &str,
) -> Vec<Entry> {
    match policy {
        SortPolicy::Natural => items.to_vec(),
        SortPolicy::Alphabetical => {
            let mut sorted = items.to_vec();
            sorted.sort_by_key(|entry| entry.name.to_lowercase());
            sorted
        }
        SortPolicy::ByModifiedTime => {
            let mut sorted = items.to_vec();
            sorted.sort_by(|a, b| b.mtime_key().cmp(&a.mtime_key()));
            sorted
        }
        SortPolicy::ByCreatedTime => {
            let mut sorted = items.to_vec();
            sorted.sort_by(|a, b| b.ctime_key().cmp(&a.ctime_key()));
            sorted
        }
        SortPolicy::ByFileSize => {
            let mut sorted = items.to_vec();
            sorted.sort_by(|a, b| b.size_key().cmp(&a.size_key()));
            sorted
        }
        SortPolicy::Manual => order_manually(items, manual, order_key),
    }
}

fn order_manually(items: &[Entry], manual: &ManualOrder, order_key: &str) -> Vec<Entry> {
    let Some(listed) = manual.get(order_key) else {
        return items.to_vec();
    };
    if listed.is_empty() {
        return items.to_vec();
    }

    let mut pool: Vec<Option<Entry>> = items.iter().cloned().map(Some).collect();
    let mut ordered = Vec::with_capacity(items.len());
    for listed_name in listed {
        // List entries may be full vault paths; only the final segment
        // participates in matching.
        let name = listed_name.rsplit('/').next().unwrap_or(listed_name);
        let claimed = pool
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|entry| entry.name == name));
        if let Some(index) = claimed
            && let Some(entry) = pool[index].take()
        {
            ordered.push(entry);
        }
    }
    // Anything the order list never mentioned keeps its original relative
    // order at the end.
    ordered.extend(pool.into_iter().flatten());
    ordered
}
