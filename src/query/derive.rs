//! Local derivation of a result page from an unfiltered snapshot.
//!
//! Used when the backend is unreachable (cache fallback) and for views that
//! page on the client. Snapshot order is preserved.

use crate::framework::ListRecord;
use crate::query::{FilterStore, FilterTabs, ViewerZone};
use std::collections::BTreeMap;

/// Records of a snapshot that pass every active filter.
#[derive(Debug)]
pub struct Filtered<'a, T> {
    matches: Vec<&'a T>,
}

impl<T: ListRecord> Filtered<'_, T> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The `[(page - 1) * per_page, +per_page)` slice, cloned out of the snapshot.
    pub fn page(&self, page: u32, per_page: u32) -> Vec<T> {
        let per_page = per_page.max(1) as usize;
        let start = (page.max(1) as usize - 1).saturating_mul(per_page);
        self.matches
            .iter()
            .skip(start)
            .take(per_page)
            .map(|record| (*record).clone())
            .collect()
    }
}

pub fn filter_snapshot<'a, T: ListRecord>(
    snapshot: &'a [T],
    filters: &FilterStore,
    zone: ViewerZone,
) -> Filtered<'a, T> {
    let predicate = filters.predicate(zone);
    Filtered {
        matches: snapshot
            .iter()
            .filter(|record| predicate.matches(*record))
            .collect(),
    }
}

/// Record count behind each tab, honouring every other active filter.
/// A tab whose value is a sentinel counts everything.
pub fn tab_counts<T: ListRecord>(
    snapshot: &[T],
    filters: &FilterStore,
    zone: ViewerZone,
    tabs: &FilterTabs,
) -> BTreeMap<String, usize> {
    let mut others = filters.clone();
    if others.clear(tabs.filter).is_err() {
        return BTreeMap::new();
    }
    let base = filter_snapshot(snapshot, &others, zone);

    let mut counts = BTreeMap::new();
    for tab in &tabs.tabs {
        let mut probe = others.clone();
        let count = match probe.set(tabs.filter, tab.value) {
            Ok(()) => {
                let predicate = probe.predicate(zone);
                base.matches
                    .iter()
                    .filter(|record| predicate.matches(**record))
                    .count()
            }
            Err(_) => 0,
        };
        counts.insert(tab.value.to_string(), count);
    }
    counts
}
