//! An in-process backend that answers queries from a fixed record set.

use crate::framework::{ListRecord, SourceError};
use crate::query::{filter_snapshot, total_pages_for, FilterSpec, FilterStore, ViewerZone};
use crate::sources::{PageMeta, RemotePage, RemoteQuery, RemoteSource};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Applies filters and paging the way the real backend does, over an `Arc<[T]>`.
/// Can be switched unreachable to simulate an outage.
#[derive(Clone)]
pub struct StaticSource<T> {
    records: Arc<[T]>,
    filters: Vec<FilterSpec>,
    zone: ViewerZone,
    reachable: Arc<AtomicBool>,
}

impl<T: ListRecord> StaticSource<T> {
    pub fn new(records: impl Into<Arc<[T]>>, filters: Vec<FilterSpec>) -> Self {
        Self {
            records: records.into(),
            filters,
            zone: ViewerZone::utc(),
            reachable: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn records(&self) -> Arc<[T]> {
        self.records.clone()
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T: ListRecord> RemoteSource<T> for StaticSource<T> {
    async fn query(&self, query: &RemoteQuery) -> Result<RemotePage<T>, SourceError> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(SourceError::Transport("backend unreachable".into()));
        }

        let mut filters = FilterStore::new(self.filters.clone());
        for (name, value) in &query.params {
            // the real backend answers 400 to filters it does not know
            filters.set(name, value).map_err(|_| SourceError::Status(400))?;
        }
        let filtered = filter_snapshot(&self.records, &filters, self.zone);

        match (query.page, query.limit) {
            (Some(page), Some(limit)) => {
                let total = filtered.len() as u64;
                Ok(RemotePage::new(
                    filtered.page(page, limit),
                    Some(PageMeta {
                        total: Some(total),
                        total_pages: Some(total_pages_for(total, limit)),
                    }),
                ))
            }
            _ => Ok(RemotePage::new(filtered.page(1, u32::MAX), None)),
        }
    }
}
