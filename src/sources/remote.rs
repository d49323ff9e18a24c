//! The seam between the controller and whatever answers list queries.

use crate::framework::SourceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a backend needs to answer one page request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteQuery {
    /// Path-level scope such as a hostel id.
    pub scope: Option<String>,
    /// Active filters, sentinels already removed.
    pub params: BTreeMap<String, String>,
    /// `None` when the view pages on the client.
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl RemoteQuery {
    /// Flat key/value pairs for a query string: filters, then `page` and `limit`.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(page) = self.page {
            pairs.push(("page".into(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".into(), limit.to_string()));
        }
        pairs
    }
}

/// Totals reported alongside a page. Some endpoints call the total `totalCount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, alias = "totalCount")]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemotePage<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
}

impl<T> RemotePage<T> {
    pub fn new(items: Vec<T>, meta: Option<PageMeta>) -> Self {
        Self { items, meta }
    }

    /// Totals to apply: the reported meta, or for an unpaged answer the item count
    /// on a single page.
    pub fn effective_meta(&self) -> PageMeta {
        self.meta.unwrap_or(PageMeta {
            total: Some(self.items.len() as u64),
            total_pages: Some(1),
        })
    }
}

/// Performs list queries against a backend.
///
/// Implementations are shared with spawned fetch tasks, hence `Send + Sync + 'static`.
#[async_trait]
pub trait RemoteSource<T>: Send + Sync + 'static {
    async fn query(&self, query: &RemoteQuery) -> Result<RemotePage<T>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_append_paging_after_filters() {
        let mut query = RemoteQuery {
            page: Some(2),
            limit: Some(10),
            ..Default::default()
        };
        query.params.insert("status".into(), "Pending".into());
        assert_eq!(
            query.to_pairs(),
            vec![
                ("status".to_string(), "Pending".to_string()),
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn meta_accepts_total_count_alias() {
        let meta: PageMeta = serde_json::from_str(r#"{"totalCount": 42, "limit": 10}"#).unwrap();
        assert_eq!(meta.total, Some(42));
        assert_eq!(meta.total_pages, None);

        let meta: PageMeta = serde_json::from_str(r#"{"total": 23, "totalPages": 3}"#).unwrap();
        assert_eq!(meta, PageMeta { total: Some(23), total_pages: Some(3) });
    }
}
