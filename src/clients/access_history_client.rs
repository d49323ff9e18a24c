use crate::clients::list_client::ListClient;
use crate::framework::{ListError, ListQueryClient};
use crate::model::{AccessEntry, EntryStatus};
use crate::views::access_history::{DATE, STATUS};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for the access-history list.
#[derive(Clone)]
pub struct AccessHistoryClient {
    inner: ListQueryClient<AccessEntry>,
}

impl AccessHistoryClient {
    pub fn new(inner: ListQueryClient<AccessEntry>) -> Self {
        Self { inner }
    }

    /// `None` shows both directions.
    #[instrument(skip(self))]
    pub async fn show_status(&self, status: Option<EntryStatus>) -> Result<(), ListError> {
        debug!("Sending request");
        let value = status.map_or("all", |s| s.as_str());
        self.inner.set_filter(STATUS, value).await
    }

    #[instrument(skip(self))]
    pub async fn filter_date(&self, day: NaiveDate) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner
            .set_filter(DATE, day.format("%Y-%m-%d").to_string())
            .await
    }

    /// Drops the day filter but stays on the current page.
    #[instrument(skip(self))]
    pub async fn clear_date_filter(&self) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner.clear_filter(DATE).await
    }

    /// Entries previously saved for offline use; `None` withdraws them.
    #[instrument(skip(self, entries), fields(cached = entries.as_ref().map(Vec::len)))]
    pub async fn use_cached(&self, entries: Option<Vec<AccessEntry>>) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner.set_cache(entries.map(Arc::from)).await
    }
}

#[async_trait]
impl ListClient<AccessEntry> for AccessHistoryClient {
    fn inner(&self) -> &ListQueryClient<AccessEntry> {
        &self.inner
    }
}
