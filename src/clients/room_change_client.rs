use crate::clients::list_client::ListClient;
use crate::framework::{ListError, ListQueryClient};
use crate::model::{RequestStatus, RoomChangeRequest};
use crate::views::room_changes::{SEARCH, STATUS};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the warden's room-change request list.
#[derive(Clone)]
pub struct RoomChangeClient {
    inner: ListQueryClient<RoomChangeRequest>,
}

impl RoomChangeClient {
    pub fn new(inner: ListQueryClient<RoomChangeRequest>) -> Self {
        Self { inner }
    }

    /// Hostel whose requests are listed. Nothing is fetched until one is set.
    #[instrument(skip(self))]
    pub async fn select_hostel(&self, hostel_id: Option<String>) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner.set_scope(hostel_id).await
    }

    /// `None` shows every status.
    #[instrument(skip(self))]
    pub async fn show_status(&self, status: Option<RequestStatus>) -> Result<(), ListError> {
        debug!("Sending request");
        let value = status.map_or("all", |s| s.as_str());
        self.inner.set_filter(STATUS, value).await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner.set_filter(SEARCH, term.trim()).await
    }

    /// Back to pending requests, no search.
    #[instrument(skip(self))]
    pub async fn reset_filters(&self) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner.reset_filters().await
    }
}

#[async_trait]
impl ListClient<RoomChangeRequest> for RoomChangeClient {
    fn inner(&self) -> &ListQueryClient<RoomChangeRequest> {
        &self.inner
    }
}
