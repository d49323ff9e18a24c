//! # List Query Client
//!
//! The handle presentation code holds. Cloneable; every clone talks to the same
//! controller. Input methods resolve once the controller has accepted (or
//! rejected) the change. Data arrives through [`ListQueryClient::subscribe`].

use crate::framework::{ListError, ListRecord, ListRequest, Response};
use crate::query::ViewModel;
use crate::sources::RemoteQuery;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

#[derive(Clone)]
pub struct ListQueryClient<T: ListRecord> {
    sender: mpsc::Sender<ListRequest<T>>,
    view: watch::Receiver<ViewModel<T>>,
}

impl<T: ListRecord> ListQueryClient<T> {
    pub fn new(sender: mpsc::Sender<ListRequest<T>>, view: watch::Receiver<ViewModel<T>>) -> Self {
        Self { sender, view }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ListRequest<T>,
    ) -> Result<R, ListError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ListError::ActorClosed)?;
        response.await.map_err(|_| ListError::ActorDropped)?
    }

    /// Sets a filter and goes back to page 1.
    pub async fn set_filter(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ListError> {
        let (name, value) = (name.into(), value.into());
        self.request(|respond_to| ListRequest::SetFilter {
            name,
            value,
            respond_to,
        })
        .await
    }

    /// Returns a filter to "no constraint" without touching the page.
    pub async fn clear_filter(&self, name: impl Into<String>) -> Result<(), ListError> {
        let name = name.into();
        self.request(|respond_to| ListRequest::ClearFilter { name, respond_to })
            .await
    }

    pub async fn reset_filters(&self) -> Result<(), ListError> {
        self.request(|respond_to| ListRequest::ResetFilters { respond_to })
            .await
    }

    pub async fn set_page(&self, page: u32) -> Result<(), ListError> {
        self.request(|respond_to| ListRequest::SetPage { page, respond_to })
            .await
    }

    pub async fn set_items_per_page(&self, per_page: u32) -> Result<(), ListError> {
        self.request(|respond_to| ListRequest::SetItemsPerPage {
            per_page,
            respond_to,
        })
        .await
    }

    pub async fn set_connectivity(&self, online: bool) -> Result<(), ListError> {
        self.request(|respond_to| ListRequest::SetConnectivity { online, respond_to })
            .await
    }

    pub async fn set_cache(&self, snapshot: Option<Arc<[T]>>) -> Result<(), ListError> {
        self.request(|respond_to| ListRequest::SetCache {
            snapshot,
            respond_to,
        })
        .await
    }

    pub async fn set_scope(&self, scope: Option<String>) -> Result<(), ListError> {
        self.request(|respond_to| ListRequest::SetScope { scope, respond_to })
            .await
    }

    /// Fetches now, skipping the debounce.
    pub async fn refresh(&self) -> Result<(), ListError> {
        self.request(|respond_to| ListRequest::Refresh { respond_to })
            .await
    }

    /// The view model as the controller holds it right now.
    pub async fn view(&self) -> Result<ViewModel<T>, ListError> {
        self.request(|respond_to| ListRequest::GetView { respond_to })
            .await
    }

    /// The query the next remote fetch would send.
    pub async fn query(&self) -> Result<RemoteQuery, ListError> {
        self.request(|respond_to| ListRequest::GetQuery { respond_to })
            .await
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewModel<T>> {
        self.view.clone()
    }

    /// Waits until nothing is scheduled or in flight and a result is on display.
    pub async fn settled(&self) -> Result<ViewModel<T>, ListError> {
        let mut view = self.view.clone();
        let settled = view
            .wait_for(ViewModel::is_settled)
            .await
            .map_err(|_| ListError::ActorClosed)?;
        Ok(settled.clone())
    }
}
