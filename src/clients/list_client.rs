use crate::framework::{ListError, ListQueryClient, ListRecord};
use crate::query::ViewModel;
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for view-specific clients to inherit the paging and lifecycle calls
/// every list shares.
///
/// Implementors only provide [`ListClient::inner`]; filter helpers with
/// view-specific types live on the concrete client.
#[async_trait]
pub trait ListClient<T: ListRecord>: Send + Sync {
    /// Access the inner generic ListQueryClient.
    fn inner(&self) -> &ListQueryClient<T>;

    #[tracing::instrument(skip(self))]
    async fn go_to_page(&self, page: u32) -> Result<(), ListError> {
        tracing::debug!("Sending request");
        self.inner().set_page(page).await
    }

    #[tracing::instrument(skip(self))]
    async fn set_items_per_page(&self, per_page: u32) -> Result<(), ListError> {
        tracing::debug!("Sending request");
        self.inner().set_items_per_page(per_page).await
    }

    #[tracing::instrument(skip(self))]
    async fn set_connectivity(&self, online: bool) -> Result<(), ListError> {
        tracing::debug!("Sending request");
        self.inner().set_connectivity(online).await
    }

    /// Re-fetch right away, e.g. after a mutation on one of the listed records.
    #[tracing::instrument(skip(self))]
    async fn refresh(&self) -> Result<(), ListError> {
        tracing::debug!("Sending request");
        self.inner().refresh().await
    }

    async fn view(&self) -> Result<ViewModel<T>, ListError> {
        self.inner().view().await
    }

    async fn settled(&self) -> Result<ViewModel<T>, ListError> {
        self.inner().settled().await
    }

    fn subscribe(&self) -> watch::Receiver<ViewModel<T>> {
        self.inner().subscribe()
    }
}
