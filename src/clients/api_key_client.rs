use crate::clients::list_client::ListClient;
use crate::framework::{ListError, ListQueryClient};
use crate::model::ApiKey;
use crate::views::api_keys::{SEARCH, STATUS};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Which keys the tab strip shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFilter {
    All,
    Active,
    Inactive,
}

impl KeyFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFilter::All => "all",
            KeyFilter::Active => "active",
            KeyFilter::Inactive => "inactive",
        }
    }
}

/// Client for the API-key list.
#[derive(Clone)]
pub struct ApiKeyClient {
    inner: ListQueryClient<ApiKey>,
}

impl ApiKeyClient {
    pub fn new(inner: ListQueryClient<ApiKey>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn show(&self, filter: KeyFilter) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner.set_filter(STATUS, filter.as_str()).await
    }

    /// Case-insensitive match on the key name.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<(), ListError> {
        debug!("Sending request");
        self.inner.set_filter(SEARCH, term.trim()).await
    }
}

#[async_trait]
impl ListClient<ApiKey> for ApiKeyClient {
    fn inner(&self) -> &ListQueryClient<ApiKey> {
        &self.inner
    }
}
