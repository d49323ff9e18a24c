//! Super-admin list of API keys.
//!
//! The backend returns every key in one unpaged array; tabs, search and paging
//! are answered locally from that list.

use crate::clients::ApiKeyClient;
use crate::config::{ApiConfig, ControllerConfig};
use crate::framework::ListQueryActor;
use crate::model::ApiKey;
use crate::query::{FilterSpec, FilterTab, FilterTabs, ListOptions, PagingMode};
use crate::sources::{HttpSource, RemoteSource};
use std::sync::Arc;

pub const VIEW: &str = "API keys";
pub const ENDPOINT: &str = "/superadmin/api-keys";

pub const STATUS: &str = "status";
pub const SEARCH: &str = "searchTerm";

pub fn options() -> ListOptions {
    ListOptions::new(VIEW)
        .filter(FilterSpec::equals(STATUS).with_sentinel("all").with_default("all"))
        .filter(FilterSpec::search(SEARCH, &["name"]))
        .tabs(FilterTabs {
            filter: STATUS,
            tabs: vec![
                FilterTab { label: "All", value: "all" },
                FilterTab { label: "active", value: "active" },
                FilterTab { label: "inactive", value: "inactive" },
            ],
        })
        .per_page(20, &[10, 20, 50])
        .paging(PagingMode::Client)
}

pub fn http_source(api: &ApiConfig) -> HttpSource<ApiKey> {
    HttpSource::new(api, ENDPOINT)
}

/// Creates the API-key controller and its client.
pub fn new(
    source: Arc<dyn RemoteSource<ApiKey>>,
    config: &ControllerConfig,
) -> (ListQueryActor<ApiKey>, ApiKeyClient) {
    let (actor, generic_client) = ListQueryActor::new(options(), source, config);
    (actor, ApiKeyClient::new(generic_client))
}
