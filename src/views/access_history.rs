//! Student access history: check-ins and check-outs, filterable by direction and day.
//!
//! The only view that receives a cache snapshot, so it keeps working offline.

use crate::clients::AccessHistoryClient;
use crate::config::{ApiConfig, ControllerConfig};
use crate::framework::ListQueryActor;
use crate::model::AccessEntry;
use crate::query::{FilterSpec, FilterTab, FilterTabs, ListOptions};
use crate::sources::{HttpSource, RemoteSource};
use std::sync::Arc;

pub const VIEW: &str = "access history";
pub const ENDPOINT: &str = "/security/entries";
pub const ITEMS_KEY: &str = "studentEntries";

pub const STATUS: &str = "status";
pub const DATE: &str = "date";

pub fn options() -> ListOptions {
    ListOptions::new(VIEW)
        .filter(FilterSpec::equals(STATUS).with_sentinel("all").with_default("all"))
        .filter(FilterSpec::same_day(DATE))
        .tabs(FilterTabs {
            filter: STATUS,
            tabs: vec![
                FilterTab { label: "All", value: "all" },
                FilterTab { label: "Checked In", value: "Checked In" },
                FilterTab { label: "Checked Out", value: "Checked Out" },
            ],
        })
        .per_page(10, &[5, 10, 20, 50])
}

pub fn http_source(api: &ApiConfig) -> HttpSource<AccessEntry> {
    HttpSource::new(api, ENDPOINT).items_key(ITEMS_KEY)
}

/// Creates the access-history controller and its client.
pub fn new(
    source: Arc<dyn RemoteSource<AccessEntry>>,
    config: &ControllerConfig,
) -> (ListQueryActor<AccessEntry>, AccessHistoryClient) {
    let (actor, generic_client) = ListQueryActor::new(options(), source, config);
    (actor, AccessHistoryClient::new(generic_client))
}
