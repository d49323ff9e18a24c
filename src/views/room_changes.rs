//! Warden view of room-change requests for their hostel.
//!
//! Requests are scoped by hostel id, so nothing is fetched until the warden
//! profile (and with it the hostel id) is known.

use crate::clients::RoomChangeClient;
use crate::config::{ApiConfig, ControllerConfig};
use crate::framework::ListQueryActor;
use crate::model::RoomChangeRequest;
use crate::query::{FilterSpec, FilterTab, FilterTabs, ListOptions};
use crate::sources::{HttpSource, RemoteSource};
use std::sync::Arc;

pub const VIEW: &str = "room change requests";
pub const ENDPOINT: &str = "/hostel/{scope}/room-change-requests";

pub const STATUS: &str = "status";
pub const SEARCH: &str = "searchTerm";

pub fn options() -> ListOptions {
    ListOptions::new(VIEW)
        .filter(
            FilterSpec::equals(STATUS)
                .with_sentinel("all")
                .with_default("Pending"),
        )
        .filter(FilterSpec::search(
            SEARCH,
            &["studentName", "rollNumber", "currentRoom"],
        ))
        .tabs(FilterTabs {
            filter: STATUS,
            tabs: vec![
                FilterTab { label: "All", value: "all" },
                FilterTab { label: "Pending", value: "Pending" },
                FilterTab { label: "Approved", value: "Approved" },
                FilterTab { label: "Rejected", value: "Rejected" },
            ],
        })
        .per_page(10, &[10])
        .requires_scope()
}

pub fn http_source(api: &ApiConfig) -> HttpSource<RoomChangeRequest> {
    HttpSource::new(api, ENDPOINT)
}

/// Creates the room-change controller and its client.
pub fn new(
    source: Arc<dyn RemoteSource<RoomChangeRequest>>,
    config: &ControllerConfig,
) -> (ListQueryActor<RoomChangeRequest>, RoomChangeClient) {
    let (actor, generic_client) = ListQueryActor::new(options(), source, config);
    (actor, RoomChangeClient::new(generic_client))
}
