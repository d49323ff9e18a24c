//! # Controller Messages
//!
//! The requests a [`ListQueryClient`](crate::framework::ListQueryClient) sends to its
//! [`ListQueryActor`](crate::framework::ListQueryActor). Every request carries a
//! one-shot responder so the caller learns whether the input was accepted; the
//! resulting data arrives later through the view-model subscription.

use crate::framework::error::ListError;
use crate::framework::ListRecord;
use crate::query::ViewModel;
use crate::sources::RemoteQuery;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the controller.
pub type Response<R> = oneshot::Sender<Result<R, ListError>>;

/// Inputs to the controller.
///
/// The first group mutates filter or pagination state and re-enters the fetch
/// cycle through the debounce. `Refresh` bypasses the debounce. `GetView` and
/// `GetQuery` are read-only.
#[derive(Debug)]
pub enum ListRequest<T: ListRecord> {
    SetFilter {
        name: String,
        value: String,
        respond_to: Response<()>,
    },
    /// Return a filter to its no-op value without resetting the page.
    ClearFilter {
        name: String,
        respond_to: Response<()>,
    },
    ResetFilters {
        respond_to: Response<()>,
    },
    SetPage {
        page: u32,
        respond_to: Response<()>,
    },
    SetItemsPerPage {
        per_page: u32,
        respond_to: Response<()>,
    },
    SetConnectivity {
        online: bool,
        respond_to: Response<()>,
    },
    SetCache {
        snapshot: Option<Arc<[T]>>,
        respond_to: Response<()>,
    },
    SetScope {
        scope: Option<String>,
        respond_to: Response<()>,
    },
    Refresh {
        respond_to: Response<()>,
    },
    GetView {
        respond_to: Response<ViewModel<T>>,
    },
    GetQuery {
        respond_to: Response<RemoteQuery>,
    },
}
