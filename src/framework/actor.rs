//! # List Query Actor
//!
//! The server half of a list controller. It owns filter and pagination state,
//! the connectivity flag, the optional cache snapshot and the published
//! [`ViewModel`], and runs the fetch cycle:
//!
//! ```text
//!   input change ──► debounce (reset on every change) ──► cycle N
//!                                                         │
//!        offline + cache ─────────────────────────────────┤──► derive locally
//!        otherwise ──► spawned remote call ──► completion(N)
//!                                               │
//!   N superseded by a later input or cycle ─────┴──► discarded
//!                  Ok ──► apply page        Err + cache ──► derive locally
//!                                           Err, no cache ──► Failed (items kept)
//! ```
//!
//! All state is touched from the actor task only. Remote calls run in their own
//! tasks so inputs keep flowing while a request is outstanding; each call
//! reports back through a completion channel tagged with its cycle number.

use crate::config::ControllerConfig;
use crate::framework::{
    ListError, ListQueryClient, ListRecord, ListRequest, LoadError, Response, SourceError,
};
use crate::query::{
    filter_snapshot, tab_counts, FetchPhase, FilterStore, ListOptions, PagingMode,
    PaginationState, ResultOrigin, ViewModel,
};
use crate::sources::{RemotePage, RemoteQuery, RemoteSource};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Sleep;
use tracing::{debug, info, warn};

/// Result of one remote call, tagged with the cycle that issued it.
struct Completion<T> {
    cycle: u64,
    outcome: Result<RemotePage<T>, SourceError>,
}

/// Reports a cycle's completion exactly once. If the fetch task unwinds or is
/// dropped before finishing, the drop reports [`SourceError::Aborted`] so the
/// actor always clears `loading`.
struct CycleGuard<T> {
    cycle: u64,
    done: Option<mpsc::UnboundedSender<Completion<T>>>,
}

impl<T> CycleGuard<T> {
    fn new(cycle: u64, done: mpsc::UnboundedSender<Completion<T>>) -> Self {
        Self {
            cycle,
            done: Some(done),
        }
    }

    fn finish(mut self, outcome: Result<RemotePage<T>, SourceError>) {
        if let Some(done) = self.done.take() {
            let _ = done.send(Completion {
                cycle: self.cycle,
                outcome,
            });
        }
    }
}

impl<T> Drop for CycleGuard<T> {
    fn drop(&mut self) {
        if let Some(done) = self.done.take() {
            let _ = done.send(Completion {
                cycle: self.cycle,
                outcome: Err(SourceError::Aborted),
            });
        }
    }
}

/// Controller for one list view.
///
/// # Usage Pattern
///
/// 1. **Create**: `ListQueryActor::new(options, source, &config)` returns the actor and its client.
/// 2. **Run**: spawn `actor.run()`; it schedules the initial fetch immediately.
/// 3. **Drive**: call client methods (`set_filter`, `set_page`, `set_connectivity`...)
///    and render the view models published on `client.subscribe()`.
///
/// The loop ends when every client has been dropped.
pub struct ListQueryActor<T: ListRecord> {
    receiver: mpsc::Receiver<ListRequest<T>>,
    source: Arc<dyn RemoteSource<T>>,
    options: ListOptions,
    config: ControllerConfig,
    filters: FilterStore,
    pagination: PaginationState,
    online: bool,
    cache: Option<Arc<[T]>>,
    /// Client paging mode: the full list from the last successful remote call.
    working_set: Option<Arc<[T]>>,
    scope: Option<String>,
    view: watch::Sender<ViewModel<T>>,
    completions: mpsc::UnboundedReceiver<Completion<T>>,
    completion_tx: mpsc::UnboundedSender<Completion<T>>,
    latest_cycle: u64,
    /// Cycles up to this one were issued for inputs that have since changed.
    superseded: u64,
    debounce: Option<Pin<Box<Sleep>>>,
}

impl<T: ListRecord> ListQueryActor<T> {
    pub fn new(
        options: ListOptions,
        source: Arc<dyn RemoteSource<T>>,
        config: &ControllerConfig,
    ) -> (Self, ListQueryClient<T>) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let (completion_tx, completions) = mpsc::unbounded_channel();
        let filters = FilterStore::new(options.filters.clone());
        let pagination =
            PaginationState::new(options.default_per_page, options.per_page_choices.clone());
        let (view, view_rx) = watch::channel(ViewModel::new(&pagination));

        let actor = Self {
            receiver,
            source,
            options,
            config: config.clone(),
            filters,
            pagination,
            online: true,
            cache: None,
            working_set: None,
            scope: None,
            view,
            completions,
            completion_tx,
            latest_cycle: 0,
            superseded: 0,
            debounce: None,
        };
        (actor, ListQueryClient::new(sender, view_rx))
    }

    /// Runs the controller until all clients are dropped.
    pub async fn run(mut self) {
        let view = self.options.view;
        info!(view, paging = ?self.options.paging, "Controller started");

        // first load, debounced like any other input change
        self.schedule();

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break,
                },
                Some(done) = self.completions.recv() => self.complete(done),
                _ = debounce_elapsed(&mut self.debounce) => {
                    self.debounce = None;
                    self.start_cycle();
                }
            }
        }

        info!(view, cycles = self.latest_cycle, "Shutdown");
    }

    fn handle(&mut self, msg: ListRequest<T>) {
        let view = self.options.view;
        match msg {
            ListRequest::SetFilter {
                name,
                value,
                respond_to,
            } => {
                debug!(view, %name, %value, "SetFilter");
                let result = self.filters.set(&name, &value).map(|()| {
                    self.pagination.reset_page();
                    self.invalidate_local();
                });
                self.reply(respond_to, result);
            }
            ListRequest::ClearFilter { name, respond_to } => {
                debug!(view, %name, "ClearFilter");
                let result = self.filters.clear(&name).map(|()| self.invalidate_local());
                self.reply(respond_to, result);
            }
            ListRequest::ResetFilters { respond_to } => {
                debug!(view, "ResetFilters");
                self.filters.reset();
                self.pagination.reset_page();
                self.invalidate_local();
                self.reply(respond_to, Ok(()));
            }
            ListRequest::SetPage { page, respond_to } => {
                debug!(view, page, "SetPage");
                let result = self
                    .pagination
                    .set_page(page)
                    .map(|()| self.invalidate_local());
                self.reply(respond_to, result);
            }
            ListRequest::SetItemsPerPage {
                per_page,
                respond_to,
            } => {
                debug!(view, per_page, "SetItemsPerPage");
                let result = self
                    .pagination
                    .set_items_per_page(per_page)
                    .map(|()| self.invalidate_local());
                self.reply(respond_to, result);
            }
            ListRequest::SetConnectivity { online, respond_to } => {
                if self.online != online {
                    info!(view, online, "Connectivity changed");
                    self.online = online;
                    self.schedule();
                }
                self.reply(respond_to, Ok(()));
            }
            ListRequest::SetCache {
                snapshot,
                respond_to,
            } => {
                let same = match (&self.cache, &snapshot) {
                    (Some(old), Some(new)) => Arc::ptr_eq(old, new),
                    (None, None) => true,
                    _ => false,
                };
                if !same {
                    debug!(view, records = snapshot.as_ref().map(|s| s.len()), "SetCache");
                    self.cache = snapshot;
                    self.schedule();
                }
                self.reply(respond_to, Ok(()));
            }
            ListRequest::SetScope { scope, respond_to } => {
                if self.scope != scope {
                    debug!(view, ?scope, "SetScope");
                    self.scope = scope;
                    self.working_set = None;
                    self.schedule();
                }
                self.reply(respond_to, Ok(()));
            }
            ListRequest::Refresh { respond_to } => {
                debug!(view, "Refresh");
                self.debounce = None;
                self.start_cycle();
                self.reply(respond_to, Ok(()));
            }
            ListRequest::GetView { respond_to } => {
                let _ = respond_to.send(Ok(self.view.borrow().clone()));
            }
            ListRequest::GetQuery { respond_to } => {
                let _ = respond_to.send(Ok(self.remote_query()));
            }
        }
    }

    fn reply(&self, respond_to: Response<()>, result: Result<(), ListError>) {
        if let Err(e) = &result {
            warn!(view = self.options.view, error = %e, "Rejected input");
        }
        let _ = respond_to.send(result);
    }

    /// Filter or paging input changed. Client-paged views with a working set
    /// answer locally unless offline with a cache; everything else goes
    /// through the debounce.
    fn invalidate_local(&mut self) {
        let cache_first = !self.online && self.cache.is_some();
        if self.options.paging == PagingMode::Client && !cache_first {
            if let Some(working_set) = self.working_set.clone() {
                self.apply_local(&working_set, ResultOrigin::Remote);
                return;
            }
        }
        self.schedule();
    }

    /// (Re)arms the debounce timer; a pending timer is replaced. Whatever is
    /// in flight was issued for the old inputs and will be discarded.
    fn schedule(&mut self) {
        self.superseded = self.latest_cycle;
        self.debounce = Some(Box::pin(tokio::time::sleep(self.config.debounce)));
        self.publish(|_| {});
    }

    fn remote_query(&self) -> RemoteQuery {
        match self.options.paging {
            PagingMode::Server => RemoteQuery {
                scope: self.scope.clone(),
                params: self.filters.resolve_query_params(),
                page: Some(self.pagination.current_page()),
                limit: Some(self.pagination.items_per_page()),
            },
            PagingMode::Client => RemoteQuery {
                scope: self.scope.clone(),
                ..RemoteQuery::default()
            },
        }
    }

    fn start_cycle(&mut self) {
        let view = self.options.view;
        if self.options.requires_scope && self.scope.is_none() {
            debug!(view, "No scope yet, fetch skipped");
            self.publish(|v| {
                v.loading = false;
                v.phase = FetchPhase::Idle;
            });
            return;
        }

        self.latest_cycle += 1;
        let cycle = self.latest_cycle;

        if !self.online {
            if let Some(cache) = self.cache.clone() {
                info!(view, cycle, records = cache.len(), "Offline, deriving from cache");
                self.apply_local(&cache, ResultOrigin::Local);
                return;
            }
        }

        let query = self.remote_query();
        debug!(view, cycle, ?query, "Fetch");
        self.publish(|v| {
            v.loading = true;
            v.phase = FetchPhase::Fetching;
        });

        let source = self.source.clone();
        let guard = CycleGuard::new(cycle, self.completion_tx.clone());
        let timeout = self.config.request_timeout;
        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, source.query(&query)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(SourceError::Timeout(timeout.as_millis() as u64)),
            };
            guard.finish(outcome);
        });
    }

    fn complete(&mut self, done: Completion<T>) {
        let view = self.options.view;
        if done.cycle != self.latest_cycle || done.cycle <= self.superseded {
            debug!(view, cycle = done.cycle, latest = self.latest_cycle, "Discarding stale result");
            return;
        }

        match done.outcome {
            Ok(page) => match self.options.paging {
                PagingMode::Server => self.apply_remote(page),
                PagingMode::Client => {
                    let working_set: Arc<[T]> = page.items.into();
                    info!(view, cycle = done.cycle, records = working_set.len(), "Working set loaded");
                    self.working_set = Some(working_set.clone());
                    self.apply_local(&working_set, ResultOrigin::Remote);
                }
            },
            Err(e) => {
                warn!(view, cycle = done.cycle, error = %e, "Fetch failed");
                match self.cache.clone() {
                    Some(cache) => {
                        info!(view, records = cache.len(), "Falling back to cache");
                        self.apply_local(&cache, ResultOrigin::Local);
                    }
                    None => {
                        // items stay as they were: stale but visible
                        let error = LoadError::new(view, e);
                        self.publish(|v| {
                            v.loading = false;
                            v.phase = FetchPhase::Failed;
                            v.error = Some(error);
                        });
                    }
                }
            }
        }
    }

    fn apply_remote(&mut self, page: RemotePage<T>) {
        let view = self.options.view;
        self.pagination.apply_meta(&page.effective_meta());
        if self.pagination.clamp() {
            info!(
                view,
                page = self.pagination.current_page(),
                "Requested page beyond last page, clamped"
            );
            self.schedule();
        }
        let cycle = self.latest_cycle;
        info!(view, cycle, items = page.items.len(), total = self.pagination.total_items(), "Page applied");
        self.publish(|v| {
            v.items = page.items;
            v.loading = false;
            v.error = None;
            v.phase = FetchPhase::Success;
            v.origin = ResultOrigin::Remote;
            v.tab_counts = None;
            v.cycle = cycle;
        });
    }

    /// Filters and slices `snapshot` with the current inputs.
    fn apply_local(&mut self, snapshot: &[T], origin: ResultOrigin) {
        let zone = self.options.zone;
        let filtered = filter_snapshot(snapshot, &self.filters, zone);
        self.pagination.apply_total(filtered.len() as u64);
        self.pagination.clamp();
        let items = filtered.page(
            self.pagination.current_page(),
            self.pagination.items_per_page(),
        );
        let counts = self
            .options
            .tabs
            .as_ref()
            .map(|tabs| tab_counts(snapshot, &self.filters, zone, tabs));
        let cycle = self.latest_cycle;
        debug!(view = self.options.view, cycle, items = items.len(), total = filtered.len(), "Derived locally");
        self.publish(|v| {
            v.items = items;
            v.loading = false;
            v.error = None;
            v.phase = FetchPhase::Success;
            v.origin = origin;
            v.tab_counts = counts;
            v.cycle = cycle;
        });
    }

    /// Applies `update` and refreshes page numbers and the pending flag in one
    /// atomic publish.
    fn publish(&self, update: impl FnOnce(&mut ViewModel<T>)) {
        let pending = self.debounce.is_some();
        self.view.send_modify(|v| {
            update(v);
            v.sync_pages(&self.pagination);
            v.pending = pending;
        });
    }
}

async fn debounce_elapsed(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
