//! The read-only projection of controller state handed to presentation code.

use crate::framework::LoadError;
use crate::query::PaginationState;
use std::collections::BTreeMap;

/// Where the fetch cycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No cycle has run yet, or fetching is blocked on a missing scope.
    Idle,
    Fetching,
    Success,
    Failed,
}

/// Which path produced the items on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    None,
    Remote,
    /// Derived locally from a snapshot (offline, fallback, or client paging).
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<LoadError>,
    pub page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub phase: FetchPhase,
    pub origin: ResultOrigin,
    /// A debounced fetch is scheduled but has not started.
    pub pending: bool,
    /// Per-tab counts, present when the result was derived locally.
    pub tab_counts: Option<BTreeMap<String, usize>>,
    /// Sequence number of the cycle whose result is on display.
    pub cycle: u64,
}

impl<T> ViewModel<T> {
    pub fn new(pagination: &PaginationState) -> Self {
        let mut view = Self {
            items: Vec::new(),
            loading: false,
            error: None,
            page: 1,
            items_per_page: 1,
            total_items: 0,
            total_pages: 1,
            phase: FetchPhase::Idle,
            origin: ResultOrigin::None,
            pending: false,
            tab_counts: None,
            cycle: 0,
        };
        view.sync_pages(pagination);
        view
    }

    pub(crate) fn sync_pages(&mut self, pagination: &PaginationState) {
        self.page = pagination.current_page();
        self.items_per_page = pagination.items_per_page();
        self.total_items = pagination.total_items();
        self.total_pages = pagination.total_pages();
    }

    /// A result (or failure) is on display and nothing is scheduled or in flight.
    pub fn is_settled(&self) -> bool {
        !self.pending
            && !self.loading
            && matches!(self.phase, FetchPhase::Success | FetchPhase::Failed)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
