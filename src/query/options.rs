//! Declarative per-view configuration of a list controller.

use crate::query::{FilterSpec, FilterTabs, ViewerZone};

/// Where filtering and slicing happen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PagingMode {
    /// The backend filters and pages; every change is a remote query.
    #[default]
    Server,
    /// The backend returns the whole unfiltered list once; filter and page
    /// changes are answered locally from it.
    Client,
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Human name of the list, used in logs and failure messages.
    pub view: &'static str,
    pub filters: Vec<FilterSpec>,
    pub tabs: Option<FilterTabs>,
    pub per_page_choices: Vec<u32>,
    pub default_per_page: u32,
    pub paging: PagingMode,
    /// Do not fetch until a scope (e.g. hostel id) has been supplied.
    pub requires_scope: bool,
    pub zone: ViewerZone,
}

impl ListOptions {
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            filters: Vec::new(),
            tabs: None,
            per_page_choices: Vec::new(),
            default_per_page: 10,
            paging: PagingMode::Server,
            requires_scope: false,
            zone: ViewerZone::Local,
        }
    }

    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filters.push(spec);
        self
    }

    pub fn tabs(mut self, tabs: FilterTabs) -> Self {
        self.tabs = Some(tabs);
        self
    }

    pub fn per_page(mut self, default: u32, choices: &[u32]) -> Self {
        self.default_per_page = default;
        self.per_page_choices = choices.to_vec();
        self
    }

    pub fn paging(mut self, paging: PagingMode) -> Self {
        self.paging = paging;
        self
    }

    pub fn requires_scope(mut self) -> Self {
        self.requires_scope = true;
        self
    }

    pub fn zone(mut self, zone: ViewerZone) -> Self {
        self.zone = zone;
        self
    }
}
