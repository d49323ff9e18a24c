//! Page bookkeeping for a list view.

use crate::framework::ListError;
use crate::sources::PageMeta;

/// Number of pages needed for `total` items, never less than one.
pub fn total_pages_for(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX).max(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    current_page: u32,
    items_per_page: u32,
    total_items: u64,
    total_pages: u32,
    /// Allowed page sizes; empty means any positive size.
    choices: Vec<u32>,
}

impl PaginationState {
    pub fn new(items_per_page: u32, choices: Vec<u32>) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
            total_pages: 1,
            choices,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Accepts any positive page; the upper bound is only known after a fetch.
    pub fn set_page(&mut self, page: u32) -> Result<(), ListError> {
        if page == 0 {
            return Err(ListError::Validation("page numbers start at 1".into()));
        }
        self.current_page = page;
        Ok(())
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    pub fn set_items_per_page(&mut self, per_page: u32) -> Result<(), ListError> {
        if per_page == 0 {
            return Err(ListError::Validation("items per page must be positive".into()));
        }
        if !self.choices.is_empty() && !self.choices.contains(&per_page) {
            return Err(ListError::Validation(format!(
                "items per page must be one of {:?}",
                self.choices
            )));
        }
        self.items_per_page = per_page;
        self.current_page = 1;
        Ok(())
    }

    /// Totals reported by the backend, taken as given. A missing page count is 1.
    pub fn apply_meta(&mut self, meta: &PageMeta) {
        self.total_items = meta.total.unwrap_or(0);
        self.total_pages = meta.total_pages.unwrap_or(1).max(1);
    }

    /// Totals of a locally filtered sequence.
    pub fn apply_total(&mut self, total: u64) {
        self.total_items = total;
        self.total_pages = total_pages_for(total, self.items_per_page);
    }

    /// Pulls the current page back into range. Returns whether it moved.
    pub fn clamp(&mut self) -> bool {
        if self.current_page > self.total_pages {
            self.current_page = self.total_pages;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(total_pages_for(23, 10), 3);
        assert_eq!(total_pages_for(20, 10), 2);
        assert_eq!(total_pages_for(1, 50), 1);
        assert_eq!(total_pages_for(0, 10), 1);
    }

    #[test]
    fn page_zero_is_rejected_but_any_upper_page_is_accepted() {
        let mut pages = PaginationState::new(10, vec![]);
        assert!(pages.set_page(0).is_err());
        pages.set_page(99).unwrap();
        assert_eq!(pages.current_page(), 99);
    }

    #[test]
    fn page_size_must_be_an_offered_choice() {
        let mut pages = PaginationState::new(10, vec![5, 10, 20, 50]);
        pages.set_page(4).unwrap();
        assert!(pages.set_items_per_page(7).is_err());
        assert_eq!(pages.current_page(), 4);
        pages.set_items_per_page(20).unwrap();
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.items_per_page(), 20);
    }

    #[test]
    fn meta_without_page_count() {
        let mut pages = PaginationState::new(10, vec![]);
        pages.apply_meta(&PageMeta {
            total: Some(23),
            total_pages: None,
        });
        assert_eq!(pages.total_items(), 23);
        assert_eq!(pages.total_pages(), 1);

        pages.apply_meta(&PageMeta::default());
        assert_eq!(pages.total_items(), 0);
        assert_eq!(pages.total_pages(), 1);
    }

    #[test]
    fn clamp_after_totals_shrink() {
        let mut pages = PaginationState::new(10, vec![]);
        pages.set_page(5).unwrap();
        pages.apply_total(12);
        assert!(pages.clamp());
        assert_eq!(pages.current_page(), 2);
        assert!(!pages.clamp());
    }
}
