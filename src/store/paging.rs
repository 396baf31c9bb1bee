//! Pagination engine: page windows and page counts over a filtered list.

/// Derived page-windowing metadata over the filtered product list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    /// 1-based current page, always within `[1, total_pages]`.
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: 10,
            total_items: 0,
            total_pages: 1,
        }
    }
}

impl PaginationState {
    /// Recomputes the totals for a new filtered count and clamps the current
    /// page back into range.
    pub fn recompute(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages = total_pages(total_items, self.items_per_page);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    /// Changes the page size, then recomputes and clamps.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.recompute(self.total_items);
    }
}

/// `max(1, ceil(total_items / page_size))`: page 1 stays valid even for an
/// empty result.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Half-open window `[(page-1)*size, page*size)` clamped to the list bounds.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
