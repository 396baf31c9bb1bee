//! Client-side product store.
//!
//! Single source of truth for the dashboard's product cache, filter criteria
//! and pagination state. All mutation goes through named actions; reads
//! derive their view through the pure engines in [`filters`] and [`paging`].
//!
//! The store is an explicit, injectable container: construct one per session
//! and pass it by reference. `&mut self` actions give it the same
//! single-logical-thread, last-write-wins behavior the dashboard had, with
//! no internal locking, cancellation or retry.

use chrono::NaiveDate;

use crate::domain::product::{Product, SortOrder};
use crate::store::api::{AddProductPayload, ApiClient};
use crate::store::filters::{FilterCriteria, filter_products};
use crate::store::paging::{PaginationState, page_slice};

pub mod api;
pub mod filters;
pub mod paging;

/// The aggregate state the store owns.
#[derive(Debug, Default)]
pub struct StoreState {
    /// Authoritative local cache of server data.
    pub products: Vec<Product>,
    pub filters: FilterCriteria,
    pub pagination: PaginationState,
    pub is_loading: bool,
    /// Last error message, cleared at the start of every remote action.
    pub error: Option<String>,
}

/// Result of an [`ProductStore::add_product`] action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddProductOutcome {
    pub success: bool,
    pub message: String,
}

pub struct ProductStore {
    api: ApiClient,
    state: StoreState,
}

impl ProductStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url),
            state: StoreState::default(),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Replaces the local cache with the server's product list and
    /// recomputes the page counts. The replacement is wholesale; there is no
    /// incremental merge.
    pub async fn fetch_products(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;

        match self.api.list_products().await {
            Ok(products) => {
                self.state.pagination.recompute(products.len());
                self.state.products = products;
            }
            Err(err) => {
                log::error!("Error fetching products: {err}");
                self.state.error = Some(err.to_string());
            }
        }

        self.state.is_loading = false;
    }

    /// Creates a product and resynchronizes by re-fetching the full list.
    /// The new product is never inserted optimistically; the cache is only
    /// correct after the follow-up fetch.
    pub async fn add_product(&mut self, payload: &AddProductPayload) -> AddProductOutcome {
        self.state.is_loading = true;
        self.state.error = None;

        match self.api.add_product(payload).await {
            Ok(_) => {
                self.fetch_products().await;
                self.state.is_loading = false;
                AddProductOutcome {
                    success: true,
                    message: "Product added successfully".to_string(),
                }
            }
            Err(err) => {
                log::error!("Error adding product: {err}");
                let message = err.to_string();
                self.state.error = Some(message.clone());
                self.state.is_loading = false;
                AddProductOutcome {
                    success: false,
                    message,
                }
            }
        }
    }

    /// Deletes a product remotely, then removes it from the local cache by
    /// id and re-clamps the current page. On failure the local list is left
    /// untouched and `false` is returned.
    pub async fn delete_product(&mut self, id: &str) -> bool {
        self.state.is_loading = true;
        self.state.error = None;

        match self.api.delete_product(id).await {
            Ok(()) => {
                self.state.products.retain(|product| product.id != id);
                self.state.pagination.recompute(self.state.products.len());
                self.state.is_loading = false;
                true
            }
            Err(err) => {
                log::error!("Error deleting product: {err}");
                self.state.error = Some(err.to_string());
                self.state.is_loading = false;
                false
            }
        }
    }

    fn back_to_first_page(&mut self) {
        self.state.pagination.current_page = 1;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.filters.search_query = query.into();
        self.back_to_first_page();
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.state.filters.start_date = date;
        self.back_to_first_page();
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.state.filters.end_date = date;
        self.back_to_first_page();
    }

    pub fn set_min_price(&mut self, price: impl Into<String>) {
        self.state.filters.min_price = price.into();
        self.back_to_first_page();
    }

    pub fn set_max_price(&mut self, price: impl Into<String>) {
        self.state.filters.max_price = price.into();
        self.back_to_first_page();
    }

    /// Adds the tag if absent, removes it if present.
    pub fn toggle_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        let selected = &mut self.state.filters.selected_categories;
        match selected.iter().position(|c| *c == category) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(category),
        }
        self.back_to_first_page();
    }

    /// Changing the sort order keeps the current page position.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.state.filters.sort_order = order;
    }

    pub fn reset_filters(&mut self) {
        self.state.filters = FilterCriteria::default();
        self.back_to_first_page();
    }

    /// Jumps to a page, clamped into `[1, total_pages]`.
    pub fn set_current_page(&mut self, page: usize) {
        let total_pages = self.state.pagination.total_pages.max(1);
        self.state.pagination.current_page = page.clamp(1, total_pages);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.state.pagination.set_items_per_page(items_per_page);
    }

    /// Pure derivation over the current cache and criteria.
    pub fn filtered_products(&self) -> Vec<Product> {
        filter_products(&self.state.products, &self.state.filters)
    }

    /// The page window of the filtered list. If the cached totals have
    /// drifted from the freshly computed filtered count, they are reconciled
    /// (and the page re-clamped) before slicing.
    pub fn current_page_products(&mut self) -> Vec<Product> {
        let filtered = self.filtered_products();

        if filtered.len() != self.state.pagination.total_items {
            self.state.pagination.recompute(filtered.len());
        }

        page_slice(
            &filtered,
            self.state.pagination.current_page,
            self.state.pagination.items_per_page,
        )
        .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(id: &str, price: f64, created: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            price,
            images: vec!["https://img.example.com/a.png".into()],
            category: None,
            created_at: format!("{created}T00:00:00").parse().unwrap(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    fn store_with(products: Vec<Product>) -> ProductStore {
        let mut store = ProductStore::new("http://localhost:0");
        store.state.pagination.recompute(products.len());
        store.state.products = products;
        store
    }

    #[test]
    fn filter_mutators_reset_page_except_sort_order() {
        let products: Vec<Product> = (0..30)
            .map(|i| product(&format!("p{i}"), i as f64, "2024-01-01"))
            .collect();
        let mut store = store_with(products);

        store.set_current_page(3);
        assert_eq!(store.state().pagination.current_page, 3);
        store.set_sort_order(SortOrder::PriceHighLow);
        assert_eq!(store.state().pagination.current_page, 3);

        store.set_search_query("p1");
        assert_eq!(store.state().pagination.current_page, 1);

        store.set_current_page(2);
        store.set_min_price("5");
        assert_eq!(store.state().pagination.current_page, 1);
    }

    #[test]
    fn toggle_category_has_set_semantics() {
        let mut store = store_with(vec![]);
        store.toggle_category("lighting");
        store.toggle_category("lighting");
        assert!(store.state().filters.selected_categories.is_empty());

        store.toggle_category("lighting");
        store.toggle_category("lighting");
        store.toggle_category("furniture");
        assert_eq!(store.state().filters.selected_categories, vec!["furniture"]);
    }

    #[test]
    fn reset_filters_is_idempotent() {
        let mut store = store_with(vec![]);
        store.set_search_query("lamp");
        store.set_min_price("5");
        store.toggle_category("lighting");
        store.set_sort_order(SortOrder::Oldest);

        store.reset_filters();
        let once = store.state().filters.clone();
        store.reset_filters();
        assert_eq!(store.state().filters, once);
        assert_eq!(once, FilterCriteria::default());
    }

    #[test]
    fn page_navigation_scenario() {
        let mut store = store_with(vec![
            product("a", 1.0, "2024-01-02"),
            product("b", 2.0, "2024-01-01"),
        ]);
        store.set_items_per_page(1);

        assert_eq!(store.state().pagination.total_pages, 2);
        let page = store.current_page_products();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, "a");

        store.set_current_page(2);
        assert_eq!(store.current_page_products()[0].id, "b");

        // Out-of-range request clamps to the last page.
        store.set_current_page(3);
        assert_eq!(store.state().pagination.current_page, 2);
        assert_eq!(store.current_page_products()[0].id, "b");
    }

    #[test]
    fn current_page_products_heals_drifted_totals() {
        let products: Vec<Product> = (0..12)
            .map(|i| product(&format!("p{i}"), i as f64, "2024-01-01"))
            .collect();
        let mut store = store_with(products);
        store.set_items_per_page(5);
        store.set_current_page(3);

        // Narrow the filter without recomputing: cached totals are stale.
        store.state.filters.search_query = "p1".to_string();

        let page = store.current_page_products();
        // p1, p10, p11 match; one page of 5, clamped back to page 1.
        assert_eq!(store.state().pagination.total_items, 3);
        assert_eq!(store.state().pagination.total_pages, 1);
        assert_eq!(store.state().pagination.current_page, 1);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn empty_list_keeps_page_one_valid() {
        let mut store = store_with(vec![]);
        assert!(store.current_page_products().is_empty());
        assert_eq!(store.state().pagination.total_pages, 1);
        assert_eq!(store.state().pagination.current_page, 1);
    }
}
