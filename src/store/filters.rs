//! Filter/sort engine: pure derivation over an in-memory product list.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::product::{Product, SortOrder};

/// The active search/filter/sort parameters, owned by the store.
///
/// Price bounds are kept as raw strings; a bound that fails to parse as a
/// number is treated as absent. Dates are day-granular: the start bound is
/// floored to midnight and the end bound is inclusive through the end of its
/// day.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria {
    pub search_query: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_price: String,
    pub max_price: String,
    pub selected_categories: Vec<String>,
    pub sort_order: SortOrder,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            start_date: None,
            end_date: None,
            min_price: String::new(),
            max_price: String::new(),
            selected_categories: Vec::new(),
            sort_order: SortOrder::Newest,
        }
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|p| p.is_finite())
}

fn day_floor(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Exclusive upper bound equivalent to an inclusive 23:59:59.999 ceiling.
fn day_ceil_exclusive(date: NaiveDate) -> NaiveDateTime {
    date.checked_add_days(Days::new(1))
        .map(day_floor)
        .unwrap_or(NaiveDateTime::MAX)
}

fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    if !criteria.search_query.is_empty()
        && !product
            .name
            .to_lowercase()
            .contains(&criteria.search_query.to_lowercase())
    {
        return false;
    }

    // A product with no category tag always passes; only a known,
    // unselected tag excludes it.
    if !criteria.selected_categories.is_empty() {
        if let Some(category) = &product.category {
            if !criteria.selected_categories.contains(category) {
                return false;
            }
        }
    }

    if let Some(start) = criteria.start_date {
        if product.created_at < day_floor(start) {
            return false;
        }
    }

    if let Some(end) = criteria.end_date {
        if product.created_at >= day_ceil_exclusive(end) {
            return false;
        }
    }

    if let Some(min_price) = parse_bound(&criteria.min_price) {
        if product.price < min_price {
            return false;
        }
    }

    if let Some(max_price) = parse_bound(&criteria.max_price) {
        if product.price > max_price {
            return false;
        }
    }

    true
}

fn compare(a: &Product, b: &Product, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Newest => b.created_at.cmp(&a.created_at),
        SortOrder::Oldest => a.created_at.cmp(&b.created_at),
        SortOrder::PriceLowHigh => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortOrder::PriceHighLow => b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal),
    }
}

/// Applies every active predicate conjunctively, then sorts by the active
/// order. The sort is stable, so ties keep their original relative order.
pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|product| matches(product, criteria))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| compare(a, b, criteria.sort_order));
    filtered
}
