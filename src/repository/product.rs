use chrono::{NaiveTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::product::{NewProduct, Product, SortOrder};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, errors::RepositoryResult,
};
use crate::schema::products;

type BoxedProductsQuery<'a> = products::BoxedQuery<'a, Sqlite>;

/// Applies the conjunctive filter set to a boxed products query.
///
/// Built twice per list call: once for the total count and once for the page
/// itself, mirroring how the upstream endpoint counts before fetching.
fn apply_filters<'a>(
    mut query: BoxedProductsQuery<'a>,
    list_query: &ProductListQuery,
) -> BoxedProductsQuery<'a> {
    if let Some(term) = &list_query.search {
        // Names are stored lowercased, so a lowercased LIKE pattern gives a
        // case-insensitive substring match.
        let pattern = format!("%{}%", term.to_lowercase());
        query = query.filter(products::name.like(pattern));
    }

    if let Some(min_price) = list_query.min_price {
        query = query.filter(products::price.ge(min_price));
    }

    if let Some(max_price) = list_query.max_price {
        query = query.filter(products::price.le(max_price));
    }

    if let Some(start) = list_query.start_date {
        query = query.filter(products::created_at.ge(start.and_time(NaiveTime::MIN)));
    }

    if let Some(end) = list_query.end_date {
        // Inclusive through the end of the day: strictly before the next
        // midnight.
        if let Some(next_day) = end.succ_opt() {
            query = query.filter(products::created_at.lt(next_day.and_time(NaiveTime::MIN)));
        }
    }

    if !list_query.categories.is_empty() {
        // IN semantics: rows without a category tag are excluded, matching
        // the upstream list endpoint.
        let tags: Vec<Option<String>> = list_query.categories.iter().cloned().map(Some).collect();
        query = query.filter(products::category.eq_any(tags));
    }

    query
}

fn apply_sort(query: BoxedProductsQuery<'_>, order: SortOrder) -> BoxedProductsQuery<'_> {
    match order {
        SortOrder::Newest => query.order(products::created_at.desc()),
        SortOrder::Oldest => query.order(products::created_at.asc()),
        SortOrder::PriceLowHigh => query.order(products::price.asc()),
        SortOrder::PriceHighLow => query.order(products::price.desc()),
    }
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        use crate::models::product::Product as DbProduct;

        let mut conn = self.pool().get()?;
        let product = products::table
            .find(id)
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::models::product::Product as DbProduct;

        let mut conn = self.pool().get()?;

        let total: i64 = apply_filters(products::table.into_boxed(), &query)
            .count()
            .get_result(&mut conn)?;

        let mut page_query = apply_sort(
            apply_filters(products::table.into_boxed(), &query),
            query.sort_order,
        );

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page.max(1) as i64;
            page_query = page_query
                .limit(per_page)
                .offset((page - 1) * per_page);
        }

        let items = page_query
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Product>>();

        Ok((total as usize, items))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};

        let mut conn = self.pool().get()?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().naive_utc();

        let row = DbNewProduct::from_domain(new_product, &id, now);
        let created = diesel::insert_into(products::table)
            .values(&row)
            .returning(DbProduct::as_returning())
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_product(&self, id: &str) -> RepositoryResult<()> {
        use crate::repository::errors::RepositoryError;

        let mut conn = self.pool().get()?;
        let affected = diesel::delete(products::table.find(id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
