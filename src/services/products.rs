use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::domain::product::{NewProduct, Product, SortOrder};
use crate::domain::types::{ImageSet, Price, ProductName};
use crate::forms::FormError;
use crate::forms::products::AddProductForm;
use crate::images::ImageStore;
use crate::pagination::PageInfo;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the list-products service.
///
/// Numeric and date fields arrive as raw strings from the query string;
/// values that fail to parse are treated as absent, matching the upstream
/// endpoint's tolerant handling.
#[derive(Debug, Default)]
pub struct ProductsQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Comma-separated category tags.
    pub categories: Option<String>,
    pub sort_order: Option<String>,
}

/// Result payload returned by [`list_products`].
#[derive(Debug)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub pagination: PageInfo,
}

fn parse_price(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
}

fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .and_then(|s| s.trim().parse::<NaiveDate>().ok())
}

/// Default page size of the list endpoint.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Returns the requested page of products together with the pagination block.
pub fn list_products<R>(repo: &R, params: ProductsQuery) -> ServiceResult<ProductsResponse>
where
    R: ProductReader + ?Sized,
{
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1);

    let mut query = ProductListQuery::new().paginate(page, limit).sort_order(
        params
            .sort_order
            .as_deref()
            .map(SortOrder::parse_or_default)
            .unwrap_or_default(),
    );

    if let Some(term) = params
        .search
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }
    if let Some(min_price) = parse_price(&params.min_price) {
        query = query.min_price(min_price);
    }
    if let Some(max_price) = parse_price(&params.max_price) {
        query = query.max_price(max_price);
    }
    if let Some(start) = parse_date(&params.start_date) {
        query = query.start_date(start);
    }
    if let Some(end) = parse_date(&params.end_date) {
        query = query.end_date(end);
    }
    if let Some(tags) = params.categories.as_deref() {
        let tags: Vec<String> = tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !tags.is_empty() {
            query = query.categories(tags);
        }
    }

    let (total, products) = repo.list_products(query).map_err(ServiceError::from)?;

    Ok(ProductsResponse {
        products,
        pagination: PageInfo::new(total, page, limit),
    })
}

/// Validates the add-product form, uploads its images and persists the
/// product with the resulting secure URLs.
///
/// Images uploaded before a failing database write are left behind on the
/// host; record creation is the only step that is rolled back by failing.
pub async fn add_product<R>(
    repo: &R,
    images: &dyn ImageStore,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let payload = form.payload();
    if let Err(err) = payload.validate() {
        log::error!("Add-product validation failed: {err}");
        return Err(ServiceError::Form("Validation failed".to_string()));
    }
    let price = payload
        .parsed_price()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let files = form.images();
    if files.is_empty() {
        return Err(ServiceError::Form(FormError::NoImages.to_string()));
    }

    let stamp = Utc::now().timestamp_millis();
    let mut urls = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        let bytes = std::fs::read(file.file.path())
            .map_err(|err| ServiceError::Internal(format!("Failed to read upload: {err}")))?;
        let public_id = format!("product-{stamp}-{index}");
        let url = images.upload(bytes, &public_id).await.map_err(|err| {
            log::error!("Failed to upload image {public_id}: {err}");
            ServiceError::Image("Failed to upload images".to_string())
        })?;
        urls.push(url);
    }

    let new_product = NewProduct::new(
        ProductName::new(payload.product_name)?,
        Price::new(price)?,
        ImageSet::new(urls)?,
        None,
    );

    repo.create_product(&new_product).map_err(|err| {
        log::error!("Failed to save product: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a product record after best-effort removal of its stored images.
///
/// Image deletion failures are logged and never block the record deletion.
pub async fn delete_product<R>(repo: &R, images: &dyn ImageStore, id: &str) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let product = repo
        .get_product_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    for url in &product.images {
        if let Err(err) = images.delete(url).await {
            log::error!("Failed to delete image {url}: {err}");
        }
    }

    repo.delete_product(id).map_err(ServiceError::from)
}
