use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::forms::products::AddProductForm;
use crate::images::ImageStore;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::products::{self, ProductsQuery};

#[derive(Debug, Deserialize)]
struct ListQueryParams {
    page: Option<usize>,
    limit: Option<usize>,
    search: Option<String>,
    #[serde(rename = "minPrice")]
    min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    max_price: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
    categories: Option<String>,
    #[serde(rename = "sortOrder")]
    sort_order: Option<String>,
}

impl From<ListQueryParams> for ProductsQuery {
    fn from(params: ListQueryParams) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            search: params.search,
            min_price: params.min_price,
            max_price: params.max_price,
            start_date: params.start_date,
            end_date: params.end_date,
            categories: params.categories,
            sort_order: params.sort_order,
        }
    }
}

/// Maps a service failure onto the uniform `{ success: false, message }`
/// error envelope.
fn error_response(err: ServiceError, fallback: &str) -> HttpResponse {
    match err {
        ServiceError::Form(message) => {
            HttpResponse::BadRequest().json(json!({ "success": false, "message": message }))
        }
        ServiceError::NotFound => HttpResponse::NotFound()
            .json(json!({ "success": false, "message": "Product not found" })),
        ServiceError::Image(message) => {
            error!("Image host failure: {message}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": message }))
        }
        err => {
            error!("{fallback}: {err}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": fallback }))
        }
    }
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<ListQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.into_inner().into()) {
        Ok(response) => HttpResponse::Ok().json(json!({
            "success": true,
            "products": response.products,
            "pagination": response.pagination,
        })),
        Err(err) => error_response(err, "An error occurred while fetching products"),
    }
}

#[post("/products/add-product")]
pub async fn add_product(
    MultipartForm(form): MultipartForm<AddProductForm>,
    repo: web::Data<DieselRepository>,
    images: web::Data<dyn ImageStore>,
) -> impl Responder {
    match products::add_product(repo.get_ref(), images.get_ref(), form).await {
        Ok(product) => HttpResponse::Created().json(json!({
            "success": true,
            "message": "Product added successfully",
            "product": product,
        })),
        Err(err) => error_response(err, "An error occurred while adding product"),
    }
}

#[delete("/products/delete-product/{id}")]
pub async fn delete_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    images: web::Data<dyn ImageStore>,
) -> impl Responder {
    let id = path.into_inner();
    match products::delete_product(repo.get_ref(), images.get_ref(), &id).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Product deleted successfully",
        })),
        Err(err) => error_response(err, "An error occurred while deleting product"),
    }
}
