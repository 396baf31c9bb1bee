use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::Value;

use product_admin::images::ImageStore;
use product_admin::repository::DieselRepository;
use product_admin::routes::products::{add_product, delete_product, list_products};

mod common;

const BOUNDARY: &str = "----product-admin-test-boundary";

/// Builds a `multipart/form-data` body from text fields and file parts.
fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, filename, contents) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn add_product_request(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/products/add-product")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(fields, files))
}

macro_rules! test_app {
    ($repo:expr, $images:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::from(Arc::clone(&$images)))
                .service(list_products)
                .service(add_product)
                .service(delete_product),
        )
        .await
    };
}

#[actix_web::test]
async fn add_list_delete_round_trip() {
    let test_db = common::TestDb::new("routes_add_list_delete.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let images: Arc<common::MemoryImageStore> = Arc::new(common::MemoryImageStore::default());
    let store: Arc<dyn ImageStore> = images.clone();
    let app = test_app!(repo, store);

    let resp = test::call_service(
        &app,
        add_product_request(
            &[("productName", "Vintage Lamp"), ("price", "49.5")],
            &[
                ("image-0", "a.png", b"png-bytes-a"),
                ("image-1", "b.png", b"png-bytes-b"),
            ],
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["product"]["name"], "vintage lamp");
    assert_eq!(body["product"]["images"].as_array().unwrap().len(), 2);
    let id = body["product"]["_id"].as_str().unwrap().to_string();
    assert_eq!(images.uploads.lock().unwrap().len(), 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/products").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["pages"], 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/products/delete-product/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    // Both stored images were removed best-effort.
    assert_eq!(images.deletes.lock().unwrap().len(), 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/products").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn add_product_without_images_is_rejected() {
    let test_db = common::TestDb::new("routes_add_without_images.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let store: Arc<dyn ImageStore> = Arc::new(common::MemoryImageStore::default());
    let app = test_app!(repo, store);

    let resp = test::call_service(
        &app,
        add_product_request(&[("productName", "Lamp"), ("price", "10")], &[]).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "At least one image is required");
}

#[actix_web::test]
async fn add_product_with_invalid_price_is_rejected() {
    let test_db = common::TestDb::new("routes_add_invalid_price.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let store: Arc<dyn ImageStore> = Arc::new(common::MemoryImageStore::default());
    let app = test_app!(repo, store);

    let resp = test::call_service(
        &app,
        add_product_request(
            &[("productName", "Lamp"), ("price", "-3")],
            &[("image-0", "a.png", b"png-bytes")],
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn delete_missing_product_returns_404() {
    let test_db = common::TestDb::new("routes_delete_missing.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let store: Arc<dyn ImageStore> = Arc::new(common::MemoryImageStore::default());
    let app = test_app!(repo, store);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/products/delete-product/no-such-id")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product not found");
}

#[actix_web::test]
async fn list_products_applies_query_parameters() {
    let test_db = common::TestDb::new("routes_list_query_params.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let store: Arc<dyn ImageStore> = Arc::new(common::MemoryImageStore::default());
    let app = test_app!(repo, store);

    for (name, price) in [("cheap lamp", "5"), ("mid lamp", "10"), ("oak table", "20")] {
        let resp = test::call_service(
            &app,
            add_product_request(
                &[("productName", name), ("price", price)],
                &[("image-0", "a.png", b"png-bytes")],
            )
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/products?search=lamp&minPrice=6&sortOrder=price-high-low&limit=10")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "mid lamp");
    assert_eq!(body["pagination"]["limit"], 10);

    // Unparsable bounds and unknown sort orders fall back silently.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/products?minPrice=cheap&sortOrder=bogus")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 3);
}
