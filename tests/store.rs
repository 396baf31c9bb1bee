use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};

use product_admin::images::ImageStore;
use product_admin::repository::DieselRepository;
use product_admin::routes::products::{add_product, delete_product, list_products};
use product_admin::store::ProductStore;
use product_admin::store::api::{AddProductPayload, ImageFile};

mod common;

/// Spawns the product API on an ephemeral port and returns its base URL.
fn spawn_server(repo: DieselRepository, images: Arc<dyn ImageStore>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind test listener");
    let addr = listener.local_addr().expect("failed to read local addr");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::from(images.clone()))
            .service(list_products)
            .service(add_product)
            .service(delete_product)
    })
    .workers(1)
    .listen(listener)
    .expect("failed to listen")
    .run();

    actix_web::rt::spawn(server);
    format!("http://{addr}")
}

fn payload(name: &str, price: &str) -> AddProductPayload {
    AddProductPayload {
        name: name.to_string(),
        price: price.to_string(),
        images: vec![ImageFile {
            file_name: "a.png".to_string(),
            bytes: vec![1, 2, 3],
        }],
    }
}

#[actix_web::test]
async fn store_round_trip_against_live_server() {
    let test_db = common::TestDb::new("store_round_trip.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let base_url = spawn_server(repo, Arc::new(common::MemoryImageStore::default()));

    let mut store = ProductStore::new(base_url);

    store.fetch_products().await;
    assert!(store.state().error.is_none());
    assert!(!store.state().is_loading);
    assert!(store.state().products.is_empty());
    assert_eq!(store.state().pagination.total_pages, 1);

    let outcome = store.add_product(&payload("Vintage Lamp", "49.5")).await;
    assert!(outcome.success, "{}", outcome.message);

    // The follow-up fetch ran: the product appears exactly once.
    let lamps: Vec<_> = store
        .state()
        .products
        .iter()
        .filter(|p| p.name == "vintage lamp")
        .collect();
    assert_eq!(lamps.len(), 1);
    let id = lamps[0].id.clone();
    assert_eq!(store.state().pagination.total_items, 1);

    assert!(store.delete_product(&id).await);
    assert!(store.state().products.is_empty());
    assert!(store.state().error.is_none());

    // A second delete hits the server's 404 and leaves state untouched.
    assert!(!store.delete_product(&id).await);
    assert_eq!(store.state().error.as_deref(), Some("Product not found"));
}

#[actix_web::test]
async fn failed_add_surfaces_server_message() {
    let test_db = common::TestDb::new("store_failed_add.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let base_url = spawn_server(repo, Arc::new(common::MemoryImageStore::default()));

    let mut store = ProductStore::new(base_url);

    let outcome = store
        .add_product(&AddProductPayload {
            name: "Lamp".to_string(),
            price: "10".to_string(),
            images: vec![],
        })
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "At least one image is required");
    assert_eq!(store.state().error.as_deref(), Some("At least one image is required"));
    assert!(store.state().products.is_empty());
}

#[actix_web::test]
async fn delete_clamps_current_page() {
    let test_db = common::TestDb::new("store_delete_clamps_page.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let base_url = spawn_server(repo, Arc::new(common::MemoryImageStore::default()));

    let mut store = ProductStore::new(base_url);

    for i in 0..3 {
        let outcome = store
            .add_product(&payload(&format!("product {i}"), "10"))
            .await;
        assert!(outcome.success, "{}", outcome.message);
    }

    store.set_items_per_page(1);
    store.set_current_page(3);
    assert_eq!(store.state().pagination.total_pages, 3);

    let last_page = store.current_page_products();
    assert_eq!(last_page.len(), 1);

    assert!(store.delete_product(&last_page[0].id).await);
    assert_eq!(store.state().pagination.total_pages, 2);
    assert_eq!(store.state().pagination.current_page, 2);
    assert_eq!(store.current_page_products().len(), 1);
}

#[actix_web::test]
async fn unreachable_server_sets_error_and_clears_loading() {
    // Nothing listens on this port: bind to learn a free one, then drop it.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let mut store = ProductStore::new(format!("http://127.0.0.1:{port}"));
    store.fetch_products().await;

    assert!(store.state().error.is_some());
    assert!(!store.state().is_loading);
    assert!(store.state().products.is_empty());
}
