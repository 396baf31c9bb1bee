use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use log::error;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::pagination::Paginated;
use crate::repository::{DieselRepository, ProductListQuery};
use crate::routes::{DASHBOARD_ITEMS_PER_PAGE, alert_level_to_str, render_template};

#[derive(Deserialize)]
struct IndexQueryParams {
    q: Option<String>,
    page: Option<usize>,
}

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQueryParams>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
) -> impl Responder {
    use crate::repository::ProductReader;

    let page = params.page.unwrap_or(1);
    let q = params.q.as_deref().unwrap_or("").trim();
    let mut context = Context::new();

    let mut query = ProductListQuery::new().paginate(page, DASHBOARD_ITEMS_PER_PAGE);
    if !q.is_empty() {
        context.insert("search_query", q);
        query = query.search(q);
    }

    let products = match repo.list_products(query) {
        Ok((total, products)) => Paginated::new(
            products,
            page,
            total.div_ceil(DASHBOARD_ITEMS_PER_PAGE),
        ),
        Err(e) => {
            error!("Failed to list products: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    context.insert("alerts", &alerts);
    context.insert("current_page", "index");
    context.insert("products", &products);

    render_template(&tera, "main/index.html", &context)
}
