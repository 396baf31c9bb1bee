//! HTTP route handlers and shared response helpers.

use actix_web::HttpResponse;
use actix_web_flash_messages::Level;
use log::error;
use tera::{Context, Tera};

pub mod main;
pub mod products;

/// Page size of the server-rendered dashboard table.
pub const DASHBOARD_ITEMS_PER_PAGE: usize = 10;

/// Maps flash levels onto the alert classes the templates use.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Renders a Tera template into an HTML response.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Failed to render template {name}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
