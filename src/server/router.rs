//! Router builder utilities for the invoice routes

use crate::server::handlers::{
    AppState, create_invoice, delete_invoice, list_invoices, update_invoice,
};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build the invoice routes under `invoices_path`
///
/// - GET  {invoices_path} - cached list view
/// - POST {invoices_path} - create
/// - POST {invoices_path}/{id}/edit - update
/// - POST {invoices_path}/{id}/delete - delete
pub fn build_invoice_routes(state: AppState, invoices_path: &str) -> Router {
    Router::new()
        .route(invoices_path, get(list_invoices).post(create_invoice))
        .route(&format!("{}/{{id}}/edit", invoices_path), post(update_invoice))
        .route(&format!("{}/{{id}}/delete", invoices_path), post(delete_invoice))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
