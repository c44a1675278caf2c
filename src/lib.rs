pub mod alerts;
pub mod app_state;
pub mod configuration;
pub mod data_models;
pub mod db;
pub mod errors;
mod routes;

use crate::alerts::EmailSender;
use crate::app_state::AppState;
use crate::db::Database;
use crate::errors::Error;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_app(db: Database, sender: EmailSender) -> Result<(Router, AppState), Error> {
    let app_state = AppState::init(db, sender);
    let app = Router::new()
        .route("/health_check", get(routes::health_check))
        .route("/products", get(routes::products))
        .route("/product/:id", get(routes::product))
        .route("/product/:id/price", put(routes::update_price))
        .route("/n_products", get(routes::n_products))
        .route("/search", post(routes::search))
        .route("/search_filter", get(routes::search_filter))
        .route("/contact", post(routes::contact))
        .route("/alert", post(routes::alert))
        .route("/alert/:id", delete(routes::remove_alert))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());
    Ok((app, app_state))
}
