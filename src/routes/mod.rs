use crate::alerts::DispatchSummary;
use crate::app_state::AppState;
use crate::data_models::Product;
use crate::db::{DatabaseProduct, Message, PriceAlert, PriceUpdate, SearchFilter};
use crate::errors::AppErrors;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::error;
use validator::Validate;

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn products(
    State(state): State<AppState>,
) -> Result<Json<Vec<DatabaseProduct>>, AppErrors> {
    let products = state.db.all_products().await?;
    Ok(Json(products))
}

pub async fn product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Product>, AppErrors> {
    let product = state.db.get_product_by(id.to_owned()).await?;
    let prices = state.db.get_prices_for(&product).await?;

    let final_product = Product {
        name: product.name,
        id,
        price: product.price,
        history_prices: prices,
    };
    Ok(Json(final_product))
}

pub async fn n_products(State(state): State<AppState>) -> Result<Json<usize>, AppErrors> {
    let products = state.db.all_products().await?;
    Ok(Json(products.len()))
}

pub async fn search(
    State(state): State<AppState>,
    Json(query): Json<SearchFilter>,
) -> Result<Json<Vec<DatabaseProduct>>, AppErrors> {
    query.validate()?;
    let products = state.db.search_with_filter(query).await?;
    Ok(Json(products))
}

pub async fn search_filter(State(state): State<AppState>) -> Result<Json<SearchFilter>, AppErrors> {
    let filter = state.db.get_search_filter().await?;
    Ok(Json(filter))
}

pub async fn contact(
    State(state): State<AppState>,
    Json(msg): Json<Message>,
) -> Result<StatusCode, AppErrors> {
    msg.validate()?;
    state.db.register_message(msg).await?;
    Ok(StatusCode::OK)
}

pub async fn alert(
    State(state): State<AppState>,
    Json(alert): Json<PriceAlert>,
) -> Result<StatusCode, AppErrors> {
    alert.validate()?;
    state.db.register_alert(alert).await?;
    Ok(StatusCode::OK)
}

pub async fn remove_alert(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppErrors> {
    state.db.deactivate_alert(id).await?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Serialize)]
pub struct PriceUpdateOutcome {
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub alerts: DispatchSummary,
}

/// Price write from the admin panel or the price feed. The alert pass runs
/// after the write commits; if it fails, the price stays saved and the
/// request still succeeds ("price saved, alerting temporarily unavailable").
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(update): Json<PriceUpdate>,
) -> Result<Json<PriceUpdateOutcome>, AppErrors> {
    update.validate()?;
    let old_price = state.db.update_price(id, update.new_price).await?;
    let occurred_at = Utc::now();
    let alerts = match state
        .engine
        .evaluate_and_notify(&state.db, id, old_price, update.new_price, occurred_at)
        .await
    {
        Ok(summary) => summary,
        Err(err) => {
            error!("price saved but alert evaluation failed: {}", err);
            DispatchSummary::default()
        }
    };
    Ok(Json(PriceUpdateOutcome {
        old_price,
        new_price: update.new_price,
        alerts,
    }))
}
