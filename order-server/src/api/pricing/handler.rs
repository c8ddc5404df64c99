//! Pricing API Handlers

use axum::Json;
use shared::models::{OrderConfiguration, PriceBreakdown};

use crate::pricing::compute_price;

/// POST /api/price - 计算价格明细
pub async fn preview(Json(config): Json<OrderConfiguration>) -> Json<PriceBreakdown> {
    Json(compute_price(&config))
}
