use std::str::FromStr;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use ratekeeper_core::fx::{ConversionResult, ExchangeRateServiceTrait};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExchangeQuery {
    from: Option<String>,
    to: Option<String>,
    amount: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_amount(raw: &str) -> ApiResult<Decimal> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|_| ApiError::BadRequest(format!("Amount '{}' is not a valid number.", raw)))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ApiError::BadRequest("Amount must not be negative.".to_string()));
    }
    Ok(amount)
}

async fn exchange(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExchangeQuery>,
) -> ApiResult<Json<ConversionResult>> {
    let (Some(from), Some(to), Some(amount)) = (
        required(query.from),
        required(query.to),
        required(query.amount),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required parameters: from, to, amount.".to_string(),
        ));
    };

    let amount = parse_amount(&amount)?;
    let result = state.exchange_rate_service.convert(&from, &to, amount)?;
    Ok(Json(result))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/exchange", get(exchange))
}
