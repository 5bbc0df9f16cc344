use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use ratekeeper_core::fx::{
    ExchangeRateInput, ExchangeRateServiceTrait, ExchangeRateUpdate, ExchangeRateView,
    RateSyncServiceTrait, RateSyncSummary,
};
use serde::Deserialize;

/// Form body of `POST /exchangeRate`. `idCurrency` carries the currency code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewExchangeRateForm {
    id_currency: Option<String>,
    nominal: Option<String>,
    rate: Option<String>,
}

impl From<NewExchangeRateForm> for ExchangeRateInput {
    fn from(form: NewExchangeRateForm) -> Self {
        ExchangeRateInput {
            currency_code: form.id_currency,
            nominal: form.nominal,
            rate: form.rate,
        }
    }
}

async fn list_exchange_rates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExchangeRateView>>> {
    let rates = state.exchange_rate_service.get_exchange_rates()?;
    Ok(Json(rates))
}

async fn get_exchange_rate(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ExchangeRateView>> {
    let rate = state.exchange_rate_service.get_exchange_rate(&code)?;
    Ok(Json(rate))
}

async fn add_exchange_rate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewExchangeRateForm>,
) -> ApiResult<(StatusCode, Json<ExchangeRateView>)> {
    let added = state
        .exchange_rate_service
        .add_exchange_rate(form.into())
        .await?;
    Ok((StatusCode::CREATED, Json(added)))
}

async fn update_exchange_rate(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(update): Form<ExchangeRateUpdate>,
) -> ApiResult<Json<ExchangeRateView>> {
    let updated = state
        .exchange_rate_service
        .update_exchange_rate(&code, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_exchange_rate(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.exchange_rate_service.delete_exchange_rate(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pulls the feed now instead of waiting for the scheduler.
async fn sync_exchange_rates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RateSyncSummary>> {
    let summary = state.rate_sync_service.sync_all().await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/exchangeRate",
            get(list_exchange_rates).post(add_exchange_rate),
        )
        .route("/exchangeRate/sync", post(sync_exchange_rates))
        .route(
            "/exchangeRate/{code}",
            get(get_exchange_rate)
                .patch(update_exchange_rate)
                .delete(delete_exchange_rate),
        )
}
