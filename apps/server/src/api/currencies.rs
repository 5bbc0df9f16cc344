use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use ratekeeper_core::currencies::{Currency, CurrencyInput, CurrencyServiceTrait, CurrencyUpdate};

async fn list_currencies(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Currency>>> {
    let currencies = state.currency_service.get_currencies()?;
    Ok(Json(currencies))
}

async fn get_currency(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Currency>> {
    let currency = state.currency_service.get_currency(&code)?;
    Ok(Json(currency))
}

async fn create_currency(
    State(state): State<Arc<AppState>>,
    Form(input): Form<CurrencyInput>,
) -> ApiResult<(StatusCode, Json<Currency>)> {
    let created = state.currency_service.add_currency(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_currency(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(update): Form<CurrencyUpdate>,
) -> ApiResult<Json<Currency>> {
    let updated = state.currency_service.update_currency(&code, update).await?;
    Ok(Json(updated))
}

async fn delete_currency(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.currency_service.delete_currency(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currency", get(list_currencies).post(create_currency))
        .route(
            "/currency/{code}",
            get(get_currency)
                .patch(update_currency)
                .delete(delete_currency),
        )
}
