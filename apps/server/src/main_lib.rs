use std::sync::Arc;

use crate::config::Config;
use ratekeeper_core::{
    currencies::{CurrencyService, CurrencyServiceTrait},
    fx::{
        ExchangeRateService, ExchangeRateServiceTrait, RateSyncService, RateSyncServiceTrait,
    },
};
use ratekeeper_market_data::{CbrDailyProvider, RateFeed};
use ratekeeper_storage_sqlite::{
    db::{self, PoolConfig},
    CurrencyRepository, ExchangeRateRepository,
};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub currency_service: Arc<dyn CurrencyServiceTrait>,
    pub exchange_rate_service: Arc<dyn ExchangeRateServiceTrait>,
    pub rate_sync_service: Arc<dyn RateSyncServiceTrait>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Wires storage, the central bank feed and the services together.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let feed: Arc<dyn RateFeed> = Arc::new(CbrDailyProvider::with_url(
        config.feed_url.clone(),
        config.feed_timeout,
    ));
    build_state_with_feed(config, feed).await
}

/// Same as [`build_state`] with a caller-supplied feed.
pub async fn build_state_with_feed(
    config: &Config,
    feed: Arc<dyn RateFeed>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    info!("Using database at {}", db_path);

    let pool_config = PoolConfig {
        max_size: config.pool_size,
        connection_timeout: config.pool_timeout,
        busy_timeout: config.pool_timeout,
    };
    let pool = db::create_pool(&db_path, &pool_config)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let currency_repository = Arc::new(CurrencyRepository::new(pool.clone(), writer.clone()));
    let rate_repository = Arc::new(ExchangeRateRepository::new(pool, writer));

    let rate_sync_service = Arc::new(RateSyncService::new(
        feed,
        currency_repository.clone(),
        rate_repository.clone(),
    ));
    // The initial rate fetch must give up well before the request times out.
    let currency_service = Arc::new(
        CurrencyService::new(
            currency_repository.clone(),
            rate_repository.clone(),
            rate_sync_service.clone(),
        )
        .with_initial_rate_timeout(config.request_timeout / 2),
    );
    let exchange_rate_service = Arc::new(ExchangeRateService::new(
        currency_repository,
        rate_repository,
        &config.base_currency,
    ));
    info!(
        "Exchange rates are quoted against {}",
        exchange_rate_service.base_currency()
    );

    Ok(Arc::new(AppState {
        currency_service,
        exchange_rate_service,
        rate_sync_service,
    }))
}
