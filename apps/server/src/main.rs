use ratekeeper_server::{
    api::app_router, build_state, config::Config, init_tracing, scheduler::RateSyncScheduler,
};
use tracing::{info, warn};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(&config).await?;

    let scheduler = if config.sync_enabled {
        Some(RateSyncScheduler::start(
            state.rate_sync_service.clone(),
            config.sync_interval,
        ))
    } else {
        info!("Scheduled rate sync is disabled");
        None
    };

    let router = app_router(state, &config);
    info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    Ok(())
}
