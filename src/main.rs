//! HTTP server for the merchant dashboard.
//!
//! Loads the order list once at startup and serves a single session. Configuration comes
//! from the environment; see [`merchant_dashboard::AppConfig`].

use merchant_dashboard::{api, load_orders, AppConfig};
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = env_logger::try_init();
    let config = AppConfig::from_env();
    log::info!("starting with {:?}", config);

    let orders = match load_orders(&config.orders_path) {
        Ok(orders) => orders,
        Err(e) => {
            log::error!("cannot load orders: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let addr = format!("0.0.0.0:{}", config.port);
    let app = match api::create_router(config, orders) {
        Ok(app) => app,
        Err(e) => {
            log::error!("cannot build router: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("cannot bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        log::error!("server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
