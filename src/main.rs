use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use tracing::{error, info, warn};

use activities_board::config::AppConfig;
use activities_board::database::schema;
use activities_board::web;

#[tokio::main]
async fn main() {
    // Load .env
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    // 2. Database
    info!("Connecting to database: {}", config.database_url);
    let pool = match SqlitePoolOptions::new().connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Cannot connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = schema::ensure_schema(&pool).await {
        error!("Cannot create schema: {}", e);
        std::process::exit(1);
    }
    if config.seed_activities {
        if let Err(e) = schema::seed_activities_if_empty(&pool).await {
            error!("Cannot seed activities: {}", e);
            std::process::exit(1);
        }
    }

    // 3. Application
    let app = web::router(pool, &config.assets_dir);

    // 4. Serve (with fallback port)
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Cannot parse host/port {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), config.port.saturating_add(1));
            warn!("Cannot bind {}: {}. Trying fallback {}", addr, e, fallback);
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    error!("Cannot bind fallback port: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(bound) => info!("Server running on http://{}/", bound),
        Err(e) => warn!("Cannot read bound address: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
