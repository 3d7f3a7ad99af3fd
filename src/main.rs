use std::process;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mergington_activities::config::AppConfig;
use mergington_activities::database::seed;
use mergington_activities::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let store = match seed::build_store(config.seed_file.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to build activity catalog: {}", e);
            process::exit(1);
        }
    };
    info!(activities = store.len(), "activity catalog ready");

    let app = web::router(store, &config.static_dir);

    let listener = match bind(&config.host, config.port).await {
        Ok(l) => l,
        Err(e) => {
            warn!(
                "could not bind {}:{}: {}. Trying fallback port {}",
                config.host,
                config.port,
                e,
                config.port.wrapping_add(1)
            );
            match bind(&config.host, config.port.wrapping_add(1)).await {
                Ok(l) => l,
                Err(e) => {
                    error!("could not bind fallback port: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(addr) => info!("serving on http://{}", addr),
        Err(e) => warn!("listening, but local address is unavailable: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {}", e);
        process::exit(1);
    }
}

async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}
