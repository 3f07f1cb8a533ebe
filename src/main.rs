use anyhow::{Context, Result};
use std::sync::Arc;

mod checker;
mod config;
mod formatter;
mod handlers;
mod jmx;
mod models;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("JMX_GATEWAY_CONFIG").unwrap_or_else(|_| "./profiles/gateway.yaml".to_string());
    let config = config::AppConfig::load(&config_path)
        .context(format!("Не удалось загрузить конфигурацию {}", config_path))?;
    let listen = config.get_listen();

    let app = routes::create_router(Arc::new(config));

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .context(format!("Не удалось открыть порт {}", listen))?;
    tracing::info!("JMX шлюз слушает на {}", listen);

    axum::serve(listener, app)
        .await
        .context("Сервер завершился с ошибкой")?;

    Ok(())
}
