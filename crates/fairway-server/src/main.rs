use tracing_subscriber::EnvFilter;

use fairway_server::config::ServerConfig;
use fairway_server::{build_app, spawn_idle_reaper};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json_logs = std::env::var("FAIRWAY_JSON_LOGS").is_ok_and(|v| v == "1" || v == "true");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = ServerConfig::load();
    config.validate();
    let addr = config.listen_addr.clone();

    let (app, state) = build_app(config);
    spawn_idle_reaper(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Fairway server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
