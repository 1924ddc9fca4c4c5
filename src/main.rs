use anyhow::Result;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use medscribe_relay::{routes, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medscribe_relay=debug,tower_http=debug".into()),
        )
        .init();

    let config = load_config()?;

    // Build provider clients once and share them with every handler
    let app_state = AppState::new(config.clone())?;
    let app = routes::build_app(app_state)?;

    let addr: SocketAddr = format!("{}:{}", config.system_config.host, config.system_config.port)
        .parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// First readable file among `$CONFIG_PATH`, `conf.yaml`, `conf.json`, else built-in defaults
fn load_config() -> Result<Config> {
    let explicit = std::env::var("CONFIG_PATH").ok();
    if let Some(path) = &explicit {
        // An explicitly named file must load
        let config = Config::load(path)?;
        info!("Loaded configuration from: {}", path);
        return Ok(config);
    }

    for path in ["conf.yaml", "conf.json"] {
        if !std::path::Path::new(path).exists() {
            continue;
        }
        match Config::load(path) {
            Ok(config) => {
                info!("Loaded configuration from: {}", path);
                return Ok(config);
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}", path, e);
            }
        }
    }

    info!("No configuration file found, using defaults and environment");
    Ok(Config::default())
}
