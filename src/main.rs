mod config;
mod geodata;
mod routes;
mod state;

use std::process::ExitCode;

/// Reasons the service cannot start.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("boundary data: {0}")]
    GeoData(#[from] geodata::GeoDataError),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env loaded");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "civicmap failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = config::Config::from_env()?;
    let geo = geodata::GeoStore::load(&config.geojson_dir)?;

    let app = routes::app(state::AppState::new(geo));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(port = config.port, "civicmap listening");
    axum::serve(listener, app).await?;
    Ok(())
}
