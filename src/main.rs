use anyhow::{Context, Result};
use tracing::info;

use weatherhub::{AppState, VERSION, WeatherHubConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherHubConfig::load()?;
    logging::init(&config.logging)?;

    info!("Starting WeatherHub {}", VERSION);

    let state = AppState::from_config(&config).context("Failed to initialise weather client")?;
    web::run(&config.server, state).await
}
