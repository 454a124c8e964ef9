//! `asha serve` — Start the WebSocket gateway.

use std::path::Path;

use asha_config::AppConfig;

pub async fn run(config_path: &Path, port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    for warning in config.validate() {
        tracing::warn!("{warning}");
    }

    println!("Asha gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   WebSocket: ws://{}:{}/ws/assistant",
        config.gateway.host, config.gateway.port
    );

    asha_gateway::start(config).await?;

    Ok(())
}
