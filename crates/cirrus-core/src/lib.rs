pub mod config;
pub mod error;
pub mod fetch_state;

pub use config::{Config, WeatherConfig};
pub use error::AppError;
pub use fetch_state::{FetchState, FetchTracker};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Cirrus core initialized");
    Ok(())
}
