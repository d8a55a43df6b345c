pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod upstream;
pub mod views;

use std::sync::Arc;

use config::AppConfig;
use upstream::UpstreamClient;
use views::Views;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub upstream: UpstreamClient,
    pub views: Arc<Views>,
}

impl AppState {
    /// Build the upstream client and compile the page templates.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config)?;
        let views = Arc::new(Views::new()?);
        Ok(Self {
            config,
            upstream,
            views,
        })
    }
}
