pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod image;
pub mod scraper;
pub mod sites;

use std::sync::Arc;
use config::Config;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}
