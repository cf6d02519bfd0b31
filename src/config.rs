use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Run Chromium without a visible window. Only turned off for local debugging.
    pub headless: bool,
    /// Directory where downloaded product images are written.
    pub image_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        let headless = match env::var("HEADLESS") {
            Ok(value) => value
                .parse::<bool>()
                .map_err(|e| AppError::Config(format!("Invalid HEADLESS value: {}", e)))?,
            Err(_) => true,
        };

        let image_dir = env::var("IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());
        std::fs::create_dir_all(&image_dir)
            .map_err(|e| AppError::Config(format!("Cannot create image dir: {}", e)))?;

        Ok(Config {
            server_addr,
            headless,
            image_dir,
        })
    }
}
