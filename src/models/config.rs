//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub image_host: ImageHostConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// Credentials and upload target for the third-party image host.
pub struct ImageHostConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder the host stores product images under.
    pub folder: String,
}
