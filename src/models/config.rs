//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_upload_limit_mb() -> usize {
    10
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    /// Cookie domain of the identity session.
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Shared secret used to verify identity tokens and sign session cookies.
    pub secret: String,
    /// Maximum size of uploaded spreadsheets.
    #[serde(default = "default_upload_limit_mb")]
    pub upload_limit_mb: usize,
}

impl ServerConfig {
    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_mb * 1024 * 1024
    }
}
