//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the upstream cards repository API.
    pub cards_api_base: String,
    /// Total attempts (including the first) against the upstream per search.
    pub max_search_attempts: u32,
    /// Base path pagination links are rewritten from.
    pub search_path: String,
}
