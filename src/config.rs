//! Command line / environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::model::CatalogConfig;

pub const DEFAULT_API_URL: &str = "https://api.jamendo.com/v3.0";
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_CACHE_CAPACITY: usize = 512;
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 500;

#[derive(Parser, Debug, Clone)]
#[command(name = "spotify-clone")]
#[command(about = "Terminal music player for the Jamendo catalog", long_about = None)]
pub struct Config {
    /// Jamendo API client id
    #[arg(long, env = "JAMENDO_CLIENT_ID")]
    pub client_id: String,

    /// Base URL of the catalog API
    #[arg(long, env = "JAMENDO_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Number of results requested per call
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub limit: u32,

    /// Maximum number of tracks kept in the in-memory cache
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Playback position sampling period in milliseconds
    #[arg(long, default_value_t = DEFAULT_SAMPLE_INTERVAL_MS)]
    pub sample_interval_ms: u64,

    /// Directory for the rolling log files
    #[arg(long, env = "SPOTIFY_CLONE_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,
}

impl Config {
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.api_url.clone(),
            client_id: self.client_id.clone(),
            limit: self.limit,
        }
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_client_id_given() {
        let config = Config::try_parse_from(["spotify-clone", "--client-id", "abc123"]).unwrap();

        assert_eq!(config.client_id, "abc123");
        assert_eq!(config.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.sample_interval(), Duration::from_millis(500));

        let catalog = config.catalog_config();
        assert_eq!(catalog.client_id, "abc123");
        assert_eq!(catalog.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn zero_sample_interval_is_clamped() {
        let config = Config::try_parse_from([
            "spotify-clone",
            "--client-id",
            "abc123",
            "--sample-interval-ms",
            "0",
        ])
        .unwrap();

        assert_eq!(config.sample_interval(), Duration::from_millis(1));
    }
}
