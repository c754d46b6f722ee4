use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::{NoContext, Timestamp};

pub mod entities;

#[derive(Clone, Debug)]
pub struct TaroConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub ttl: chrono::Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.taro.health/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: chrono::Duration::hours(24),
        }
    }
}

impl Default for TaroConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_behavior() {
        let config = TaroConfig::default();
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.cache.ttl, chrono::Duration::hours(24));
    }
}
