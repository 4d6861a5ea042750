use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Safe-search modes accepted by the YouTube search API
const SAFE_SEARCH_MODES: &[&str] = &["none", "moderate", "strict"];

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub config_dir: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub bible_provider: String,
    pub video: VideoConfig,
}

/// Settings for the video lookup. `api_key == None` disables all network calls.
#[derive(Debug, Clone)]
pub struct VideoConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub safe_search: String,
    pub max_duration: u32,
    pub min_duration: u32,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            safe_search: "strict".to_string(),
            max_duration: 600,
            min_duration: 180,
            cache_ttl: Duration::from_secs(3600),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = VideoConfig::default();

        let safe_search = get("YOUTUBE_SAFE_SEARCH").unwrap_or(defaults.safe_search);
        if !SAFE_SEARCH_MODES.contains(&safe_search.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "YOUTUBE_SAFE_SEARCH",
                value: safe_search,
            });
        }

        let video = VideoConfig {
            api_key: get("YOUTUBE_API_KEY").filter(|k| !k.trim().is_empty()),
            api_url: get("YOUTUBE_API_URL").unwrap_or(defaults.api_url),
            safe_search,
            max_duration: parse_or(&get, "YOUTUBE_MAX_DURATION", defaults.max_duration)?,
            min_duration: parse_or(&get, "YOUTUBE_MIN_DURATION", defaults.min_duration)?,
            cache_ttl: Duration::from_secs(parse_or(&get, "VIDEO_CACHE_TTL_SECS", 3600u64)?),
            request_timeout: Duration::from_secs(parse_or(&get, "VIDEO_SEARCH_TIMEOUT_SECS", 10u64)?),
        };

        if video.min_duration > video.max_duration {
            return Err(ConfigError::InvalidValue {
                key: "YOUTUBE_MIN_DURATION",
                value: format!("{} (exceeds max {})", video.min_duration, video.max_duration),
            });
        }

        Ok(Self {
            port: parse_or(&get, "PORT", 8000u16)?,
            database_url: get("DATABASE_URL").unwrap_or_else(|| "./.db/abide.db".to_string()),
            config_dir: get("CONFIG_DIR").map(PathBuf::from),
            cors_origins: get("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| {
                    vec![
                        "http://localhost:3000".to_string(),
                        "http://localhost:8000".to_string(),
                    ]
                }),
            bible_provider: get("BIBLE_PROVIDER").unwrap_or_else(|| "public_domain".to_string()),
            video,
        })
    }

    /// Content directory: CONFIG_DIR, else ./config, else ../config
    pub fn resolve_config_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }
        ["./config", "../config"]
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                ConfigError::Content("config directory not found in ./config or ../config".to_string())
            })
    }
}

fn parse_or<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}
