use std::{env, path::PathBuf, time::Duration};

use chrono_tz::Tz;
use url::Url;

use super::env::{AppConfig, ConfigError, DirectoryConfig, LoggingConfig, SourceConfig};

pub const DEFAULT_SOURCE_URL: &str = "https://www.voe.com.ua/disconnection/detailed";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string());
        let url = parse_source_url(&raw_url)?;

        let source = SourceConfig {
            url,
            fetch_timeout: Duration::from_millis(
                env::var("FETCH_TIMEOUT")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60_000),
            ),
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let timezone = parse_timezone(
            &env::var("SCHEDULE_TIMEZONE").unwrap_or_else(|_| "Europe/Kyiv".to_string()),
        )?;

        let regions_file = env::var("REGIONS_FILE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let simplify_states = parse_bool("SIMPLIFY_STATES").unwrap_or(false);

        Ok(Self {
            source,
            directories,
            logging,
            timezone,
            regions_file,
            simplify_states,
        })
    }
}

fn parse_source_url(raw: &str) -> Result<Url, ConfigError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        Ok(url) => Err(ConfigError::Invalid {
            key: "SOURCE_URL",
            reason: format!("unsupported scheme `{}`", url.scheme()),
        }),
        Err(err) => Err(ConfigError::Invalid {
            key: "SOURCE_URL",
            reason: err.to_string(),
        }),
    }
}

fn parse_timezone(raw: &str) -> Result<Tz, ConfigError> {
    raw.parse::<Tz>().map_err(|err| ConfigError::Invalid {
        key: "SCHEDULE_TIMEZONE",
        reason: err.to_string(),
    })
}

fn parse_bool(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}
