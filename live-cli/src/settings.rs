use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use live_client::{ClientConfig, ParamEncoding};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub param_encoding: ParamEncoding,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("LIVE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let connect_timeout_secs = parse_u64_env("LIVE_CONNECT_TIMEOUT_SECS", 5)?;
        let request_timeout_secs = parse_u64_env("LIVE_REQUEST_TIMEOUT_SECS", 15)?;
        let param_encoding = std::env::var("LIVE_PARAM_ENCODING")
            .unwrap_or_else(|_| "json".to_string())
            .parse::<ParamEncoding>()
            .map_err(|e| anyhow!(e))
            .context("Failed to parse LIVE_PARAM_ENCODING")?;
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            api_url: normalize_server(api_url),
            connect_timeout_secs,
            request_timeout_secs,
            param_encoding,
            log_level,
        })
    }

    /// `--server` из командной строки перекрывает `LIVE_API_URL`.
    pub fn with_server(mut self, server: Option<String>) -> Self {
        if let Some(server) = server {
            self.api_url = normalize_server(server);
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_timeouts(
                Duration::from_secs(self.connect_timeout_secs),
                Duration::from_secs(self.request_timeout_secs),
            )
            .with_param_encoding(self.param_encoding)
    }
}

pub fn normalize_server(server: String) -> String {
    let server = server.trim().to_string();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: 3,
            request_timeout_secs: 9,
            param_encoding: ParamEncoding::Form,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server(" 127.0.0.1:8000 ".to_string());
        assert_eq!(s, "http://127.0.0.1:8000");
    }

    #[test]
    fn server_flag_overrides_env_url() {
        let s = settings().with_server(Some("api.local:9000".to_string()));
        assert_eq!(s.api_url, "http://api.local:9000");

        let s = settings().with_server(None);
        assert_eq!(s.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn client_config_carries_timeouts_and_encoding() {
        let config = settings().client_config();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(9));
        assert_eq!(config.param_encoding, ParamEncoding::Form);
    }
}
