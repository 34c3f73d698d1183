use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Способ кодирования параметров запроса в теле.
pub enum ParamEncoding {
    /// `application/json`.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
}

impl FromStr for ParamEncoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "form" => Ok(Self::Form),
            other => Err(format!("unknown param encoding '{other}', expected json or form")),
        }
    }
}

#[derive(Debug, Clone)]
/// Настройки HTTP-клиента.
pub struct ClientConfig {
    /// Базовый URL API, например `https://api.example.com`.
    pub base_url: String,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут всего запроса.
    pub request_timeout: Duration,
    /// Кодирование параметров в теле запроса.
    pub param_encoding: ParamEncoding,
}

impl ClientConfig {
    /// Настройки по умолчанию для указанного базового URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            param_encoding: ParamEncoding::default(),
        }
    }

    /// Меняет кодирование параметров.
    pub fn with_param_encoding(mut self, param_encoding: ParamEncoding) -> Self {
        self.param_encoding = param_encoding;
        self
    }

    /// Меняет таймауты соединения и запроса.
    pub fn with_timeouts(mut self, connect_timeout: Duration, request_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.request_timeout = request_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_encoding_parses_case_insensitively() {
        assert_eq!(" JSON ".parse::<ParamEncoding>(), Ok(ParamEncoding::Json));
        assert_eq!("form".parse::<ParamEncoding>(), Ok(ParamEncoding::Form));
        assert!("xml".parse::<ParamEncoding>().is_err());
    }

    #[test]
    fn defaults_use_json_and_standard_timeouts() {
        let config = ClientConfig::new("http://localhost:8000");
        assert_eq!(config.param_encoding, ParamEncoding::Json);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }
}
