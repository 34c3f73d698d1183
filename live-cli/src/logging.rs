use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Уровень, если ни `LOG_LEVEL`, ни `RUST_LOG` не разобрались.
/// CLI по умолчанию молчит: видны только предупреждения о сбоях запросов.
const FALLBACK_LEVEL: &str = "warn";

fn cli_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

/// Настраивает логи `live-cli`.
///
/// stdout занят результатами команд, поэтому логи идут в stderr, без времени
/// и без ANSI-цветов, если stderr перенаправлен в файл.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(cli_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .without_time()
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging for live-cli: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_level_is_a_valid_filter() {
        assert!(EnvFilter::try_new(FALLBACK_LEVEL).is_ok());
    }

    #[test]
    fn client_target_directive_is_accepted() {
        assert!(EnvFilter::try_new("live_client=debug,warn").is_ok());
    }
}
