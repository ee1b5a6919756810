//! Runtime configuration for the panel
//!
//! Values come from the environment (optionally seeded from a `.env` file).

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Panel settings
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Backend origin, without the `/api` prefix
    pub api_url: String,
    pub request_timeout: Duration,
    /// How long a toast stays on screen
    pub toast_ttl: Duration,
    pub search_debounce: Duration,
    /// Initial step of the stock adjustment modal
    pub stock_step: i64,
    /// Danger level used when the add-item form leaves it blank
    pub default_danger_level: i64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(30),
            toast_ttl: Duration::from_millis(5000),
            search_debounce: Duration::from_millis(300),
            stock_step: 1,
            default_danger_level: 30,
        }
    }
}

impl PanelConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let stock_step: i64 = parse_var("KIT_PANEL_STOCK_STEP", defaults.stock_step)?;
        if stock_step < 1 {
            return Err(ConfigError::Invalid {
                var: "KIT_PANEL_STOCK_STEP",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            api_url: env::var("KIT_PANEL_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            request_timeout: Duration::from_secs(parse_var(
                "KIT_PANEL_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            toast_ttl: Duration::from_millis(parse_var(
                "KIT_PANEL_TOAST_MS",
                defaults.toast_ttl.as_millis() as u64,
            )?),
            search_debounce: Duration::from_millis(parse_var(
                "KIT_PANEL_SEARCH_DEBOUNCE_MS",
                defaults.search_debounce.as_millis() as u64,
            )?),
            stock_step,
            default_danger_level: parse_var(
                "KIT_PANEL_DEFAULT_DANGER_LEVEL",
                defaults.default_danger_level,
            )?,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            reason: format!("cannot parse {:?}", raw),
        }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_panel_behaviour() {
        let config = PanelConfig::default();
        assert_eq!(config.toast_ttl, Duration::from_millis(5000));
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.default_danger_level, 30);
        assert_eq!(config.stock_step, 1);
    }

    #[test]
    fn test_parse_var_reports_variable() {
        env::set_var("KIT_PANEL_TEST_NUMBER", "abc");
        let err = parse_var::<u64>("KIT_PANEL_TEST_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("KIT_PANEL_TEST_NUMBER"));

        env::set_var("KIT_PANEL_TEST_NUMBER", " 42 ");
        assert_eq!(parse_var::<u64>("KIT_PANEL_TEST_NUMBER", 1).unwrap(), 42);
        env::remove_var("KIT_PANEL_TEST_NUMBER");
        assert_eq!(parse_var::<u64>("KIT_PANEL_TEST_NUMBER", 7).unwrap(), 7);
    }
}
