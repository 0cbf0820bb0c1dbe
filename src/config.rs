/// Collector configuration loader - reads environment variables
///
/// All tunables come from the environment (optionally via a `.env` file),
/// so deployments can adjust the monitored city, polling cadence, and retry
/// policy without recompiling the service. The database connection string is
/// handled separately by `db` (DATABASE_URL).

use std::env;
use std::fmt;
use std::time::Duration;

/// Archival size cap enforced by the validator, in characters.
pub const MAX_RAW_PAYLOAD_CHARS: usize = 1_000_000;

/// Truncation limit applied before writing, slightly below the validator cap
/// to leave margin for encoding overhead.
pub const STORED_PAYLOAD_CHARS: usize = 990_000;

/// Runtime configuration for the collector.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// City whose feed is sampled (default: Beijing).
    pub city: String,

    /// WAQI API token. Absent means synthetic mode: the pipeline runs on
    /// locally generated placeholder documents.
    pub api_token: Option<String>,

    /// Hours between scheduled collections (default: 1).
    pub interval_hours: u64,

    /// Save attempts per record before giving up (default: 3).
    pub retry_attempts: u32,

    /// Fixed wait between save attempts (default: 1 second).
    pub retry_backoff: Duration,

    /// Validator cap on the archival payload, in characters.
    pub max_payload_chars: usize,

    /// Truncation limit applied before writing, in characters.
    pub stored_payload_chars: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            city: "Beijing".to_string(),
            api_token: None,
            interval_hours: 1,
            retry_attempts: 3,
            retry_backoff: Duration::from_secs(1),
            max_payload_chars: MAX_RAW_PAYLOAD_CHARS,
            stored_payload_chars: STORED_PAYLOAD_CHARS,
        }
    }
}

/// A configuration variable was present but unusable.
#[derive(Debug)]
pub enum ConfigError {
    /// Numeric variable did not parse (name, offending value).
    InvalidNumber(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber(name, value) => {
                write!(f, "{} must be a positive integer, got '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl CollectorConfig {
    /// Loads configuration from the process environment, after sourcing a
    /// `.env` file if one is present.
    ///
    /// Recognized variables: AQ_CITY, AQ_API_KEY, AQ_INTERVAL_HOURS,
    /// AQ_RETRY_ATTEMPTS, AQ_RETRY_BACKOFF_SECS. Unset variables keep their
    /// defaults; set-but-unparsable numeric variables are an error rather
    /// than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup. Split out
    /// from `from_env` so tests can supply variables without touching the
    /// process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(city) = lookup("AQ_CITY") {
            if !city.trim().is_empty() {
                config.city = city;
            }
        }

        // An empty token counts as no token: the feed would reject it anyway,
        // and synthetic mode keeps the pipeline exercisable.
        if let Some(token) = lookup("AQ_API_KEY") {
            if !token.trim().is_empty() {
                config.api_token = Some(token);
            }
        }

        if let Some(raw) = lookup("AQ_INTERVAL_HOURS") {
            config.interval_hours = parse_positive(&raw)
                .ok_or_else(|| ConfigError::InvalidNumber("AQ_INTERVAL_HOURS", raw))?;
        }

        if let Some(raw) = lookup("AQ_RETRY_ATTEMPTS") {
            let attempts = parse_positive(&raw)
                .ok_or_else(|| ConfigError::InvalidNumber("AQ_RETRY_ATTEMPTS", raw))?;
            config.retry_attempts = attempts as u32;
        }

        if let Some(raw) = lookup("AQ_RETRY_BACKOFF_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .ok_or_else(|| ConfigError::InvalidNumber("AQ_RETRY_BACKOFF_SECS", raw))?;
            config.retry_backoff = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// True when no API token is configured and the source client must
    /// synthesize placeholder documents.
    pub fn synthetic_mode(&self) -> bool {
        self.api_token.is_none()
    }
}

fn parse_positive(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_any_variables() {
        let config = CollectorConfig::from_vars(|_| None).expect("empty env should be valid");
        assert_eq!(config.city, "Beijing");
        assert!(config.api_token.is_none());
        assert!(config.synthetic_mode());
        assert_eq!(config.interval_hours, 1);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_backoff, Duration::from_secs(1));
        assert_eq!(config.max_payload_chars, 1_000_000);
        assert_eq!(config.stored_payload_chars, 990_000);
    }

    #[test]
    fn test_variables_override_defaults() {
        let env = vars(&[
            ("AQ_CITY", "Shanghai"),
            ("AQ_API_KEY", "demo-token"),
            ("AQ_INTERVAL_HOURS", "6"),
            ("AQ_RETRY_ATTEMPTS", "5"),
            ("AQ_RETRY_BACKOFF_SECS", "2"),
        ]);
        let config =
            CollectorConfig::from_vars(|name| env.get(name).cloned()).expect("valid overrides");
        assert_eq!(config.city, "Shanghai");
        assert_eq!(config.api_token.as_deref(), Some("demo-token"));
        assert!(!config.synthetic_mode());
        assert_eq!(config.interval_hours, 6);
        assert_eq!(config.retry_attempts, 5);
        assert_eq!(config.retry_backoff, Duration::from_secs(2));
    }

    #[test]
    fn test_blank_token_means_synthetic_mode() {
        let env = vars(&[("AQ_API_KEY", "   ")]);
        let config = CollectorConfig::from_vars(|name| env.get(name).cloned()).unwrap();
        assert!(config.synthetic_mode());
    }

    #[test]
    fn test_unparsable_interval_is_an_error_not_a_fallback() {
        let env = vars(&[("AQ_INTERVAL_HOURS", "soon")]);
        let result = CollectorConfig::from_vars(|name| env.get(name).cloned());
        assert!(
            matches!(result, Err(ConfigError::InvalidNumber("AQ_INTERVAL_HOURS", _))),
            "bad interval must surface as a config error, got {:?}",
            result
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let env = vars(&[("AQ_INTERVAL_HOURS", "0")]);
        assert!(CollectorConfig::from_vars(|name| env.get(name).cloned()).is_err());
    }

    #[test]
    fn test_zero_backoff_allowed() {
        // Zero backoff keeps retry-loop tests fast.
        let env = vars(&[("AQ_RETRY_BACKOFF_SECS", "0")]);
        let config = CollectorConfig::from_vars(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.retry_backoff, Duration::ZERO);
    }
}
