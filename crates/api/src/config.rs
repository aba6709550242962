use std::path::PathBuf;

use axum::http::HeaderValue;
use yieldcast_core::SchemaVariant;

/// Origins allowed to call the API from a browser when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://127.0.0.1:3000",
    "http://localhost:4000",
    "https://127.0.0.1:4000",
    "https://agro-care-ai.vercel.app",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Reported by the health endpoint; also raises the default log level.
    pub debug: bool,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Directory holding the model artifacts.
    pub model_dir: PathBuf,
    /// Which request/model contract this deployment serves.
    pub schema_variant: SchemaVariant,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `127.0.0.1`                     |
    /// | `PORT`                 | `5000`                          |
    /// | `DEBUG`                | `true`                          |
    /// | `CORS_ORIGINS`         | [`DEFAULT_CORS_ORIGINS`]        |
    /// | `MODEL_DIR`            | `models`                        |
    /// | `SCHEMA_VARIANT`       | `current`                       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());

        let port = parse_or("PORT", "u16", lookup("PORT"), 5000u16)?;

        let debug = lookup("DEBUG")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        let cors_origins: Vec<String> = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                expected: "origin header value",
                value: bad.clone(),
            });
        }

        let model_dir = lookup("MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models"));

        let schema_variant = match lookup("SCHEMA_VARIANT") {
            Some(raw) => raw.parse::<SchemaVariant>().map_err(|_| ConfigError::Invalid {
                var: "SCHEMA_VARIANT",
                expected: "schema variant (legacy or current)",
                value: raw.clone(),
            })?,
            None => SchemaVariant::default(),
        };

        let request_timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            "u64",
            lookup("REQUEST_TIMEOUT_SECS"),
            30u64,
        )?;

        Ok(Self {
            host,
            port,
            debug,
            cors_origins,
            model_dir,
            schema_variant,
            request_timeout_secs,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
