use std::fmt::Display;

use anyhow::{Result, anyhow};

const DEFAULT_INDEX_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html");

/// Origins allowed to call the API cross-origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Comma-separated origins. A `*` entry, or no entries at all, means any origin.
    fn parse(raw: &str) -> Self {
        let mut origins = Vec::new();
        for entry in raw.split(',').map(str::trim) {
            match entry {
                "" => {}
                "*" => return CorsOrigins::Any,
                origin => origins.push(origin.to_string()),
            }
        }

        if origins.is_empty() {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub http_addr: String,
    pub cors_origins: CorsOrigins,
    pub log_level: String,
    pub index_path: String,
    pub http_request_body_limit_bytes: usize,
    pub api_docs: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let log_level = env_value("LOG_LEVEL")
            .or_else(|| env_value("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        let http_request_body_limit_bytes =
            env_parsed("HTTP_REQUEST_BODY_LIMIT_BYTES", 100 * 1024, |raw| {
                raw.parse::<usize>()
            })?;
        if http_request_body_limit_bytes == 0 {
            return Err(anyhow!("HTTP_REQUEST_BODY_LIMIT_BYTES must be > 0"));
        }

        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://db.sqlite"),
            http_addr: env_or("HTTP_ADDR", "0.0.0.0:3000"),
            cors_origins: CorsOrigins::parse(&env_or("CORS_ORIGINS", "*")),
            log_level,
            index_path: env_or("INDEX_PATH", DEFAULT_INDEX_PATH),
            http_request_body_limit_bytes,
            api_docs: env_parsed("API_DOCS", false, parse_bool)?,
        })
    }
}

/// Set and non-blank value of `key`, trimmed.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_value(key).unwrap_or_else(|| default.to_string())
}

fn env_parsed<T, E>(key: &str, default: T, parse: impl Fn(&str) -> Result<T, E>) -> Result<T>
where
    E: Display,
{
    match env_value(key) {
        Some(raw) => parse(&raw).map_err(|err| anyhow!("Failed to parse {key}='{raw}': {err}")),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("invalid boolean value '{other}'")),
    }
}
