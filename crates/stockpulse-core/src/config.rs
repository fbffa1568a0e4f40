use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("STOCKPULSE_ENV", "development"));

    let bind_addr = parse_addr("STOCKPULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("STOCKPULSE_LOG_LEVEL", "info");
    let model_path = PathBuf::from(or_default("STOCKPULSE_MODEL_PATH", "./config/model.json"));

    let sources = parse_sources(&or_default(
        "STOCKPULSE_SOURCES",
        "wallstreetbets,IndianStreetBets",
    ))
    .ok_or_else(|| ConfigError::InvalidEnvVar {
        var: "STOCKPULSE_SOURCES".to_string(),
        reason: "no sources configured".to_string(),
    })?;

    let feed_base_url = or_default("STOCKPULSE_FEED_BASE_URL", "https://www.reddit.com");
    let feed_user_agent = or_default(
        "STOCKPULSE_FEED_USER_AGENT",
        "stockpulse/0.1 (market-sentiment)",
    );
    let feed_request_timeout_secs = parse_u64("STOCKPULSE_FEED_REQUEST_TIMEOUT_SECS", "30")?;
    let feed_page_limit = parse_u32("STOCKPULSE_FEED_PAGE_LIMIT", "25")?;
    let feed_page_count = parse_usize("STOCKPULSE_FEED_PAGE_COUNT", "3")?;
    let feed_inter_page_delay_secs = parse_u64("STOCKPULSE_FEED_INTER_PAGE_DELAY_SECS", "2")?;

    let db_max_connections = parse_u32("STOCKPULSE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("STOCKPULSE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("STOCKPULSE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        model_path,
        sources,
        feed_base_url,
        feed_user_agent,
        feed_request_timeout_secs,
        feed_page_limit,
        feed_page_count,
        feed_inter_page_delay_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Split a comma-separated source list, trimming whitespace and dropping
/// empty entries. Returns `None` when nothing usable remains.
fn parse_sources(raw: &str) -> Option<Vec<String>> {
    let sources: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if sources.is_empty() {
        None
    } else {
        Some(sources)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
