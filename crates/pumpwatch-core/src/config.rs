use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Fallback concurrency cap, used when `PUMPWATCH_MAX_PARALLEL_REQUESTS`
/// is unset or not a positive number.
pub const DEFAULT_MAX_PARALLEL_REQUESTS: usize = 5;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are
/// invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in
/// the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are
/// invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let cma_fuel_url = require("PUMPWATCH_CMA_FUEL_URL")?;
    let user_agent = require("PUMPWATCH_USER_AGENT")?;

    let max_parallel_requests =
        parse_max_parallel(&or_default("PUMPWATCH_MAX_PARALLEL_REQUESTS", "5"))?;
    let request_timeout_secs = parse_u64("PUMPWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let batch_deadline_secs = parse_u64("PUMPWATCH_BATCH_DEADLINE_SECS", "180")?;

    let out_dir = PathBuf::from(or_default("PUMPWATCH_OUT_DIR", "data"));
    let log_level = or_default("PUMPWATCH_LOG_LEVEL", "info");

    Ok(AppConfig {
        cma_fuel_url,
        user_agent,
        max_parallel_requests,
        request_timeout_secs,
        batch_deadline_secs,
        out_dir,
        log_level,
    })
}

/// Parse the concurrency cap. Zero or negative values fall back to
/// [`DEFAULT_MAX_PARALLEL_REQUESTS`] with a warning instead of disabling
/// concurrency or failing the run; non-numeric values are a configuration
/// error.
fn parse_max_parallel(raw: &str) -> Result<usize, ConfigError> {
    let parsed = raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
        var: "PUMPWATCH_MAX_PARALLEL_REQUESTS".to_string(),
        reason: e.to_string(),
    })?;

    match usize::try_from(parsed) {
        Ok(value) if value > 0 => Ok(value),
        _ => {
            tracing::warn!(
                configured = parsed,
                "PUMPWATCH_MAX_PARALLEL_REQUESTS must be positive; using default of {DEFAULT_MAX_PARALLEL_REQUESTS}"
            );
            Ok(DEFAULT_MAX_PARALLEL_REQUESTS)
        }
    }
}
