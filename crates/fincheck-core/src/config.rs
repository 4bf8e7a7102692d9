use crate::app_config::AppConfig;
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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;
    let database_url = or_default("DATABASE_URL", "sqlite://documents.db");

    let bind_addr = parse_addr("FINCHECK_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("FINCHECK_LOG_LEVEL", "info");
    let upload_dir = PathBuf::from(or_default("FINCHECK_UPLOAD_DIR", "uploads"));
    let static_dir = PathBuf::from(or_default("FINCHECK_STATIC_DIR", "frontend/dist"));
    let max_upload_bytes = parse_usize("FINCHECK_MAX_UPLOAD_BYTES", "26214400")?;
    if max_upload_bytes == 0 {
        return Err(invalid(
            "FINCHECK_MAX_UPLOAD_BYTES",
            "must be greater than zero".to_string(),
        ));
    }

    let gemini_model = or_default("GEMINI_MODEL", "gemini-1.5-flash");
    let gemini_base_url = or_default(
        "GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com/",
    );

    let db_max_connections = parse_u32("FINCHECK_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("FINCHECK_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("FINCHECK_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "FINCHECK_DB_MIN_CONNECTIONS",
            format!("must not exceed FINCHECK_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }

    Ok(AppConfig {
        database_url,
        bind_addr,
        log_level,
        upload_dir,
        static_dir,
        max_upload_bytes,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
