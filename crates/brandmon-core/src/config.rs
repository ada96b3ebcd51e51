use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// offline configuration (no bearer token, local classifier).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("BRANDMON_ENV", "development"))?;
    let log_level = or_default("BRANDMON_LOG_LEVEL", "info");

    // An empty token is treated the same as an unset one.
    let twitter_bearer_token = lookup("TWITTER_BEARER_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let snscrape_bin = or_default("BRANDMON_SNSCRAPE_BIN", "snscrape");
    let twitter_api_base_url = or_default(
        "BRANDMON_TWITTER_API_BASE_URL",
        "https://api.twitter.com/2/",
    );
    let api_timeout_secs = parse_u64("BRANDMON_API_TIMEOUT_SECS", "30")?;
    let classifier_url = or_default("BRANDMON_CLASSIFIER_URL", "http://localhost:8080");
    let classifier_timeout_secs = parse_u64("BRANDMON_CLASSIFIER_TIMEOUT_SECS", "60")?;
    let user_agent = or_default("BRANDMON_USER_AGENT", "brandmon/0.1 (brand-sentiment)");

    let default_limit = parse_usize("BRANDMON_DEFAULT_LIMIT", "200")?;
    if default_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRANDMON_DEFAULT_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let neutral_lo = parse_f64("BRANDMON_NEUTRAL_LO", "0.45")?;
    let neutral_hi = parse_f64("BRANDMON_NEUTRAL_HI", "0.55")?;

    Ok(AppConfig {
        env,
        log_level,
        twitter_bearer_token,
        snscrape_bin,
        twitter_api_base_url,
        api_timeout_secs,
        classifier_url,
        classifier_timeout_secs,
        user_agent,
        default_limit,
        neutral_lo,
        neutral_hi,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDMON_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
