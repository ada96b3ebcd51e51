use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BRANDMON_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.twitter_bearer_token.is_none());
    assert_eq!(cfg.snscrape_bin, "snscrape");
    assert_eq!(cfg.twitter_api_base_url, "https://api.twitter.com/2/");
    assert_eq!(cfg.api_timeout_secs, 30);
    assert_eq!(cfg.classifier_url, "http://localhost:8080");
    assert_eq!(cfg.classifier_timeout_secs, 60);
    assert_eq!(cfg.user_agent, "brandmon/0.1 (brand-sentiment)");
    assert_eq!(cfg.default_limit, 200);
    assert!((cfg.neutral_lo - 0.45).abs() < f64::EPSILON);
    assert!((cfg.neutral_hi - 0.55).abs() < f64::EPSILON);
}

#[test]
fn bearer_token_is_read_when_present() {
    let mut map = HashMap::new();
    map.insert("TWITTER_BEARER_TOKEN", "abc123");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.twitter_bearer_token.as_deref(), Some("abc123"));
}

#[test]
fn blank_bearer_token_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("TWITTER_BEARER_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.twitter_bearer_token.is_none());
}

#[test]
fn debug_output_redacts_bearer_token() {
    let mut map = HashMap::new();
    map.insert("TWITTER_BEARER_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn api_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_API_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_timeout_secs, 5);
}

#[test]
fn api_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_API_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDMON_API_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BRANDMON_API_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn classifier_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_CLASSIFIER_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDMON_CLASSIFIER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BRANDMON_CLASSIFIER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn default_limit_override() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_DEFAULT_LIMIT", "50");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.default_limit, 50);
}

#[test]
fn default_limit_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_DEFAULT_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDMON_DEFAULT_LIMIT"),
        "expected InvalidEnvVar(BRANDMON_DEFAULT_LIMIT), got: {result:?}"
    );
}

#[test]
fn neutral_band_override() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_NEUTRAL_LO", "0.4");
    map.insert("BRANDMON_NEUTRAL_HI", "0.6");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.neutral_lo - 0.4).abs() < f64::EPSILON);
    assert!((cfg.neutral_hi - 0.6).abs() < f64::EPSILON);
}

#[test]
fn neutral_band_invalid_float() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_NEUTRAL_HI", "high");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDMON_NEUTRAL_HI"),
        "expected InvalidEnvVar(BRANDMON_NEUTRAL_HI), got: {result:?}"
    );
}

#[test]
fn snscrape_bin_and_urls_override() {
    let mut map = HashMap::new();
    map.insert("BRANDMON_SNSCRAPE_BIN", "/opt/bin/snscrape");
    map.insert("BRANDMON_TWITTER_API_BASE_URL", "http://127.0.0.1:9000/2/");
    map.insert("BRANDMON_CLASSIFIER_URL", "http://tei:80");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.snscrape_bin, "/opt/bin/snscrape");
    assert_eq!(cfg.twitter_api_base_url, "http://127.0.0.1:9000/2/");
    assert_eq!(cfg.classifier_url, "http://tei:80");
}
