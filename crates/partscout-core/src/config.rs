use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric or boolean value cannot be parsed.
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
/// Returns `ConfigError` if a numeric or boolean value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
/// No variable is required: missing credentials select fixture mode.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected true/false, got \"{raw}\""),
        })
    };

    let mouser_api_key = optional("MOUSER_API_KEY");
    let digikey_client_id = optional("DIGIKEY_CLIENT_ID");
    let digikey_client_secret = optional("DIGIKEY_CLIENT_SECRET");
    let digikey_token_cache_path = PathBuf::from(or_default(
        "PARTSCOUT_DIGIKEY_TOKEN_CACHE",
        ".digikey_tokens.json",
    ));

    let force_fixtures = parse_bool("PARTSCOUT_USE_FIXTURES", "false")?;
    let log_level = or_default("PARTSCOUT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("PARTSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let requests_per_minute = parse_u32("PARTSCOUT_REQUESTS_PER_MINUTE", "30")?;
    let cache_ttl_secs = parse_u64("PARTSCOUT_CACHE_TTL_SECS", "3600")?;
    let user_agent = or_default("PARTSCOUT_USER_AGENT", "partscout/0.1 (component-sourcing)");

    if requests_per_minute == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARTSCOUT_REQUESTS_PER_MINUTE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        mouser_api_key,
        digikey_client_id,
        digikey_client_secret,
        digikey_token_cache_path,
        force_fixtures,
        log_level,
        request_timeout_secs,
        requests_per_minute,
        cache_ttl_secs,
        user_agent,
    })
}

/// Parse a boolean-ish env value. Unrecognized values yield `None`.
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
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
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("empty env is valid");
        assert!(cfg.mouser_api_key.is_none());
        assert!(cfg.digikey_client_id.is_none());
        assert_eq!(
            cfg.digikey_token_cache_path.to_string_lossy(),
            ".digikey_tokens.json"
        );
        assert!(!cfg.force_fixtures);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.requests_per_minute, 30);
        assert_eq!(cfg.cache_ttl_secs, 3600);
        assert_eq!(cfg.user_agent, "partscout/0.1 (component-sourcing)");
    }

    #[test]
    fn missing_credentials_select_fixture_mode() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.use_fixtures());
    }

    #[test]
    fn mouser_key_alone_selects_remote_mode() {
        let mut map = HashMap::new();
        map.insert("MOUSER_API_KEY", "abc123");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.has_mouser_credentials());
        assert!(!cfg.has_digikey_credentials());
        assert!(!cfg.use_fixtures());
    }

    #[test]
    fn digikey_needs_both_id_and_secret() {
        let mut map = HashMap::new();
        map.insert("DIGIKEY_CLIENT_ID", "id");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.has_digikey_credentials());
        assert!(cfg.use_fixtures());

        map.insert("DIGIKEY_CLIENT_SECRET", "secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.has_digikey_credentials());
        assert!(!cfg.use_fixtures());
    }

    #[test]
    fn blank_credentials_are_treated_as_absent() {
        let mut map = HashMap::new();
        map.insert("MOUSER_API_KEY", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.mouser_api_key.is_none());
    }

    #[test]
    fn force_fixtures_overrides_credentials() {
        let mut map = HashMap::new();
        map.insert("MOUSER_API_KEY", "abc123");
        map.insert("PARTSCOUT_USE_FIXTURES", "true");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.use_fixtures());
    }

    #[test]
    fn invalid_numeric_value_is_rejected() {
        let mut map = HashMap::new();
        map.insert("PARTSCOUT_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARTSCOUT_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(PARTSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn zero_rate_limit_is_rejected() {
        let mut map = HashMap::new();
        map.insert("PARTSCOUT_REQUESTS_PER_MINUTE", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn invalid_boolean_is_rejected() {
        let mut map = HashMap::new();
        map.insert("PARTSCOUT_USE_FIXTURES", "perhaps");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut map = HashMap::new();
        map.insert("MOUSER_API_KEY", "super-secret-key");
        map.insert("DIGIKEY_CLIENT_ID", "id");
        map.insert("DIGIKEY_CLIENT_SECRET", "super-secret-value");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
