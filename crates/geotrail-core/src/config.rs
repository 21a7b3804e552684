use crate::app_config::AppConfig;
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
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must be non-empty".to_string(),
            });
        }
        Ok(raw)
    };

    let log_level = non_empty("GEOTRAIL_LOG_LEVEL", "info")?;
    let output_dir = PathBuf::from(non_empty("GEOTRAIL_OUTPUT_DIR", "./maps")?);
    let icons_path = lookup("GEOTRAIL_ICONS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let default_name = non_empty("GEOTRAIL_DEFAULT_NAME", "filtered_map")?;
    if !default_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOTRAIL_DEFAULT_NAME".to_string(),
            reason: format!("'{default_name}' may only contain [A-Za-z0-9_-]"),
        });
    }

    Ok(AppConfig {
        log_level,
        output_dir,
        icons_path,
        default_name,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
