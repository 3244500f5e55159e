use crate::errors::{ParleyError, ParleyResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // The collaborator is a Flask dev server; this is its default bind.
            server_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ParleyResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| ParleyError::config_error(format!("failed to read config file: {}", e)))?;
        serde_json::from_str::<Config>(&config_str)
            .map_err(|e| ParleyError::config_error(format!("failed to parse config: {}", e)))?
    } else {
        let config = Config::default();

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ParleyError::config_error(format!("failed to create config directory: {}", e))
        })?;
        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ParleyError::config_error(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, config_str)
            .map_err(|e| ParleyError::config_error(format!("failed to write config file: {}", e)))?;

        config
    };

    // Env var wins over the file.
    if let Ok(url) = env::var("PARLEY_SERVER_URL") {
        config.server_url = url;
    }

    validate_config(&config)?;
    *CONFIG.write().unwrap() = config;

    Ok(())
}

fn get_config_path() -> ParleyResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ParleyError::config_error("could not determine home directory"))?;

    Ok(home_dir.join(".config").join("parley").join("config.json"))
}

fn validate_config(config: &Config) -> ParleyResult<()> {
    if config.server_url.is_empty() {
        return Err(ParleyError::config_error("server_url is required"));
    }

    if !config.server_url.starts_with("http://") && !config.server_url.starts_with("https://") {
        return Err(ParleyError::config_error(
            "server_url must start with http:// or https://",
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ParleyError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_url() {
        let mut config = Config::default();
        config.server_url = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_bad_scheme() {
        let mut config = Config::default();
        config.server_url = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_timeout() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::default();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.server_url, config.server_url);
        assert_eq!(loaded.request_timeout_secs, config.request_timeout_secs);
    }
}
