use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::AppConfig;

const DATA_DIR: &str = ".uniswap_dashboard";
const CONFIG_FILE: &str = "config.json";
pub const API_KEY_ENV: &str = "GRAPH_API_KEY";

/// Get data directory path, created on first use
pub fn get_data_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("Failed to get user home directory".to_string()))?;
    let data_dir = home.join(DATA_DIR);

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

/// `<data_dir>/config.json`
pub fn config_path() -> AppResult<PathBuf> {
    Ok(get_data_dir()?.join(CONFIG_FILE))
}

/// Load application config from the data directory, with env overrides applied
pub fn load_app_config() -> AppResult<AppConfig> {
    let mut config = load_app_config_from(&config_path()?)?;
    apply_env(&mut config, std::env::var(API_KEY_ENV).ok());
    Ok(config)
}

/// Load config from an explicit path, defaults when the file does not exist
pub fn load_app_config_from(path: &Path) -> AppResult<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.proxy.validate().map_err(AppError::Config)?;
    Ok(config)
}

/// Save application config (the API key is never written)
pub fn save_app_config_to(path: &Path, config: &AppConfig) -> AppResult<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn save_app_config(config: &AppConfig) -> AppResult<()> {
    save_app_config_to(&config_path()?, config)
}

fn apply_env(config: &mut AppConfig, api_key: Option<String>) {
    config.proxy.api_key = api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
}
