use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub paths: PathConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub index: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PathConfig {
    pub public: PathBuf,
    pub cgi_bin: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                index: "main.html".to_string(),
            },
            paths: PathConfig {
                public: PathBuf::from("/var/www/timegate/public"),
                cgi_bin: PathBuf::from("/var/www/timegate/cgi-bin"),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path())
    }

    /// Reads the file at `config_path`, or writes the defaults there first
    /// if it does not exist yet.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let config_content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
            let config: Config = toml::from_str(&config_content)
                .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
            Ok(config)
        } else {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            Ok(default_config)
        }
    }

    fn get_config_path() -> PathBuf {
        if cfg!(windows) {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("C:\\ProgramData"))
                .join("timegate")
                .join("config.toml")
        } else {
            PathBuf::from("/etc/timegate.toml")
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let config_content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config to: {}", config_path.display()))?;
        Ok(())
    }

    pub fn config_file_path() -> PathBuf { Self::get_config_path() }
}
