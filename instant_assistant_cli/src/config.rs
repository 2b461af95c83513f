use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use instant_assistant_core::ApiConfig;
use instant_assistant_core::error::ValidationError;
use instant_assistant_core::scan::{
    DEFAULT_ACCEPTED_EXTENSIONS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILES, ScanConfig,
    normalize_extension,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "INSTANT_ASSISTANT_";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub scan: ScanSettings,
}

/// Which files a run picks up
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScanSettings {
    pub extensions: Vec<String>,
    pub max_files: usize,
    pub max_file_size: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_ACCEPTED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ScanSettings {
    /// Scan input for `root`; extensions missing their dot get one
    pub fn to_scan_config(&self, root: &Path) -> ScanConfig {
        ScanConfig::new(root)
            .with_extensions(self.extensions.iter().map(|ext| normalize_extension(ext)))
            .with_max_files(self.max_files)
            .with_max_file_size(self.max_file_size)
    }
}

impl AppConfig {
    /// Reject values a run cannot work with
    pub fn validate(&self) -> instant_assistant_core::Result<()> {
        let problem = if self.scan.extensions.is_empty() {
            Some("scan.extensions must list at least one extension")
        } else if self.scan.extensions.iter().any(|ext| ext.trim().is_empty()) {
            // A blank entry would normalize to "." and accept names like `notes.`
            Some("scan.extensions must not contain blank entries")
        } else if self.scan.max_files == 0 {
            Some("scan.max_files must be greater than 0")
        } else if self.scan.max_file_size == 0 {
            Some("scan.max_file_size must be greater than 0")
        } else if self.api.timeout_seconds == 0 {
            Some("api.timeout_seconds must be greater than 0")
        } else if self.api.base_url.trim().is_empty() {
            Some("api.base_url must not be empty")
        } else if self.api.model.trim().is_empty() {
            Some("api.model must not be empty")
        } else {
            None
        };

        match problem {
            Some(message) => Err(ValidationError::invalid_configuration(message).into()),
            None => Ok(()),
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
    env_prefix: String,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Read overrides from variables with another prefix (for testing)
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        // Check for XDG_CONFIG_HOME override first (Linux/macOS)
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("instant-assistant/config.toml");
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/instant-assistant/config.toml")
        }

        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("instant-assistant\\config.toml")
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/instant-assistant/config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed(&self.env_prefix).split("__"));

        let config: AppConfig = figment
            .extract()
            .with_context(|| format!("Invalid configuration ({})", self.config_path.display()))?;
        config.validate()?;

        log::debug!("Loaded configuration: {config:?}");
        Ok(config)
    }
}

/// Load the configuration from the default locations
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new()
        .load()
        .context("Failed to load configuration")
}
