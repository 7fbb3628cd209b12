use anyhow::{Context, Result};
use dagon_core::salt::parse_length;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Keys accepted by `dagon config set`
const KNOWN_KEYS: &[&str] = &[
    "recovery.workers",
    "recovery.timeout_seconds",
    "recovery.progress_interval",
    "salt.length",
    "salt.use_letters",
    "salt.use_digits",
    "output.default_format",
    "output.color_enabled",
    "output.progress_enabled",
];

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub recovery: RecoveryConfig,

    #[serde(default)]
    pub salt: SaltConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RecoveryConfig {
    /// Worker threads for wordlist sessions
    pub workers: usize,
    /// Session deadline, 0 disables it
    pub timeout_seconds: u64,
    /// Attempts between progress updates
    pub progress_interval: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SaltConfig {
    pub length: usize,
    pub use_letters: bool,
    pub use_digits: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            timeout_seconds: 0,
            progress_interval: dagon_core::recovery::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl Default for SaltConfig {
    fn default() -> Self {
        Self {
            length: dagon_core::salt::DEFAULT_SALT_LENGTH,
            use_letters: false,
            use_digits: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

impl RecoveryConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
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
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("dagon/config.toml");
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dagon")
            .join("config.toml")
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("DAGON_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        log::debug!("Loaded configuration from {}", self.config_path.display());
        Ok(config)
    }

    fn load_as_toml(&self) -> Result<toml::Value> {
        let toml_string = toml::to_string(&self.load()?)?;
        Ok(toml::from_str(&toml_string)?)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let value = self.load_as_toml()?;

        let mut current = &value;
        for part in key.split('.') {
            current = match current {
                toml::Value::Table(table) => table
                    .get(part)
                    .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?,
                _ => anyhow::bail!("Invalid key path: {}", key),
            };
        }

        scalar_to_string(current)
            .ok_or_else(|| anyhow::anyhow!("Value at '{}' is not a simple type", key))
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed = Self::parse_config_value(key, value)?;
        let Some((section, field)) = key.split_once('.') else {
            anyhow::bail!("Invalid key path: {}", key);
        };

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path).with_context(|| {
                format!("Failed to read {}", self.config_path.display())
            })?;
            toml::from_str(&content)?
        } else {
            toml::Table::new()
        };

        let table = config
            .entry(section)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        match table {
            toml::Value::Table(table) => {
                table.insert(field.to_string(), parsed);
            }
            _ => anyhow::bail!("Invalid key path: expected table at '{}'", section),
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, toml::to_string_pretty(&config)?)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let value = self.load_as_toml()?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        if let toml::Value::Table(table) = value {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                Self::collect_values(val, new_prefix, items);
            }
        } else if let Some(text) = scalar_to_string(value) {
            items.push((prefix, text));
        }
    }

    /// Validate a value and convert it to its TOML type
    fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
        let parsed = match key {
            "recovery.workers" => {
                let workers: i64 = value
                    .parse()
                    .context("workers must be a positive integer")?;
                if workers < 1 {
                    anyhow::bail!("workers must be at least 1");
                }
                toml::Value::Integer(workers)
            }
            "recovery.timeout_seconds" | "recovery.progress_interval" => {
                let number: u64 = value
                    .parse()
                    .with_context(|| format!("{key} must be a non-negative integer"))?;
                toml::Value::Integer(i64::try_from(number)?)
            }
            "salt.length" => {
                let length = parse_length(Some(value))?;
                toml::Value::Integer(i64::try_from(length)?)
            }
            k if k.ends_with("_enabled") || k.starts_with("salt.use_") => {
                let flag: bool = value
                    .parse()
                    .context("Value must be 'true' or 'false'")?;
                toml::Value::Boolean(flag)
            }
            "output.default_format" => {
                crate::output::OutputFormat::from_string(value)?;
                toml::Value::String(value.to_lowercase())
            }
            _ => anyhow::bail!(
                "Unknown configuration key '{}'. Known keys: {}",
                key,
                KNOWN_KEYS.join(", ")
            ),
        };
        Ok(parsed)
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
