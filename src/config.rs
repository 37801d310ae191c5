//! Configuration management for camlights
//!
//! Provides configuration loading, saving, and validation for the light
//! device list, the camera filter, and HTTP/monitor tunables.

use crate::errors::CamLightsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CamLightsConfig {
    /// Ordered list of light devices; fan-out order follows list order
    pub lights: Vec<LightConfig>,
    pub filter: FilterConfig,
    pub http: HttpConfig,
    pub monitor: MonitorConfig,
}

/// Supported light device kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Elgato,
    Wled,
    /// Catch-all for kinds this build doesn't know; skipped at fan-out time
    #[serde(other)]
    Unknown,
}

impl LightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightKind::Elgato => "elgato",
            LightKind::Wled => "wled",
            LightKind::Unknown => "unknown",
        }
    }
}

/// One configured light device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightConfig {
    pub kind: LightKind,
    /// Network address (host or host:port for WLED)
    pub address: String,
    /// Brightness; defaults to 50 (Elgato) or 128 (WLED), passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u32>,
    /// Color temperature in Kelvin (Elgato only), default 4500, usable 2900-7000
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<u32>,
    /// WLED preset id applied when turning on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_preset: Option<u32>,
    /// WLED preset id applied when turning off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_preset: Option<u32>,
    /// Elgato API port, default 9123
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl LightConfig {
    pub fn new(kind: LightKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
            brightness: None,
            temperature: None,
            on_preset: None,
            off_preset: None,
            port: None,
        }
    }

    /// Short label used in log lines
    pub fn label(&self) -> String {
        format!("{} @ {}", self.kind.as_str(), self.address)
    }

    /// Full human-readable description for status output
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(b) = self.brightness {
            parts.push(format!("brightness {}", b));
        }
        if let Some(t) = self.temperature {
            parts.push(format!("{}K", t));
        }
        if let Some(p) = self.on_preset {
            parts.push(format!("on preset {}", p));
        }
        if let Some(p) = self.off_preset {
            parts.push(format!("off preset {}", p));
        }
        if parts.is_empty() {
            self.label()
        } else {
            format!("{} ({})", self.label(), parts.join(", "))
        }
    }
}

/// Camera filter selection mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every camera influences lighting
    #[default]
    All,
    /// Cameras whose name matches `pattern`
    Pattern,
    /// Cameras whose name is in `names`
    List,
}

/// Camera filter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub mode: FilterMode,
    /// Regular expression matched against camera display names (mode = "pattern")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Exact camera display names (mode = "list")
    pub names: Vec<String>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_ms: 3000 }
    }
}

/// Camera inventory monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Inventory poll interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
        }
    }
}

impl CamLightsConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CamLightsError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            CamLightsError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: CamLightsConfig = toml::from_str(&contents).map_err(|e| {
            CamLightsError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CamLightsError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CamLightsError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            CamLightsError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            CamLightsError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("camlights.toml")
    }

    /// Load from default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    ///
    /// Device parameters like brightness are passed through verbatim, so only
    /// structurally unusable values are rejected here.
    pub fn validate(&self) -> Result<(), String> {
        for (i, light) in self.lights.iter().enumerate() {
            if light.address.trim().is_empty() {
                return Err(format!("Light {}: address is required", i + 1));
            }
        }

        match self.filter.mode {
            FilterMode::All => {}
            FilterMode::Pattern => match &self.filter.pattern {
                None => return Err("Filter mode 'pattern' requires a pattern".to_string()),
                Some(pattern) => {
                    if let Err(e) = regex::Regex::new(pattern) {
                        return Err(format!("Invalid filter pattern: {}", e));
                    }
                }
            },
            FilterMode::List => {
                if self.filter.names.is_empty() {
                    return Err("Filter mode 'list' requires at least one name".to_string());
                }
            }
        }

        if self.http.timeout_ms == 0 {
            return Err("HTTP timeout must be non-zero".to_string());
        }
        if self.monitor.poll_interval_ms == 0 {
            return Err("Monitor poll interval must be non-zero".to_string());
        }

        Ok(())
    }
}
