//! Configuration types and parsing for sightline.yml

use crate::builder::BuilderOptions;
use crate::error::{CoreError, CoreResult};
use crate::ids::AccountId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted for the account when `--account` is absent
pub const ACCOUNT_ENV_VAR: &str = "SL_ACCOUNT_ID";

/// Default audit directory, relative to the project root
pub const DEFAULT_AUDIT_DIR: &str = "target/audit";

/// Main project configuration from sightline.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Account that owns the analyses; may come from the flag or env instead
    #[serde(default)]
    pub account_id: Option<String>,

    /// Principal granted admin actions on analyses created with CREATE
    #[serde(default)]
    pub principal: Option<String>,

    /// Rendering service connection
    #[serde(default)]
    pub service: ServiceConfig,

    /// Audit artifact settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Builder registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Canvas settings
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Rendering service type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Remote service over HTTP
    Http,
    /// In-process service that records submissions (default)
    #[default]
    Memory,
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceType::Http => write!(f, "http"),
            ServiceType::Memory => write!(f, "memory"),
        }
    }
}

/// Rendering service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(rename = "type", default)]
    pub service_type: ServiceType,

    /// Base URL, required for `http`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Timeout of the single submission attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_type: ServiceType::default(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Audit artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_audit_dir")]
    pub dir: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_audit_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_audit_dir() -> String {
    DEFAULT_AUDIT_DIR.to_string()
}

/// Builder registry settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Evict builders idle this long; unset keeps them for the process lifetime
    #[serde(default)]
    pub idle_ttl_secs: Option<u64>,
}

/// Canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Grid canvas width, e.g. "1600px"
    #[serde(default = "default_canvas_width")]
    pub canvas_width: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
        }
    }
}

fn default_canvas_width() -> String {
    "1600px".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for sightline.yml or sightline.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("sightline.yml");
        let yaml_path = dir.join("sightline.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.service.service_type == ServiceType::Http
            && self.service.endpoint.as_deref().map_or(true, |e| e.trim().is_empty())
        {
            return Err(CoreError::ConfigInvalid {
                message: "service.endpoint is required when service.type is http".to_string(),
            });
        }

        if self.service.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "service.timeout_secs must be greater than zero".to_string(),
            });
        }

        self.canvas_width_px()?;
        Ok(())
    }

    /// Canvas width in pixels, from `layout.canvas_width`
    pub fn canvas_width_px(&self) -> CoreResult<u32> {
        let raw = self.layout.canvas_width.trim();
        let digits = raw.strip_suffix("px").unwrap_or(raw).trim();
        match digits.parse::<u32>() {
            Ok(px) if px > 0 => Ok(px),
            _ => Err(CoreError::ConfigInvalid {
                message: format!(
                    "layout.canvas_width '{}' must be a positive pixel width such as \"1600px\"",
                    self.layout.canvas_width
                ),
            }),
        }
    }

    /// Options applied to every builder created under this configuration
    pub fn builder_options(&self) -> CoreResult<BuilderOptions> {
        Ok(BuilderOptions {
            principal: self.principal.clone(),
            canvas_width_px: self.canvas_width_px()?,
        })
    }

    /// Submission timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }

    /// Registry idle TTL, if configured
    pub fn idle_ttl(&self) -> Option<Duration> {
        self.registry.idle_ttl_secs.map(Duration::from_secs)
    }

    /// Absolute audit directory, or `None` when auditing is disabled
    pub fn audit_dir_absolute(&self, root: &Path) -> Option<PathBuf> {
        self.audit.enabled.then(|| root.join(&self.audit.dir))
    }

    /// Resolve the account override from the CLI flag or `SL_ACCOUNT_ID`.
    ///
    /// Priority: CLI flag > environment variable.
    pub fn resolve_account(cli_account: Option<&str>) -> Option<String> {
        cli_account
            .map(String::from)
            .or_else(|| std::env::var(ACCOUNT_ENV_VAR).ok())
            .filter(|a| !a.trim().is_empty())
    }

    /// The account to use: CLI flag > `SL_ACCOUNT_ID` > `account_id`
    pub fn account_id(&self, cli_account: Option<&str>) -> CoreResult<AccountId> {
        let account = Self::resolve_account(cli_account)
            .or_else(|| self.account_id.clone())
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: format!(
                    "No account: pass --account, set {} or add account_id to sightline.yml",
                    ACCOUNT_ENV_VAR
                ),
            })?;
        AccountId::parse(account)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
