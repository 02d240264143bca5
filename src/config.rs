use crate::error::{ConfigError, MetalctlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.equinix.com/metal/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    /// Static project name -> project ID table. BTreeMap keeps the
    /// all-projects sweep order stable across runs.
    #[serde(default)]
    pub projects: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API token; usually supplied via --token or METAL_AUTH_TOKEN instead
    /// of being written into the config file.
    pub token: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                token: None,
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            projects: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .metalctl.toml in current dir, then ~/.config/metalctl/config.toml
            let local = PathBuf::from(".metalctl.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("metalctl").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".metalctl.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
            })?;
            Ok(config)
        } else {
            // Use defaults but warn if the user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'metalctl init' to create a config file.");
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a human project name to its provider ID.
    pub fn resolve_project(&self, name: &str) -> Result<ProjectRef> {
        self.projects
            .get(name)
            .map(|id| ProjectRef {
                name: name.to_string(),
                id: id.clone(),
            })
            .ok_or_else(|| MetalctlError::Config(ConfigError::UnknownProject(name.to_string())))
    }

    /// All configured projects, in table order.
    pub fn all_projects(&self) -> Vec<ProjectRef> {
        self.projects
            .iter()
            .map(|(name, id)| ProjectRef {
                name: name.clone(),
                id: id.clone(),
            })
            .collect()
    }

    /// Effective API token: CLI/env override wins over the config file.
    /// Absence is a configuration error caught before any request is made.
    pub fn resolve_token(&self, override_token: Option<&str>) -> Result<String> {
        override_token
            .map(|t| t.to_string())
            .or_else(|| self.api.token.clone())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MetalctlError::Config(ConfigError::MissingToken))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

/// A resolved (name, id) pair for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub name: String,
    pub id: String,
}

pub fn init_config(output: &Path) -> Result<()> {
    let mut config = Config::default();
    config.projects.insert(
        "example".to_string(),
        "00000000-0000-0000-0000-000000000000".to_string(),
    );
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
