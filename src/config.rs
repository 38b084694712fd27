//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/faucet/faucet.toml`
//! 3. Local config: `--config <path>`, else `./faucet.json` or `./faucet.toml`
//! 4. Environment variables: `FAUCET_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Credentials;
use crate::infrastructure::DEFAULT_BASE_URL;

/// Local config files looked up in the working directory, in order.
pub const LOCAL_CONFIG_FILES: [&str; 2] = ["faucet.json", "faucet.toml"];

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
///
/// `faucet.json` files use camelCase keys (`clientId`, `apiKey`), hence the aliases.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    #[serde(alias = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(alias = "clientId")]
    pub client_id: Option<String>,
    #[serde(alias = "apiKey")]
    pub api_key: Option<String>,
    #[serde(alias = "publicKeyPath")]
    pub public_key_path: Option<PathBuf>,
}

/// Unified configuration for faucet.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// API endpoint (default: https://api.digitalocean.com)
    pub base_url: String,
    /// Client id sent with every request
    pub client_id: String,
    /// API key sent with every request
    pub api_key: String,
    /// Public key uploaded by `keys add` / `keys update` (default: ~/.ssh/id_rsa.pub)
    pub public_key_path: PathBuf,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: String::new(),
            api_key: String::new(),
            public_key_path: PathBuf::from("~/.ssh/id_rsa.pub"),
        }
    }
}

/// Get the XDG config directory for faucet.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "faucet").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("faucet.toml"))
}

/// First local config file present in `dir`.
pub fn local_config_path(dir: &Path) -> Option<PathBuf> {
    LOCAL_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load a JSON or TOML file (by extension) into RawSettings.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        toml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~` and `$VAR` in a path, leaving it untouched when a variable is unset.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Overlay config onto self: scalar options win if present.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_url: overlay
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            client_id: overlay
                .client_id
                .clone()
                .unwrap_or_else(|| self.client_id.clone()),
            api_key: overlay
                .api_key
                .clone()
                .unwrap_or_else(|| self.api_key.clone()),
            public_key_path: overlay
                .public_key_path
                .clone()
                .unwrap_or_else(|| self.public_key_path.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file given on the command line. Must exist when given;
    ///   otherwise the working directory is searched for [`LOCAL_CONFIG_FILES`].
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let local = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| local_config_path(&cwd)),
        };

        let global = global_config_path().filter(|path| path.is_file());
        Self::load_layers(global.as_deref(), local.as_deref())
    }

    /// Load from explicit layer files, then apply environment overrides.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            debug!("loading global config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Local config
        if let Some(path) = local {
            debug!("loading local config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.public_key_path = expand_path(&current.public_key_path);
        Ok(current)
    }

    /// Apply FAUCET_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FAUCET")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("base_url") {
            settings.base_url = val;
        }
        if let Ok(val) = config.get_string("client_id") {
            settings.client_id = val;
        }
        if let Ok(val) = config.get_string("api_key") {
            settings.api_key = val;
        }
        if let Ok(val) = config.get_string("public_key_path") {
            settings.public_key_path = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Credentials for the RPC client.
    ///
    /// # Errors
    /// [`ApplicationError::Config`] when the client id or API key is missing.
    pub fn credentials(&self) -> Result<Credentials, ApplicationError> {
        let missing: Vec<&str> = [("client_id", &self.client_id), ("api_key", &self.api_key)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(ApplicationError::Config {
                message: format!(
                    "missing {} (set it in faucet.json or FAUCET_{})",
                    missing.join(", "),
                    missing[0].to_uppercase()
                ),
            });
        }
        Ok(Credentials::new(&self.client_id, &self.api_key))
    }
}
