//! Config file loading.
//!
//! Loads `config.toml` from the platform config directory
//! (`~/.config/deskshell/config.toml` on Linux). A missing file means
//! defaults.
//!
//! ```toml
//! user = "ada"
//! hostname = "lovelace"
//! seed = "/path/to/tree.json"   # optional filesystem document
//!
//! [gateway]
//! endpoint = "http://localhost:11434/v1"
//! model = "llama3"
//! timeout_secs = 30
//! ```
//!
//! The gateway key is read from `DESKSHELL_API_KEY`, never from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use deskshell_types::NodeSnapshot;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::gateway::GatewayConfig;
use crate::kernel::KernelConfig;

/// Environment variable holding the gateway API key.
pub const API_KEY_ENV: &str = "DESKSHELL_API_KEY";

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub user: Option<String>,
    pub group: Option<String>,
    pub hostname: Option<String>,
    pub home: Option<String>,
    /// Path to a JSON filesystem document to boot from.
    pub seed: Option<PathBuf>,
    pub gateway: Option<GatewayConfig>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid config file")
    }

    /// Read `path`, or return defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Apply onto defaults. `api_key` fills the gateway key if a gateway
    /// is configured.
    pub fn into_kernel_config(self, api_key: Option<String>) -> Result<KernelConfig> {
        let mut config = KernelConfig::default();
        if let Some(user) = self.user {
            config = config.with_user(user);
        }
        if let Some(group) = self.group {
            config = config.with_group(group);
        }
        if let Some(hostname) = self.hostname {
            config = config.with_hostname(hostname);
        }
        if let Some(home) = self.home {
            config = config.with_home(home);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(load_seed(&seed)?);
        }
        if let Some(mut gateway) = self.gateway {
            if api_key.is_some() {
                gateway.api_key = api_key;
            }
            config = config.with_gateway(gateway);
        }
        Ok(config)
    }
}

/// `config.toml` under the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "deskshell").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Kernel config from the default config file and environment.
pub fn load_kernel_config() -> Result<KernelConfig> {
    let file = match config_path() {
        Some(path) => FileConfig::load(&path)?,
        None => FileConfig::default(),
    };
    let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
    file.into_kernel_config(api_key)
}

/// Read a JSON filesystem document.
pub fn load_seed(path: &Path) -> Result<NodeSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid filesystem document {}", path.display()))
}
