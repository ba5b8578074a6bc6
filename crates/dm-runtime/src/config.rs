//! # Runtime Configuration
//!
//! Gateway settings plus the choice of storage backend. Defaults can be
//! overridden from the environment; unparsable values are logged and ignored.

use dm_02_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// API Gateway configuration.
    pub gateway: GatewayConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Where asset records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost on exit.
    Memory,
    /// One `<id>.json` file per record.
    #[default]
    File,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding record files (file backend only).
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("."),
        }
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> NodeConfig {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration, resolving overrides through `lookup`.
pub fn load_config_from<F>(lookup: F) -> NodeConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = NodeConfig::default();

    if let Some(host) = lookup("DM_HTTP_HOST") {
        match host.parse() {
            Ok(h) => config.gateway.http.host = h,
            Err(_) => warn!(value = %host, "DM_HTTP_HOST is not an IP address; ignoring"),
        }
    }
    if let Some(port) = lookup("DM_HTTP_PORT") {
        match port.parse() {
            Ok(p) => config.gateway.http.port = p,
            Err(_) => warn!(value = %port, "DM_HTTP_PORT is not a port number; ignoring"),
        }
    }

    if let Some(backend) = lookup("DM_STORAGE_BACKEND") {
        match backend.parse() {
            Ok(b) => config.storage.backend = b,
            Err(e) => warn!(error = %e, "ignoring DM_STORAGE_BACKEND"),
        }
    }
    if let Some(dir) = lookup("DM_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }

    if let Some(template) = lookup("DM_DOCS_TEMPLATE") {
        info!(path = %template, "Using custom docs template");
        config.gateway.docs.template_path = Some(PathBuf::from(template));
    }

    config
}
