use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::error::PoolqError;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Client defaults read from a TOML file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Inventory snapshot; a relative path is relative to the config file.
    #[serde(default)]
    pub inventory: Option<PathBuf>,
    #[serde(default)]
    pub datacenter: Option<String>,
}

impl ClientConfig {
    pub fn parse(str: &str) -> crate::Result<ClientConfig> {
        let config: ClientConfig = toml::from_str(str)?;
        if config.datacenter.as_deref().is_some_and(|dc| dc.is_empty()) {
            return Err(PoolqError::DeserializationError(
                "Attribute 'datacenter' cannot be empty".into(),
            ));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> crate::Result<ClientConfig> {
        let content = std::fs::read_to_string(path).map_err(|error| {
            PoolqError::GenericError(format!(
                "Cannot read config file {}: {error}",
                path.display()
            ))
        })?;
        let mut config = Self::parse(&content)?;
        if let (Some(inventory), Some(dir)) = (config.inventory.as_mut(), path.parent()) {
            if inventory.is_relative() {
                *inventory = dir.join(&*inventory);
            }
        }
        Ok(config)
    }

    /// Loads the explicitly given file, or the default config file when it exists.
    pub fn load_explicit_or_default(explicit: Option<&Path>) -> crate::Result<ClientConfig> {
        match explicit {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    log::debug!("Loading config file {}", path.display());
                    Self::load(&path)
                }
                _ => Ok(ClientConfig::default()),
            },
        }
    }

    /// Values given on the command line (or in the environment) override the file.
    pub fn merge(self, inventory: Option<PathBuf>, datacenter: Option<String>) -> ClientConfig {
        ClientConfig {
            inventory: inventory.or(self.inventory),
            datacenter: datacenter.or(self.datacenter),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let mut dir = dirs::config_dir()?;
    dir.push("poolq");
    dir.push(CONFIG_FILE_NAME);
    Some(dir)
}
