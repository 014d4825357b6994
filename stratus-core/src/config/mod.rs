use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

pub mod destination;
pub mod sync;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Destinations(pub HashMap<destination::Name, destination::Definition>);

impl Destinations {
    pub fn get(&self, name: &destination::Name) -> Option<&destination::Definition> {
        self.0.get(name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Syncs(pub HashMap<sync::Name, sync::Definition>);

impl Syncs {
    pub fn get(&self, name: &sync::Name) -> Option<&sync::Definition> {
        self.0.get(name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub destinations: Destinations,
    pub syncs: Syncs,

    /// path of the configuration file, if the configuration was loaded from a file
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid configuration string")]
    InvalidConfigString(String, #[source] eyre::Report),
    #[error("invalid configuration file {}", .0.display())]
    InvalidConfigFile(PathBuf, #[source] eyre::Report),
    #[error("i/o error reading configuration file {}", .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sync '{}'", (self.0).0)]
pub struct UnknownSync(sync::Name);

#[derive(Debug, thiserror::Error)]
#[error("unknown destination '{}'", (self.0).0)]
pub struct UnknownDestination(destination::Name);

impl Config {
    pub fn parse(s: &str) -> Result<Config, ConfigLoadError> {
        toml::from_str(s).map_err(|e| ConfigLoadError::InvalidConfigString(s.to_owned(), e.into()))
    }

    pub async fn parse_file(p: &Path) -> Result<Config, ConfigLoadError> {
        let config_string = tokio::fs::read_to_string(p)
            .await
            .map_err(|e| ConfigLoadError::IoError(p.to_owned(), e))?;
        let mut config: Config = toml::from_str(&config_string)
            .map_err(|e| ConfigLoadError::InvalidConfigFile(p.to_owned(), e.into()))?;
        config.source = Some(p.to_owned());
        Ok(config)
    }

    pub fn sync(&self, name: &sync::Name) -> Result<&sync::Definition, UnknownSync> {
        self.syncs.get(name).ok_or_else(|| UnknownSync(name.clone()))
    }

    pub fn destination(
        &self,
        name: &destination::Name,
    ) -> Result<&destination::Definition, UnknownDestination> {
        self.destinations
            .get(name)
            .ok_or_else(|| UnknownDestination(name.clone()))
    }

    pub fn destination_for_sync(
        &self,
        sync: &sync::Definition,
    ) -> Result<&destination::Definition, UnknownDestination> {
        self.destination(&sync.destination)
    }
}
