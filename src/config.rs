use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::KeeperError;

/// Runtime configuration, resolved from defaults overlaid with environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://vaccination.db".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            max_connections: 5,
        }
    }
}

impl Config {
    /// Only these environment keys are read; anything else in the process env is ignored.
    const ENV_KEYS: [&'static str; 4] = ["database_url", "listen_addr", "loglevel", "max_connections"];

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&Self::ENV_KEYS))
    }

    pub fn load() -> Result<Self, KeeperError> {
        Ok(Self::figment().extract()?)
    }
}
