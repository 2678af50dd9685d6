use std::time::Duration;

use anyhow::Context;
use checkers_session::session::TurnLabels;
use serde::{Deserialize, Serialize};

use crate::network;


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub port: u16,
    // How often the screen is repainted when nothing else happens.
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    pub labels: TurnLabels,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            port: network::DEFAULT_PORT,
            tick_interval: Duration::from_millis(100),
            labels: TurnLabels::default(),
        }
    }
}

pub fn read_config_file(filename: &str) -> anyhow::Result<ClientConfig> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read config file '{filename}'."))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{filename}'."))
}
