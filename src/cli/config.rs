// SPDX-License-Identifier: Apache-2.0

use std::io::Read;

use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) input: InputConfig,
    #[serde(default)]
    pub(crate) output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InputConfig {
    #[serde(default)]
    /// Default system state snapshot file
    pub(crate) system_state: Option<String>,
    #[serde(default)]
    /// Default netplan configuration file
    pub(crate) netplan_state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OutputConfig {
    #[serde(default)]
    pub(crate) json: bool,
}

impl Config {
    pub(crate) const DEFAULT_CONFIG_PATH: &'static str =
        "/etc/netplan-diff/netplan-diff.conf";

    pub(crate) fn load(path: &str) -> Result<Self, CliError> {
        let path = std::path::Path::new(path);
        if !path.exists() {
            log::debug!(
                "Configuration file {} not found, using defaults",
                path.display()
            );
            return Ok(Config::default());
        }
        let mut fd = std::fs::File::open(path)?;
        let mut content = String::new();
        fd.read_to_string(&mut content)?;
        match toml::from_str::<Config>(&content) {
            Ok(c) => {
                log::info!("Configuration loaded:\n{content}");
                Ok(c)
            }
            Err(e) => Err(CliError {
                code: crate::error::EX_DATAERR,
                error_msg: format!(
                    "Failed to read configuration from {}: {e}",
                    path.display()
                ),
            }),
        }
    }
}
