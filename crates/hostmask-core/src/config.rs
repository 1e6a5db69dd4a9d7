use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub state_root: Option<String>,
    #[serde(default)]
    pub identity_dir: Option<String>,
    #[serde(default)]
    pub tool_dirs: Vec<String>,
    #[serde(default)]
    pub snapshot_tool: Option<String>,
    #[serde(default)]
    pub uninstall_tool: Option<String>,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse hostmask config")?;
        for (name, value) in [
            ("state_root", &config.state_root),
            ("identity_dir", &config.identity_dir),
            ("snapshot_tool", &config.snapshot_tool),
            ("uninstall_tool", &config.uninstall_tool),
        ] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(anyhow!("config field '{name}' must not be empty"));
                }
            }
        }
        for dir in &config.tool_dirs {
            if dir.trim().is_empty() {
                return Err(anyhow!("config field 'tool_dirs' must not contain empty entries"));
            }
        }
        for key in config.settings.keys() {
            if key.trim().is_empty() {
                return Err(anyhow!("config settings must not use empty names"));
            }
        }
        Ok(config)
    }
}
