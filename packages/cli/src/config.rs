use anyhow::Context;
use pagebuilder_blocks::BlockRegistry;
use pagebuilder_template::PartialTemplateConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagebuilder.config.json";

/// Pagebuilder project file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Enabled block type keys; every registered type when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<String>>,

    /// Template applied to exported documents
    #[serde(default)]
    pub template: PartialTemplateConfig,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Built-in registry, narrowed to the enabled blocks
    pub fn registry(&self) -> anyhow::Result<BlockRegistry> {
        let registry = BlockRegistry::get_all();
        match &self.blocks {
            Some(keys) => Ok(registry.restrict(keys)?),
            None => Ok(registry),
        }
    }
}

/// Resolve `path` against the working directory
pub fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}
