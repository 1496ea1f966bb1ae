use crate::agent::{TeamQueue, TeamQueueCatalog};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CAREDESK_DIR: &str = ".caredesk";

pub const DEFAULT_MODEL: &str = "PetrosStav/gemma3-tools:12b";
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// How the tool-calling budget is enforced once it runs out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetMode {
    /// Stop at zero. Pending tool calls are skipped and the model answers
    /// without tools.
    #[default]
    HardCap,
    /// Keep executing past zero for as long as the model requests tools.
    Legacy,
}

/// What happens when a tool call cannot be resolved or fails.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorPolicy {
    #[default]
    Abort,
    /// Feed the failure back to the model as a tool result.
    Report,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: Option<String>,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: Option<f64>,
    pub max_iterations: usize,
    pub budget_mode: BudgetMode,
    pub tool_errors: ToolErrorPolicy,
    pub team_queues: Vec<TeamQueue>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: None,
            api_key: String::new(),
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            budget_mode: BudgetMode::default(),
            tool_errors: ToolErrorPolicy::default(),
            team_queues: TeamQueueCatalog::default_queues(),
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        if config_exists() {
            load_config()
        } else {
            Ok(Config::default())
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.as_deref().unwrap_or("ollama")
    }

    pub fn team_queue_catalog(&self) -> TeamQueueCatalog {
        TeamQueueCatalog::new(self.team_queues.clone())
    }
}

pub fn get_caredesk_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(CAREDESK_DIR)
}

pub fn get_config_path() -> PathBuf {
    get_caredesk_dir().join("config.toml")
}

pub fn config_exists() -> bool {
    get_config_path().exists()
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(config_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!(
                "Config file not found at {}. Run 'caredesk onboard' to set up your configuration.",
                config_path.display()
            )
        } else {
            anyhow::anyhow!("Failed to read config from {}: {}", config_path.display(), e)
        }
    })?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", config_path.display()))
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, &get_config_path())
}

pub fn save_config_to(config: &Config, config_path: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    let content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config to TOML")?;

    std::fs::write(config_path, content)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
}
