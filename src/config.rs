use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
}

/// Config file path: CLI arg > BP_CONFIG env > ./config.yaml.
pub fn resolve_config_path(cli_path: Option<&str>) -> PathBuf {
    if let Some(p) = cli_path {
        return PathBuf::from(p);
    }
    if let Ok(p) = std::env::var("BP_CONFIG") {
        return PathBuf::from(p);
    }
    PathBuf::from("config.yaml")
}

/// Load the YAML config; `GEMINI_API_KEY` in the environment overrides the
/// file's key either way.
pub fn load_config(path: &Path) -> Result<ApiConfig> {
    if !path.exists() {
        return Err(anyhow!(
            "config not found at {}\n\
             Use --config to specify a config file, or set BP_CONFIG.\n\
             Example config.yaml:\n\
             api_key: \"YOUR_KEY\"\napi_base: \"{}\"\nmodel: \"{}\"\n",
            path.display(),
            DEFAULT_API_BASE,
            DEFAULT_MODEL
        ));
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading config {}", path.display()))?;
    let mut cfg: ApiConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Parsing config {}", path.display()))?;

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            cfg.api_key = key;
        }
    }
    if cfg.api_key.is_empty() {
        return Err(anyhow!(
            "no API key: set api_key in {} or export GEMINI_API_KEY",
            path.display()
        ));
    }

    Ok(cfg)
}
