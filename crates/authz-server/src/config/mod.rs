//! Plugin config loader (strict parsing).

pub mod schema;

use std::fs;

use authz_core::error::{AuthzError, Result};

pub use schema::{PluginConfig, PluginSection, TransportKind};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AUTHZ_PLUGIN_CONFIG";

pub fn load_from_file(path: &str) -> Result<PluginConfig> {
    let s = fs::read_to_string(path).map_err(|e| AuthzError::io(path, e))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PluginConfig> {
    let cfg: PluginConfig = serde_yaml::from_str(s)
        .map_err(|e| AuthzError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from `path` when given, otherwise fall back to built-in defaults.
pub fn load(path: Option<&str>) -> Result<PluginConfig> {
    match path {
        Some(p) => load_from_file(p),
        None => {
            let cfg = PluginConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
