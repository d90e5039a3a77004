//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "satnet.toml";

/// Loads the configuration from `<dir>/satnet.toml`.
///
/// A missing file is not an error: the defaults are returned.
pub fn load_config(dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(ProjectConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `satnet.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates value ranges that serde cannot express.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.saturate.max_passes == 0 {
        return Err(ConfigError::ValidationError(
            "saturate.max_passes must be at least 1".to_string(),
        ));
    }
    if let Some(t) = config
        .saturate
        .commutative
        .iter()
        .find(|t| !t.is_commutative())
    {
        return Err(ConfigError::ValidationError(format!(
            "saturate.commutative lists '{t}', which is not a commutative gate type"
        )));
    }
    Ok(())
}
