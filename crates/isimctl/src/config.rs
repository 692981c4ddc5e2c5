use anyhow::{Context, Result};
use isimctl_common::CliConfig;
use std::path::PathBuf;
use tracing::debug;

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("isimctl")
        .join("config.toml")
}

/// Explicit path if given, otherwise the default location
pub fn resolve_config_path(path: &Option<PathBuf>) -> PathBuf {
    path.clone().unwrap_or_else(default_config_path)
}

/// Load configuration from file or return defaults
pub fn load_config(path: &Option<PathBuf>) -> Result<CliConfig> {
    let config_path = resolve_config_path(path);

    if config_path.exists() {
        debug!("Loading config from {:?}", config_path);
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {:?}", config_path))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", config_path))?;
        Ok(config)
    } else {
        debug!("Config file not found, using defaults");
        Ok(CliConfig::default())
    }
}

/// Save configuration to file
pub fn save_config(config: &CliConfig, path: &Option<PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(&config_path, content).context("Failed to write config file")?;

    Ok(())
}

/// Generate default config content for `config init`
pub fn generate_default_config() -> String {
    r#"# isimctl configuration

[xcrun]
# Executable used for simctl commands, resolved through PATH
program = "xcrun"

[simulator]
# Launcher used to open Simulator.app
open_program = "open"

# Application name passed to `open -a`
app_name = "Simulator"

[ui]
# Set to false to disable colored output
color = true
"#
    .to_string()
}
