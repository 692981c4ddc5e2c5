use serde::{Deserialize, Serialize};

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// xcrun settings
    #[serde(default)]
    pub xcrun: XcrunConfig,
    /// Simulator.app settings
    #[serde(default)]
    pub simulator: SimulatorConfig,
    /// Terminal output settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// xcrun configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XcrunConfig {
    /// Executable used for simctl commands, resolved through PATH
    #[serde(default = "default_xcrun_program")]
    pub program: String,
}

impl Default for XcrunConfig {
    fn default() -> Self {
        Self {
            program: default_xcrun_program(),
        }
    }
}

/// Simulator.app configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Launcher used to open the app
    #[serde(default = "default_open_program")]
    pub open_program: String,
    /// Application name passed to `open -a`
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            open_program: default_open_program(),
            app_name: default_app_name(),
        }
    }
}

/// Terminal output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

// Default value functions
fn default_xcrun_program() -> String {
    "xcrun".to_string()
}

fn default_open_program() -> String {
    "open".to_string()
}

fn default_app_name() -> String {
    "Simulator".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.xcrun.program, "xcrun");
        assert_eq!(config.simulator.open_program, "open");
        assert_eq!(config.simulator.app_name, "Simulator");
        assert!(config.ui.color);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [xcrun]
            program = "/usr/bin/xcrun"

            [ui]
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.xcrun.program, "/usr/bin/xcrun");
        assert_eq!(config.simulator, SimulatorConfig::default());
        assert!(!config.ui.color);
    }
}
