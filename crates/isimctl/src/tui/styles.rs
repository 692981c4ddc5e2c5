use colored::Colorize;

/// Inline text styles used in alerts and hints
pub struct Styles;

impl Styles {
    /// A command line the user can copy
    pub fn command(text: &str) -> String {
        format!("'{}'", text).bright_cyan().to_string()
    }

    /// Secondary detail, such as captured command output
    pub fn muted(text: &str) -> String {
        text.dimmed().to_string()
    }

    /// Highlighted value inside a sentence
    pub fn accent(text: &str) -> String {
        text.bright_white().bold().to_string()
    }

    /// Device label used in success alerts: `<name> (<udid>)`
    pub fn device(name: &str, udid: &str) -> String {
        Self::accent(&format!("{} ({})", name, udid))
    }
}
