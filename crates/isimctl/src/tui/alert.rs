use colored::Colorize;
use isimctl_common::{OpenSimulatorError, SimctlError};

use super::Styles;

#[cfg(test)]
use mockall::automock;

const REPORT_ISSUE: &str = "Please report this issue at: https://github.com/droibit/isimctl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

impl AlertKind {
    fn header(self) -> String {
        match self {
            Self::Info => format!("{} {}", "ℹ".bright_cyan(), "Info".bright_cyan().bold()),
            Self::Success => format!("{} {}", "✔".bright_green(), "Success".bright_green().bold()),
            Self::Error => format!("{} {}", "✖".bright_red(), "Error".bright_red().bold()),
        }
    }
}

/// A boxed-off message with optional follow-up hints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub takeaways: Vec<String>,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, message)
    }

    fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            takeaways: Vec::new(),
        }
    }

    pub fn takeaway(mut self, takeaway: impl Into<String>) -> Self {
        self.takeaways.push(takeaway.into());
        self
    }

    pub fn render(&self) -> String {
        let mut lines = vec![self.kind.header()];
        lines.extend(self.message.lines().map(|line| format!("  {}", line)));

        if !self.takeaways.is_empty() {
            lines.push(String::new());
            lines.push(format!("  {}", "Takeaways:".bold()));
            lines.extend(
                self.takeaways
                    .iter()
                    .map(|takeaway| format!("   {} {}", "▸".dimmed(), takeaway)),
            );
        }

        lines.join("\n")
    }

    /// Errors go to stderr, everything else to stdout
    pub fn show(&self) {
        match self.kind {
            AlertKind::Error => eprintln!("{}\n", self.render()),
            AlertKind::Info | AlertKind::Success => println!("{}\n", self.render()),
        }
    }
}

/// Shows a [`SimctlError`] as an alert
#[cfg_attr(test, automock)]
pub trait SimctlErrorAlerting: Send + Sync {
    fn show(&self, error: &SimctlError);
}

pub struct SimctlErrorAlert;

impl SimctlErrorAlerting for SimctlErrorAlert {
    fn show(&self, error: &SimctlError) {
        simctl_error_alert(error).show();
    }
}

pub fn simctl_error_alert(error: &SimctlError) -> Alert {
    let xcrun_version = format!(
        "Include error details and the output of {}",
        Styles::command("xcrun --version")
    );

    match error {
        SimctlError::XcrunNotFound => Alert::error(error.to_string())
            .takeaway("You can download Xcode from the Mac App Store")
            .takeaway(format!(
                "After installing Xcode, you may need to run {} to install command line tools",
                Styles::command("xcode-select --install")
            )),
        SimctlError::CommandFailed {
            command,
            description,
        } => Alert::error(format!(
            "Command Failed: {}\n{}",
            Styles::command(command),
            Styles::muted(description)
        ))
        .takeaway(REPORT_ISSUE)
        .takeaway(xcrun_version),
        SimctlError::InvalidOutput {
            summary,
            description,
        } => Alert::error(format!("{}\n{}", summary, Styles::muted(description)))
            .takeaway(REPORT_ISSUE)
            .takeaway(xcrun_version),
    }
}

/// Shows an [`OpenSimulatorError`] as an alert
#[cfg_attr(test, automock)]
pub trait OpenSimulatorErrorAlerting: Send + Sync {
    fn show(&self, error: &OpenSimulatorError);
}

pub struct OpenSimulatorErrorAlert;

impl OpenSimulatorErrorAlerting for OpenSimulatorErrorAlert {
    fn show(&self, error: &OpenSimulatorError) {
        open_simulator_error_alert(error).show();
    }
}

pub fn open_simulator_error_alert(error: &OpenSimulatorError) -> Alert {
    Alert::error(format!(
        "Command Failed: {}\n{}",
        Styles::command(&error.command),
        Styles::muted(&error.description)
    ))
    .takeaway("Please ensure Simulator.app is installed")
    .takeaway(REPORT_ISSUE)
}
