use thiserror::Error;

/// Errors that can occur when running `xcrun simctl`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimctlError {
    #[error("xcrun command not found. Please ensure Xcode is installed.")]
    XcrunNotFound,

    #[error("Command failed: {command}\n{description}")]
    CommandFailed { command: String, description: String },

    #[error("{summary}\n{description}")]
    InvalidOutput { summary: String, description: String },
}

impl From<ExecutionError> for SimctlError {
    fn from(err: ExecutionError) -> Self {
        SimctlError::CommandFailed {
            command: err.command,
            description: err.description,
        }
    }
}

/// An external command could not be spawned or exited unsuccessfully
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Command failed: {command}\n{description}")]
pub struct ExecutionError {
    /// Executable and arguments, space separated
    pub command: String,
    /// Captured stderr, stdout, or a description of the exit condition
    pub description: String,
}

impl ExecutionError {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Opening Simulator.app failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to execute '{command}': {description}")]
pub struct OpenSimulatorError {
    pub command: String,
    pub description: String,
}

impl From<ExecutionError> for OpenSimulatorError {
    fn from(err: ExecutionError) -> Self {
        Self {
            command: err.command,
            description: err.description,
        }
    }
}

/// The surrounding operation was cancelled while a command was in flight.
///
/// Never converted into [`SimctlError`] or [`OpenSimulatorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Operation cancelled")]
pub struct Cancelled;
