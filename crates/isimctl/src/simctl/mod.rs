use anyhow::Result;
use async_trait::async_trait;
use isimctl_common::{DeviceSearchTerm, ExecutionError, SimctlError, SimulatorList};
use tracing::{debug, info};

use crate::executor::Executing;

#[cfg(test)]
use mockall::automock;

const PARSE_FAILURE_SUMMARY: &str = "Failed to parse device information.";

/// Runs `xcrun simctl` commands.
///
/// Failures are reported as [`SimctlError`]. Any other error, including
/// [`isimctl_common::Cancelled`], is passed through unchanged.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Simctlable: Send + Sync {
    /// `xcrun simctl list devices [<term>] --json`
    async fn list_devices(&self, search_term: Option<DeviceSearchTerm>) -> Result<SimulatorList>;

    /// `xcrun simctl boot <udid>`
    ///
    /// # Panics
    /// Panics if `udid` is empty.
    async fn boot_device(&self, udid: &str) -> Result<()>;
}

pub struct Simctl {
    xcrun: Box<dyn Executing>,
}

impl Simctl {
    pub fn new(xcrun: Box<dyn Executing>) -> Self {
        Self { xcrun }
    }

    fn ensure_available(&self) -> Result<()> {
        if self.xcrun.is_executable_available() {
            Ok(())
        } else {
            Err(SimctlError::XcrunNotFound.into())
        }
    }
}

#[async_trait]
impl Simctlable for Simctl {
    async fn list_devices(&self, search_term: Option<DeviceSearchTerm>) -> Result<SimulatorList> {
        self.ensure_available()?;

        let mut arguments = vec![
            "simctl".to_string(),
            "list".to_string(),
            "devices".to_string(),
        ];
        if let Some(term) = search_term {
            arguments.push(term.into_inner());
        }
        arguments.push("--json".to_string());

        let output = self
            .xcrun
            .capture_output(&arguments)
            .await
            .map_err(into_simctl_error)?;

        let list = SimulatorList::from_json(&output).map_err(|err| SimctlError::InvalidOutput {
            summary: PARSE_FAILURE_SUMMARY.to_string(),
            description: err.to_string(),
        })?;

        debug!("Found {} runtimes", list.devices.len());
        Ok(list)
    }

    async fn boot_device(&self, udid: &str) -> Result<()> {
        assert!(!udid.is_empty(), "udid must not be empty");

        self.ensure_available()?;

        info!("Booting simulator: {}", udid);

        let arguments = vec!["simctl".to_string(), "boot".to_string(), udid.to_string()];
        self.xcrun
            .execute(&arguments)
            .await
            .map_err(into_simctl_error)
    }
}

fn into_simctl_error(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<ExecutionError>() {
        Ok(failure) => SimctlError::from(failure).into(),
        Err(other) => other,
    }
}
