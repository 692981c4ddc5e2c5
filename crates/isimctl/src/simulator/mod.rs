use anyhow::Result;
use async_trait::async_trait;
use isimctl_common::{ExecutionError, OpenSimulatorError};
use tracing::info;

use crate::executor::Executing;

#[cfg(test)]
use mockall::automock;

/// Opens Simulator.app
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SimulatorOpenable: Send + Sync {
    /// `open -a <app> [--args -CurrentDeviceUDID <udid>]`
    ///
    /// Without a udid the app opens on whatever device it last showed.
    ///
    /// # Panics
    /// Panics if `udid` is `Some("")`.
    async fn open(&self, udid: Option<String>) -> Result<()>;
}

pub struct OpenSimulator {
    open: Box<dyn Executing>,
    app_name: String,
}

impl OpenSimulator {
    pub fn new(open: Box<dyn Executing>, app_name: impl Into<String>) -> Self {
        Self {
            open,
            app_name: app_name.into(),
        }
    }

    fn arguments(&self, udid: Option<String>) -> Vec<String> {
        let mut arguments = vec!["-a".to_string(), self.app_name.clone()];
        if let Some(udid) = udid {
            arguments.extend(["--args".to_string(), "-CurrentDeviceUDID".to_string(), udid]);
        }
        arguments
    }
}

#[async_trait]
impl SimulatorOpenable for OpenSimulator {
    async fn open(&self, udid: Option<String>) -> Result<()> {
        assert!(udid.as_deref() != Some(""), "udid must not be empty");

        info!("Opening {} (device: {:?})", self.app_name, udid);

        self.open
            .execute(&self.arguments(udid))
            .await
            .map_err(|err| match err.downcast::<ExecutionError>() {
                Ok(failure) => anyhow::Error::from(OpenSimulatorError::from(failure)),
                Err(other) => other,
            })
    }
}
