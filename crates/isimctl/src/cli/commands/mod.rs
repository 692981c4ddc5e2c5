pub mod boot;
pub mod config;
pub mod list;
pub mod open;

use anyhow::Result;
use isimctl_common::CliConfig;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::executor::Executor;
use crate::simctl::Simctl;
use crate::simulator::OpenSimulator;
use crate::tui::Ui;

/// Everything a command needs to build its default collaborators
pub struct AppContext {
    pub config: CliConfig,
    pub cancel: CancellationToken,
    pub ui: Ui,
}

impl AppContext {
    pub fn simctl(&self) -> Simctl {
        Simctl::new(Box::new(Executor::new(
            &self.config.xcrun.program,
            self.cancel.clone(),
        )))
    }

    pub fn open_simulator(&self) -> OpenSimulator {
        OpenSimulator::new(
            Box::new(Executor::new(
                &self.config.simulator.open_program,
                self.cancel.clone(),
            )),
            &self.config.simulator.app_name,
        )
    }
}

/// Hand an `E` to `show` and finish normally; other errors are returned as-is
pub(crate) fn alert_on<E>(result: Result<()>, show: impl FnOnce(&E)) -> Result<()>
where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
{
    match result {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast::<E>() {
            Ok(error) => {
                debug!("Showing alert for: {}", error);
                show(&error);
                Ok(())
            }
            Err(other) => Err(other),
        },
    }
}
