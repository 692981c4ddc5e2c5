use anyhow::Result;
use isimctl_common::{DeviceSearchTerm, DeviceState, OpenSimulatorError, SimctlError};
use tracing::info;

use super::{alert_on, AppContext};
use crate::simctl::Simctlable;
use crate::simulator::SimulatorOpenable;
use crate::tui::{
    DeviceSelectionPrompt, DeviceSelectionPrompting, DeviceSelectionPurpose, OpenDeviceMessage,
    OpenDeviceMessaging, OpenSimulatorErrorAlert, OpenSimulatorErrorAlerting, SimctlErrorAlert,
    SimctlErrorAlerting,
};

/// `isimctl open [--confirm]`
pub async fn run(should_confirm: bool, ctx: &AppContext) -> Result<()> {
    OpenDeviceCommand::new(
        Box::new(ctx.simctl()),
        Box::new(ctx.open_simulator()),
        Box::new(DeviceSelectionPrompt::new(
            ctx.ui.clone(),
            DeviceSelectionPurpose::OpenDevice,
        )),
        Box::new(OpenDeviceMessage::new(ctx.ui.clone())),
        Box::new(SimctlErrorAlert),
        Box::new(OpenSimulatorErrorAlert),
    )
    .run(should_confirm)
    .await
}

/// Picks a shut-down device and opens it in Simulator.app
pub struct OpenDeviceCommand {
    simctl: Box<dyn Simctlable>,
    open_simulator: Box<dyn SimulatorOpenable>,
    device_selection_prompt: Box<dyn DeviceSelectionPrompting>,
    message: Box<dyn OpenDeviceMessaging>,
    simctl_error_alert: Box<dyn SimctlErrorAlerting>,
    open_simulator_error_alert: Box<dyn OpenSimulatorErrorAlerting>,
}

impl OpenDeviceCommand {
    pub fn new(
        simctl: Box<dyn Simctlable>,
        open_simulator: Box<dyn SimulatorOpenable>,
        device_selection_prompt: Box<dyn DeviceSelectionPrompting>,
        message: Box<dyn OpenDeviceMessaging>,
        simctl_error_alert: Box<dyn SimctlErrorAlerting>,
        open_simulator_error_alert: Box<dyn OpenSimulatorErrorAlerting>,
    ) -> Self {
        Self {
            simctl,
            open_simulator,
            device_selection_prompt,
            message,
            simctl_error_alert,
            open_simulator_error_alert,
        }
    }

    pub async fn run(&self, should_confirm: bool) -> Result<()> {
        let result = self.open(should_confirm).await;
        let result = alert_on::<SimctlError>(result, |error| self.simctl_error_alert.show(error));
        alert_on::<OpenSimulatorError>(result, |error| {
            self.open_simulator_error_alert.show(error)
        })
    }

    async fn open(&self, should_confirm: bool) -> Result<()> {
        let simulators = self
            .simctl
            .list_devices(Some(DeviceSearchTerm::available()))
            .await?
            .filtering(DeviceState::Shutdown);

        if simulators.devices.is_empty() {
            self.message.show_no_openable_devices_alert();
            return Ok(());
        }

        let runtime = self
            .device_selection_prompt
            .select_runtime(&simulators.to_runtime_groups(false), false)?;
        let device = self
            .device_selection_prompt
            .select_device(&runtime.to_device_options())?;

        if should_confirm && !self.message.confirm_open()? {
            info!("Open declined");
            return Ok(());
        }

        let progress = self.message.show_opening_device_message();
        let opened = self
            .open_simulator
            .open(Some(device.device().udid.clone()))
            .await;
        progress.finish_and_clear();
        opened?;

        self.message.show_open_success_alert(&device);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simctl::MockSimctlable;
    use crate::simulator::MockSimulatorOpenable;
    use crate::tui::{
        MockDeviceSelectionPrompting, MockOpenDeviceMessaging, MockOpenSimulatorErrorAlerting,
        MockSimctlErrorAlerting,
    };
    use indicatif::ProgressBar;
    use isimctl_common::{Cancelled, Device, DeviceOption, SimulatorList};
    use mockall::predicate::eq;
    use std::collections::HashMap;

    const IOS_18: &str = "com.apple.CoreSimulator.SimRuntime.iOS-18-2";

    fn device(name: &str, state: &str) -> Device {
        Device::new(
            name,
            state,
            format!("UDID-{name}"),
            "com.apple.CoreSimulator.SimDeviceType.iPhone-16",
        )
    }

    fn available() -> SimulatorList {
        SimulatorList::new(HashMap::from([(
            IOS_18.to_string(),
            vec![device("iPhone 16 Pro", "Booted"), device("iPhone 16", "Shutdown")],
        )]))
    }

    struct Mocks {
        simctl: MockSimctlable,
        open: MockSimulatorOpenable,
        prompt: MockDeviceSelectionPrompting,
        message: MockOpenDeviceMessaging,
        simctl_alert: MockSimctlErrorAlerting,
        open_alert: MockOpenSimulatorErrorAlerting,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                simctl: MockSimctlable::new(),
                open: MockSimulatorOpenable::new(),
                prompt: MockDeviceSelectionPrompting::new(),
                message: MockOpenDeviceMessaging::new(),
                simctl_alert: MockSimctlErrorAlerting::new(),
                open_alert: MockOpenSimulatorErrorAlerting::new(),
            }
        }

        fn selecting_first() -> Self {
            let mut mocks = Self::new();
            mocks
                .simctl
                .expect_list_devices()
                .with(eq(Some(DeviceSearchTerm::available())))
                .times(1)
                .returning(|_| Ok(available()));
            mocks
                .prompt
                .expect_select_runtime()
                .times(1)
                .returning(|groups, _| Ok(groups[0].clone()));
            mocks
                .prompt
                .expect_select_device()
                .withf(|options| options.len() == 1)
                .times(1)
                .returning(|options| Ok(options[0].clone()));
            mocks
        }

        fn command(self) -> OpenDeviceCommand {
            OpenDeviceCommand::new(
                Box::new(self.simctl),
                Box::new(self.open),
                Box::new(self.prompt),
                Box::new(self.message),
                Box::new(self.simctl_alert),
                Box::new(self.open_alert),
            )
        }
    }

    #[tokio::test]
    async fn opens_the_selected_device() {
        let mut mocks = Mocks::selecting_first();
        mocks
            .message
            .expect_show_opening_device_message()
            .times(1)
            .returning(ProgressBar::hidden);
        mocks
            .open
            .expect_open()
            .with(eq(Some("UDID-iPhone 16".to_string())))
            .times(1)
            .returning(|_| Ok(()));
        mocks
            .message
            .expect_show_open_success_alert()
            .with(eq(DeviceOption(device("iPhone 16", "Shutdown"))))
            .times(1)
            .return_const(());

        mocks.command().run(false).await.unwrap();
    }

    #[tokio::test]
    async fn nothing_to_open_shows_alert() {
        let mut mocks = Mocks::new();
        mocks
            .simctl
            .expect_list_devices()
            .returning(|_| Ok(SimulatorList::default()));
        mocks
            .message
            .expect_show_no_openable_devices_alert()
            .times(1)
            .return_const(());
        mocks.open.expect_open().never();

        mocks.command().run(false).await.unwrap();
    }

    #[tokio::test]
    async fn declining_confirmation_opens_nothing() {
        let mut mocks = Mocks::selecting_first();
        mocks
            .message
            .expect_confirm_open()
            .times(1)
            .returning(|| Ok(false));
        mocks.open.expect_open().never();

        mocks.command().run(true).await.unwrap();
    }

    #[tokio::test]
    async fn open_failure_is_shown_as_alert() {
        let failure = OpenSimulatorError {
            command: "open -a Simulator --args -CurrentDeviceUDID UDID-iPhone 16".to_string(),
            description: "Unable to find application named 'Simulator'".to_string(),
        };

        let mut mocks = Mocks::selecting_first();
        mocks
            .message
            .expect_show_opening_device_message()
            .returning(ProgressBar::hidden);
        let open_failure = failure.clone();
        mocks
            .open
            .expect_open()
            .returning(move |_| Err(open_failure.clone().into()));
        mocks.message.expect_show_open_success_alert().never();
        mocks.simctl_alert.expect_show().never();
        mocks
            .open_alert
            .expect_show()
            .with(eq(failure))
            .times(1)
            .return_const(());

        mocks.command().run(false).await.unwrap();
    }

    #[tokio::test]
    async fn listing_failure_is_shown_as_simctl_alert() {
        let mut mocks = Mocks::new();
        mocks
            .simctl
            .expect_list_devices()
            .returning(|_| Err(SimctlError::XcrunNotFound.into()));
        mocks
            .simctl_alert
            .expect_show()
            .with(eq(SimctlError::XcrunNotFound))
            .times(1)
            .return_const(());
        mocks.open_alert.expect_show().never();

        mocks.command().run(false).await.unwrap();
    }

    #[tokio::test]
    async fn cancellation_propagates_without_alerts() {
        let mut mocks = Mocks::selecting_first();
        mocks
            .message
            .expect_confirm_open()
            .returning(|| Err(Cancelled.into()));
        mocks.simctl_alert.expect_show().never();
        mocks.open_alert.expect_show().never();

        let err = mocks.command().run(true).await.unwrap_err();
        assert!(err.is::<Cancelled>());
    }
}
