use anyhow::Result;
use isimctl_common::{DeviceSearchTerm, DeviceState, SimctlError};
use tracing::info;

use super::{alert_on, AppContext};
use crate::simctl::Simctlable;
use crate::tui::{
    BootDeviceMessage, BootDeviceMessaging, DeviceSelectionPrompt, DeviceSelectionPrompting,
    DeviceSelectionPurpose, SimctlErrorAlert, SimctlErrorAlerting,
};

/// `isimctl boot [--confirm]`
pub async fn run(should_confirm: bool, ctx: &AppContext) -> Result<()> {
    BootDeviceCommand::new(
        Box::new(ctx.simctl()),
        Box::new(DeviceSelectionPrompt::new(
            ctx.ui.clone(),
            DeviceSelectionPurpose::BootDevice,
        )),
        Box::new(BootDeviceMessage::new(ctx.ui.clone())),
        Box::new(SimctlErrorAlert),
    )
    .run(should_confirm)
    .await
}

/// Picks a shut-down device and boots it
pub struct BootDeviceCommand {
    simctl: Box<dyn Simctlable>,
    device_selection_prompt: Box<dyn DeviceSelectionPrompting>,
    message: Box<dyn BootDeviceMessaging>,
    simctl_error_alert: Box<dyn SimctlErrorAlerting>,
}

impl BootDeviceCommand {
    pub fn new(
        simctl: Box<dyn Simctlable>,
        device_selection_prompt: Box<dyn DeviceSelectionPrompting>,
        message: Box<dyn BootDeviceMessaging>,
        simctl_error_alert: Box<dyn SimctlErrorAlerting>,
    ) -> Self {
        Self {
            simctl,
            device_selection_prompt,
            message,
            simctl_error_alert,
        }
    }

    pub async fn run(&self, should_confirm: bool) -> Result<()> {
        let result = self.boot(should_confirm).await;
        alert_on::<SimctlError>(result, |error| self.simctl_error_alert.show(error))
    }

    async fn boot(&self, should_confirm: bool) -> Result<()> {
        let simulators = self
            .simctl
            .list_devices(Some(DeviceSearchTerm::available()))
            .await?
            .filtering(DeviceState::Shutdown);

        if simulators.devices.is_empty() {
            self.message.show_no_bootable_devices_alert();
            return Ok(());
        }

        let runtime = self
            .device_selection_prompt
            .select_runtime(&simulators.to_runtime_groups(false), false)?;
        let device = self
            .device_selection_prompt
            .select_device(&runtime.to_device_options())?;

        if should_confirm && !self.message.confirm_boot()? {
            info!("Boot declined");
            return Ok(());
        }

        let progress = self.message.show_booting_device_message();
        let booted = self.simctl.boot_device(&device.device().udid).await;
        progress.finish_and_clear();
        booted?;

        self.message.show_boot_success_alert(&device);
        Ok(())
    }
}
