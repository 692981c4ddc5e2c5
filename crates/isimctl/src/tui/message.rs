use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use isimctl_common::{CliConfig, DeviceOption};

use super::{interaction_error, spinner, Alert, Styles, Ui};

#[cfg(test)]
use mockall::automock;

const NO_DEVICES_TO_ACT_ON: &str = "All available devices are already booted or unavailable.";

/// Messages for `isimctl list`
#[cfg_attr(test, automock)]
pub trait ListDevicesMessaging: Send + Sync {
    fn show_no_simulators_alert(&self);
    fn show_no_devices_found_alert(&self);
    fn show_no_devices_for_runtime_message(&self);
    /// Copyable open/boot/shutdown command lines for the device
    fn show_device_commands(&self, device: &DeviceOption);
}

/// Command hints name the configured programs
pub struct ListDevicesMessage {
    config: CliConfig,
}

impl ListDevicesMessage {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }
}

impl ListDevicesMessaging for ListDevicesMessage {
    fn show_no_simulators_alert(&self) {
        no_simulators_alert().show();
    }

    fn show_no_devices_found_alert(&self) {
        no_devices_found_alert().show();
    }

    fn show_no_devices_for_runtime_message(&self) {
        println!(
            "{} No devices available for the selected runtime.",
            "ℹ".bright_cyan()
        );
    }

    fn show_device_commands(&self, device: &DeviceOption) {
        device_commands_alert(device, &self.config).show();
    }
}

pub fn no_simulators_alert() -> Alert {
    Alert::info("No simulators available.").takeaway(
        "Install simulator components: https://developer.apple.com/documentation/xcode/downloading-and-installing-additional-xcode-components",
    )
}

pub fn no_devices_found_alert() -> Alert {
    Alert::info("No devices found for the search term.")
        .takeaway("Try a different search term or check available devices without filtering.")
}

pub fn device_commands_alert(device: &DeviceOption, config: &CliConfig) -> Alert {
    let udid = &device.device().udid;
    let xcrun = &config.xcrun.program;

    Alert::info("Useful Commands:")
        .takeaway(format!(
            "Open: {}",
            Styles::command(&format!(
                "{} -a \"{}\" --args -CurrentDeviceUDID {}",
                config.simulator.open_program, config.simulator.app_name, udid
            ))
        ))
        .takeaway(format!(
            "Boot: {}",
            Styles::command(&format!("{} simctl boot {}", xcrun, udid))
        ))
        .takeaway(format!(
            "Shutdown: {}",
            Styles::command(&format!("{} simctl shutdown {}", xcrun, udid))
        ))
}

/// Messages for `isimctl boot`
#[cfg_attr(test, automock)]
pub trait BootDeviceMessaging: Send + Sync {
    /// Defaults to yes
    fn confirm_boot(&self) -> Result<bool>;
    /// Returns the spinner to clear once the boot finishes
    fn show_booting_device_message(&self) -> ProgressBar;
    fn show_boot_success_alert(&self, device: &DeviceOption);
    fn show_no_bootable_devices_alert(&self);
}

pub struct BootDeviceMessage {
    ui: Ui,
}

impl BootDeviceMessage {
    pub fn new(ui: Ui) -> Self {
        Self { ui }
    }
}

impl BootDeviceMessaging for BootDeviceMessage {
    fn confirm_boot(&self) -> Result<bool> {
        confirm(&self.ui, "Would you like to boot?")
    }

    fn show_booting_device_message(&self) -> ProgressBar {
        spinner("Booting the device ...")
    }

    fn show_boot_success_alert(&self, device: &DeviceOption) {
        boot_success_alert(device).show();
    }

    fn show_no_bootable_devices_alert(&self) {
        no_bootable_devices_alert().show();
    }
}

pub fn boot_success_alert(device: &DeviceOption) -> Alert {
    let device = device.device();
    Alert::success(format!(
        "Device {} is now booted.",
        Styles::device(&device.name, &device.udid)
    ))
}

pub fn no_bootable_devices_alert() -> Alert {
    Alert::info("No devices available to boot.").takeaway(NO_DEVICES_TO_ACT_ON)
}

/// Messages for `isimctl open`
#[cfg_attr(test, automock)]
pub trait OpenDeviceMessaging: Send + Sync {
    /// Defaults to yes
    fn confirm_open(&self) -> Result<bool>;
    /// Returns the spinner to clear once Simulator.app is up
    fn show_opening_device_message(&self) -> ProgressBar;
    fn show_open_success_alert(&self, device: &DeviceOption);
    fn show_no_openable_devices_alert(&self);
}

pub struct OpenDeviceMessage {
    ui: Ui,
}

impl OpenDeviceMessage {
    pub fn new(ui: Ui) -> Self {
        Self { ui }
    }
}

impl OpenDeviceMessaging for OpenDeviceMessage {
    fn confirm_open(&self) -> Result<bool> {
        confirm(&self.ui, "Would you like to open?")
    }

    fn show_opening_device_message(&self) -> ProgressBar {
        spinner("Opening the device in Simulator.app ...")
    }

    fn show_open_success_alert(&self, device: &DeviceOption) {
        open_success_alert(device).show();
    }

    fn show_no_openable_devices_alert(&self) {
        no_openable_devices_alert().show();
    }
}

pub fn open_success_alert(device: &DeviceOption) -> Alert {
    let device = device.device();
    Alert::success(format!(
        "Device {} is now open in Simulator.app.",
        Styles::device(&device.name, &device.udid)
    ))
}

pub fn no_openable_devices_alert() -> Alert {
    Alert::info("No devices available to open.").takeaway(NO_DEVICES_TO_ACT_ON)
}

fn confirm(ui: &Ui, question: &str) -> Result<bool> {
    Confirm::with_theme(ui.theme())
        .with_prompt(question)
        .default(true)
        .interact_on(ui.term())
        .map_err(interaction_error)
}
