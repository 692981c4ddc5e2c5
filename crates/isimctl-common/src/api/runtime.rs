use std::fmt;

use super::simulator::{Device, SimulatorList};

const RUNTIME_PREFIX: &str = "com.apple.CoreSimulator.SimRuntime.";

/// Convert a runtime identifier to a human-readable name.
///
/// `"com.apple.CoreSimulator.SimRuntime.iOS-26-2"` becomes `"iOS 26.2"`.
/// Identifiers without a version are returned without the prefix.
pub fn format_runtime(identifier: &str) -> String {
    let without_prefix = identifier
        .strip_prefix(RUNTIME_PREFIX)
        .unwrap_or(identifier);

    let segments: Vec<&str> = without_prefix
        .split('-')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.split_first() {
        Some((os_name, version)) if !version.is_empty() => {
            format!("{} {}", os_name, version.join("."))
        }
        _ => without_prefix.to_string(),
    }
}

/// A runtime with its devices, ready to be shown as a choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeGroup {
    /// Human-readable runtime (e.g., "iOS 18.2")
    pub runtime: String,
    /// Devices sorted by name
    pub devices: Vec<Device>,
}

impl RuntimeGroup {
    pub fn to_device_options(&self) -> Vec<DeviceOption> {
        self.devices.iter().cloned().map(DeviceOption).collect()
    }
}

impl fmt::Display for RuntimeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.runtime)
    }
}

/// A device shown as a choice, labelled by its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOption(pub Device);

impl DeviceOption {
    pub fn device(&self) -> &Device {
        &self.0
    }
}

impl fmt::Display for DeviceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// A device paired with its human-readable runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceWithRuntime {
    pub device: Device,
    pub runtime: String,
}

impl SimulatorList {
    /// Group devices by formatted runtime, sorted by runtime then device name.
    ///
    /// With `exclude_empty`, runtimes without devices are left out;
    /// otherwise they appear as groups with no devices.
    pub fn to_runtime_groups(&self, exclude_empty: bool) -> Vec<RuntimeGroup> {
        let mut entries: Vec<(&String, &Vec<Device>)> = self
            .devices
            .iter()
            .filter(|(_, devices)| !exclude_empty || !devices.is_empty())
            .collect();

        // HashMap order is random; fix it so equal runtime labels stay deterministic
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut groups: Vec<RuntimeGroup> = entries
            .into_iter()
            .map(|(identifier, devices)| {
                let mut devices = devices.clone();
                devices.sort_by(|a, b| a.name.cmp(&b.name));
                RuntimeGroup {
                    runtime: format_runtime(identifier),
                    devices,
                }
            })
            .collect();

        groups.sort_by(|a, b| a.runtime.cmp(&b.runtime));
        groups
    }

    /// Flatten all devices, sorted by runtime then device name
    pub fn to_devices_with_runtime(&self) -> Vec<DeviceWithRuntime> {
        let mut devices: Vec<DeviceWithRuntime> = self
            .to_runtime_groups(true)
            .into_iter()
            .flat_map(|group| {
                let runtime = group.runtime;
                group.devices.into_iter().map(move |device| DeviceWithRuntime {
                    device,
                    runtime: runtime.clone(),
                })
            })
            .collect();

        devices.sort_by(|a, b| {
            a.runtime
                .cmp(&b.runtime)
                .then_with(|| a.device.name.cmp(&b.device.name))
        });
        devices
    }
}
