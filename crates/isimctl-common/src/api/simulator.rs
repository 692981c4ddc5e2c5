use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output of `xcrun simctl list devices --json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorList {
    /// Devices keyed by runtime identifier
    /// (e.g., "com.apple.CoreSimulator.SimRuntime.iOS-18-2")
    pub devices: HashMap<String, Vec<Device>>,
}

impl SimulatorList {
    pub fn new(devices: HashMap<String, Vec<Device>>) -> Self {
        Self { devices }
    }

    /// Decode the JSON document printed by `simctl list devices --json`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Keep only devices in the given state.
    ///
    /// Runtimes left without devices are dropped from the result.
    pub fn filtering(&self, state: DeviceState) -> Self {
        let devices = self
            .devices
            .iter()
            .filter_map(|(runtime, devices)| {
                let matching: Vec<Device> = devices
                    .iter()
                    .filter(|device| state.matches(&device.state))
                    .cloned()
                    .collect();

                (!matching.is_empty()).then(|| (runtime.clone(), matching))
            })
            .collect();

        Self { devices }
    }
}

/// A simulator device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    /// Device name (e.g., "iPhone 16 Pro")
    pub name: String,
    /// State as reported by simctl (e.g., "Booted", "Shutdown")
    pub state: String,
    /// Device UDID
    pub udid: String,
    /// Device type identifier
    #[serde(rename = "deviceTypeIdentifier")]
    pub device_type_identifier: String,
}

impl Device {
    pub fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        udid: impl Into<String>,
        device_type_identifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            udid: udid.into(),
            device_type_identifier: device_type_identifier.into(),
        }
    }
}

/// Simulator device state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Booted,
    Shutdown,
}

impl DeviceState {
    /// Label used by simctl for this state
    pub fn label(self) -> &'static str {
        match self {
            Self::Booted => "Booted",
            Self::Shutdown => "Shutdown",
        }
    }

    /// Case-insensitive, whole-string comparison against a simctl state
    pub fn matches(self, state: &str) -> bool {
        state.eq_ignore_ascii_case(self.label())
    }
}

/// Search term passed through to `xcrun simctl list devices <term>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSearchTerm(String);

impl DeviceSearchTerm {
    /// Returns `None` for a missing or empty term
    pub fn new(value: Option<&str>) -> Option<Self> {
        value
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
    }

    pub fn booted() -> Self {
        Self("booted".to_string())
    }

    pub fn available() -> Self {
        Self("available".to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
