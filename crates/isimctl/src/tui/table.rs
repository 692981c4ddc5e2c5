use isimctl_common::{Device, DeviceWithRuntime, RuntimeGroup};
use tabled::{settings::Style, Table, Tabled};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "UDID")]
    udid: String,
    #[tabled(rename = "Device Type Identifier")]
    device_type_identifier: String,
}

impl From<&Device> for DeviceRow {
    fn from(device: &Device) -> Self {
        Self {
            name: device.name.clone(),
            state: device.state.clone(),
            udid: device.udid.clone(),
            device_type_identifier: device.device_type_identifier.clone(),
        }
    }
}

#[derive(Debug, Tabled)]
struct DeviceWithRuntimeRow {
    #[tabled(rename = "Runtime")]
    runtime: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "UDID")]
    udid: String,
    #[tabled(rename = "Device Type Identifier")]
    device_type_identifier: String,
}

impl From<&DeviceWithRuntime> for DeviceWithRuntimeRow {
    fn from(entry: &DeviceWithRuntime) -> Self {
        Self {
            runtime: entry.runtime.clone(),
            name: entry.device.name.clone(),
            state: entry.device.state.clone(),
            udid: entry.device.udid.clone(),
            device_type_identifier: entry.device.device_type_identifier.clone(),
        }
    }
}

pub fn render_devices(devices: &[Device]) -> String {
    let rows: Vec<DeviceRow> = devices.iter().map(DeviceRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn render_devices_with_runtime(devices: &[DeviceWithRuntime]) -> String {
    let rows: Vec<DeviceWithRuntimeRow> = devices.iter().map(DeviceWithRuntimeRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Prints devices as a table on stdout
#[cfg_attr(test, automock)]
pub trait DeviceTableDisplaying: Send + Sync {
    fn display_device(&self, device: &Device);

    /// # Panics
    /// Panics if the group has no devices.
    fn display_group(&self, group: &RuntimeGroup);

    /// Adds a Runtime column.
    ///
    /// # Panics
    /// Panics if `devices` is empty.
    fn display_devices_with_runtime(&self, devices: &[DeviceWithRuntime]);
}

pub struct DeviceTable;

impl DeviceTableDisplaying for DeviceTable {
    fn display_device(&self, device: &Device) {
        println!("{}", render_devices(std::slice::from_ref(device)));
    }

    fn display_group(&self, group: &RuntimeGroup) {
        assert!(!group.devices.is_empty(), "No devices to display");
        println!("{}", render_devices(&group.devices));
    }

    fn display_devices_with_runtime(&self, devices: &[DeviceWithRuntime]) {
        assert!(!devices.is_empty(), "No devices to display");
        println!("{}", render_devices_with_runtime(devices));
    }
}
