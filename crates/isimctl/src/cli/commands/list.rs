use anyhow::Result;
use isimctl_common::{DeviceSearchTerm, SimctlError, SimulatorList};

use super::{alert_on, AppContext};
use crate::simctl::Simctlable;
use crate::tui::{
    DeviceSelectionPrompt, DeviceSelectionPrompting, DeviceSelectionPurpose, DeviceTable,
    DeviceTableDisplaying, ListDevicesMessage, ListDevicesMessaging, SimctlErrorAlert,
    SimctlErrorAlerting,
};

/// `isimctl list [<search-term>] [--all]`
pub async fn run(search_term: Option<String>, show_all: bool, ctx: &AppContext) -> Result<()> {
    ListDevicesCommand::new(
        Box::new(ctx.simctl()),
        Box::new(DeviceTable),
        Box::new(DeviceSelectionPrompt::new(
            ctx.ui.clone(),
            DeviceSelectionPurpose::ListDevices,
        )),
        Box::new(ListDevicesMessage::new(ctx.config.clone())),
        Box::new(SimctlErrorAlert),
    )
    .run(search_term.as_deref(), show_all)
    .await
}

/// Browses devices interactively.
///
/// Without a search term the user always picks a runtime first, then either
/// sees the whole runtime (`show_all`) or picks one device and gets its
/// useful commands. With a search term, `show_all` prints every match at
/// once; otherwise the matches of one runtime are shown.
pub struct ListDevicesCommand {
    simctl: Box<dyn Simctlable>,
    device_table: Box<dyn DeviceTableDisplaying>,
    device_selection_prompt: Box<dyn DeviceSelectionPrompting>,
    message: Box<dyn ListDevicesMessaging>,
    simctl_error_alert: Box<dyn SimctlErrorAlerting>,
}

impl ListDevicesCommand {
    pub fn new(
        simctl: Box<dyn Simctlable>,
        device_table: Box<dyn DeviceTableDisplaying>,
        device_selection_prompt: Box<dyn DeviceSelectionPrompting>,
        message: Box<dyn ListDevicesMessaging>,
        simctl_error_alert: Box<dyn SimctlErrorAlerting>,
    ) -> Self {
        Self {
            simctl,
            device_table,
            device_selection_prompt,
            message,
            simctl_error_alert,
        }
    }

    pub async fn run(&self, search_term: Option<&str>, show_all: bool) -> Result<()> {
        let result = self.list(search_term, show_all).await;
        alert_on::<SimctlError>(result, |error| self.simctl_error_alert.show(error))
    }

    async fn list(&self, search_term: Option<&str>, show_all: bool) -> Result<()> {
        let search_term = DeviceSearchTerm::new(search_term);
        let has_search_term = search_term.is_some();

        let simulators = self.simctl.list_devices(search_term).await?;
        if simulators.devices.is_empty() {
            self.message.show_no_simulators_alert();
            return Ok(());
        }

        if has_search_term {
            self.show_matches(&simulators, show_all)
        } else {
            self.browse(&simulators, show_all)
        }
    }

    /// Matches are expected to be few, so there is no device step
    fn show_matches(&self, simulators: &SimulatorList, show_all: bool) -> Result<()> {
        if show_all {
            let devices = simulators.to_devices_with_runtime();
            if devices.is_empty() {
                self.message.show_no_devices_found_alert();
                return Ok(());
            }
            self.device_table.display_devices_with_runtime(&devices);
        } else {
            let groups = simulators.to_runtime_groups(true);
            if groups.is_empty() {
                self.message.show_no_devices_found_alert();
                return Ok(());
            }
            let runtime = self.device_selection_prompt.select_runtime(&groups, true)?;
            self.device_table.display_group(&runtime);
        }

        Ok(())
    }

    fn browse(&self, simulators: &SimulatorList, show_all: bool) -> Result<()> {
        let runtime = self
            .device_selection_prompt
            .select_runtime(&simulators.to_runtime_groups(false), false)?;

        if runtime.devices.is_empty() {
            self.message.show_no_devices_for_runtime_message();
            return Ok(());
        }

        if show_all {
            self.device_table.display_group(&runtime);
        } else {
            let device = self
                .device_selection_prompt
                .select_device(&runtime.to_device_options())?;
            self.device_table.display_device(device.device());
            self.message.show_device_commands(&device);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simctl::MockSimctlable;
    use crate::tui::{
        MockDeviceSelectionPrompting, MockDeviceTableDisplaying, MockListDevicesMessaging,
        MockSimctlErrorAlerting,
    };
    use isimctl_common::{Cancelled, Device, DeviceOption};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const IOS_18: &str = "com.apple.CoreSimulator.SimRuntime.iOS-18-2";
    const IOS_17: &str = "com.apple.CoreSimulator.SimRuntime.iOS-17-5";

    fn device(name: &str, state: &str) -> Device {
        Device::new(
            name,
            state,
            format!("UDID-{name}"),
            "com.apple.CoreSimulator.SimDeviceType.iPhone-16",
        )
    }

    fn simulators(entries: Vec<(&str, Vec<Device>)>) -> SimulatorList {
        SimulatorList::new(
            entries
                .into_iter()
                .map(|(runtime, devices)| (runtime.to_string(), devices))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn sample() -> SimulatorList {
        simulators(vec![
            (
                IOS_18,
                vec![device("iPhone 16 Pro", "Booted"), device("iPhone 16", "Shutdown")],
            ),
            (IOS_17, vec![]),
        ])
    }

    struct Mocks {
        simctl: MockSimctlable,
        table: MockDeviceTableDisplaying,
        prompt: MockDeviceSelectionPrompting,
        message: MockListDevicesMessaging,
        alert: MockSimctlErrorAlerting,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                simctl: MockSimctlable::new(),
                table: MockDeviceTableDisplaying::new(),
                prompt: MockDeviceSelectionPrompting::new(),
                message: MockListDevicesMessaging::new(),
                alert: MockSimctlErrorAlerting::new(),
            }
        }

        fn returning(list: SimulatorList) -> Self {
            let mut mocks = Self::new();
            mocks
                .simctl
                .expect_list_devices()
                .times(1)
                .returning(move |_| Ok(list.clone()));
            mocks
        }

        fn command(self) -> ListDevicesCommand {
            ListDevicesCommand::new(
                Box::new(self.simctl),
                Box::new(self.table),
                Box::new(self.prompt),
                Box::new(self.message),
                Box::new(self.alert),
            )
        }
    }

    #[tokio::test]
    async fn empty_list_shows_no_simulators_alert() {
        let mut mocks = Mocks::returning(simulators(vec![]));
        mocks
            .message
            .expect_show_no_simulators_alert()
            .times(1)
            .return_const(());

        mocks.command().run(None, false).await.unwrap();
    }

    #[tokio::test]
    async fn search_term_is_forwarded_and_empty_term_is_dropped() {
        let mut mocks = Mocks::new();
        mocks
            .simctl
            .expect_list_devices()
            .with(eq(Some(DeviceSearchTerm::booted())))
            .times(1)
            .returning(|_| Ok(simulators(vec![])));
        mocks
            .message
            .expect_show_no_simulators_alert()
            .return_const(());
        mocks.command().run(Some("booted"), true).await.unwrap();

        let mut mocks = Mocks::new();
        mocks
            .simctl
            .expect_list_devices()
            .with(eq(None::<DeviceSearchTerm>))
            .times(1)
            .returning(|_| Ok(simulators(vec![])));
        mocks
            .message
            .expect_show_no_simulators_alert()
            .return_const(());
        mocks.command().run(Some(""), true).await.unwrap();
    }

    #[tokio::test]
    async fn search_with_all_shows_every_match_without_prompting() {
        let mut mocks = Mocks::returning(sample());
        mocks.prompt.expect_select_runtime().never();
        mocks
            .table
            .expect_display_devices_with_runtime()
            .withf(|devices| {
                let names: Vec<&str> = devices.iter().map(|d| d.device.name.as_str()).collect();
                names == ["iPhone 16", "iPhone 16 Pro"]
                    && devices.iter().all(|d| d.runtime == "iOS 18.2")
            })
            .times(1)
            .return_const(());

        mocks.command().run(Some("iPhone"), true).await.unwrap();
    }

    #[tokio::test]
    async fn search_with_all_and_only_empty_runtimes_shows_not_found() {
        let mut mocks = Mocks::returning(simulators(vec![(IOS_17, vec![])]));
        mocks.table.expect_display_devices_with_runtime().never();
        mocks
            .message
            .expect_show_no_devices_found_alert()
            .times(1)
            .return_const(());

        mocks.command().run(Some("watch"), true).await.unwrap();
    }

    #[tokio::test]
    async fn search_without_all_autoselects_non_empty_runtimes() {
        let mut mocks = Mocks::returning(sample());
        mocks
            .prompt
            .expect_select_runtime()
            .withf(|groups, autoselect| {
                *autoselect && groups.len() == 1 && groups[0].runtime == "iOS 18.2"
            })
            .times(1)
            .returning(|groups, _| Ok(groups[0].clone()));
        mocks.prompt.expect_select_device().never();
        mocks
            .table
            .expect_display_group()
            .withf(|group| group.runtime == "iOS 18.2" && group.devices.len() == 2)
            .times(1)
            .return_const(());

        mocks.command().run(Some("iPhone"), false).await.unwrap();
    }

    #[tokio::test]
    async fn search_without_all_and_no_devices_shows_not_found() {
        let mut mocks = Mocks::returning(simulators(vec![(IOS_17, vec![])]));
        mocks.prompt.expect_select_runtime().never();
        mocks
            .message
            .expect_show_no_devices_found_alert()
            .times(1)
            .return_const(());

        mocks.command().run(Some("watch"), false).await.unwrap();
    }

    #[tokio::test]
    async fn browsing_offers_empty_runtimes_too() {
        let mut mocks = Mocks::returning(sample());
        mocks
            .prompt
            .expect_select_runtime()
            .withf(|groups, autoselect| {
                let runtimes: Vec<&str> = groups.iter().map(|g| g.runtime.as_str()).collect();
                !*autoselect && runtimes == ["iOS 17.5", "iOS 18.2"]
            })
            .times(1)
            .returning(|groups, _| Ok(groups[0].clone()));
        mocks
            .message
            .expect_show_no_devices_for_runtime_message()
            .times(1)
            .return_const(());
        mocks.prompt.expect_select_device().never();

        mocks.command().run(None, false).await.unwrap();
    }

    #[tokio::test]
    async fn browsing_with_all_shows_selected_runtime() {
        let mut mocks = Mocks::returning(sample());
        mocks
            .prompt
            .expect_select_runtime()
            .returning(|groups, _| Ok(groups[1].clone()));
        mocks.prompt.expect_select_device().never();
        mocks
            .table
            .expect_display_group()
            .withf(|group| group.runtime == "iOS 18.2")
            .times(1)
            .return_const(());

        mocks.command().run(None, true).await.unwrap();
    }

    #[tokio::test]
    async fn browsing_a_device_shows_details_and_commands() {
        let mut mocks = Mocks::returning(sample());
        mocks
            .prompt
            .expect_select_runtime()
            .returning(|groups, _| Ok(groups[1].clone()));
        mocks
            .prompt
            .expect_select_device()
            .withf(|options| {
                let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
                labels == ["iPhone 16", "iPhone 16 Pro"]
            })
            .times(1)
            .returning(|options| Ok(options[1].clone()));
        mocks
            .table
            .expect_display_device()
            .with(eq(device("iPhone 16 Pro", "Booted")))
            .times(1)
            .return_const(());
        mocks
            .message
            .expect_show_device_commands()
            .with(eq(DeviceOption(device("iPhone 16 Pro", "Booted"))))
            .times(1)
            .return_const(());

        mocks.command().run(None, false).await.unwrap();
    }

    #[tokio::test]
    async fn simctl_errors_are_shown_as_alerts() {
        let mut mocks = Mocks::new();
        mocks
            .simctl
            .expect_list_devices()
            .returning(|_| Err(SimctlError::XcrunNotFound.into()));
        mocks
            .alert
            .expect_show()
            .with(eq(SimctlError::XcrunNotFound))
            .times(1)
            .return_const(());

        mocks.command().run(None, false).await.unwrap();
    }

    #[tokio::test]
    async fn cancellation_propagates_without_alert() {
        let mut mocks = Mocks::returning(sample());
        mocks
            .prompt
            .expect_select_runtime()
            .returning(|_, _| Err(Cancelled.into()));
        mocks.alert.expect_show().never();

        let err = mocks.command().run(None, false).await.unwrap_err();

        assert!(err.is::<Cancelled>());
    }

    #[tokio::test]
    async fn other_errors_propagate() {
        let mut mocks = Mocks::new();
        mocks
            .simctl
            .expect_list_devices()
            .returning(|_| Err(anyhow::anyhow!("terminal went away")));
        mocks.alert.expect_show().never();

        let err = mocks.command().run(None, false).await.unwrap_err();

        assert_eq!(err.to_string(), "terminal went away");
    }
}
