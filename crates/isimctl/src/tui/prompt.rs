use anyhow::Result;
use dialoguer::{FuzzySelect, Select};
use isimctl_common::{DeviceOption, RuntimeGroup};
use tracing::debug;

use super::{interaction_error, Ui};

#[cfg(test)]
use mockall::automock;

/// What the user is picking a device for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSelectionPurpose {
    ListDevices,
    BootDevice,
    OpenDevice,
}

/// Prompt questions for the runtime and device steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionQuestions {
    pub runtime: &'static str,
    pub device: &'static str,
}

impl DeviceSelectionPurpose {
    pub fn questions(self) -> SelectionQuestions {
        match self {
            Self::ListDevices => SelectionQuestions {
                runtime: "Which runtime's devices would you like to see?",
                device: "Which device would you like to view?",
            },
            Self::BootDevice => SelectionQuestions {
                runtime: "Which runtime contains the device to boot?",
                device: "Which device would you like to boot?",
            },
            Self::OpenDevice => SelectionQuestions {
                runtime: "Which runtime contains the device to open?",
                device: "Which device would you like to open?",
            },
        }
    }
}

/// Two-step runtime then device selection
#[cfg_attr(test, automock)]
pub trait DeviceSelectionPrompting: Send + Sync {
    /// # Panics
    /// Panics if `options` is empty.
    fn select_runtime(
        &self,
        options: &[RuntimeGroup],
        autoselect_single_choice: bool,
    ) -> Result<RuntimeGroup>;

    /// Devices can be narrowed by typing.
    ///
    /// # Panics
    /// Panics if `options` is empty.
    fn select_device(&self, options: &[DeviceOption]) -> Result<DeviceOption>;
}

pub struct DeviceSelectionPrompt {
    ui: Ui,
    questions: SelectionQuestions,
}

impl DeviceSelectionPrompt {
    pub fn new(ui: Ui, purpose: DeviceSelectionPurpose) -> Self {
        Self {
            ui,
            questions: purpose.questions(),
        }
    }
}

impl DeviceSelectionPrompting for DeviceSelectionPrompt {
    fn select_runtime(
        &self,
        options: &[RuntimeGroup],
        autoselect_single_choice: bool,
    ) -> Result<RuntimeGroup> {
        assert!(!options.is_empty(), "No runtimes to choose from");

        if autoselect_single_choice && options.len() == 1 {
            debug!("Auto-selected runtime: {}", options[0]);
            return Ok(options[0].clone());
        }

        let selection = Select::with_theme(self.ui.theme())
            .with_prompt(self.questions.runtime)
            .items(options)
            .default(0)
            .interact_on(self.ui.term())
            .map_err(interaction_error)?;

        Ok(options[selection].clone())
    }

    fn select_device(&self, options: &[DeviceOption]) -> Result<DeviceOption> {
        assert!(!options.is_empty(), "No devices to choose from");

        let selection = FuzzySelect::with_theme(self.ui.theme())
            .with_prompt(self.questions.device)
            .items(options)
            .default(0)
            .interact_on(self.ui.term())
            .map_err(interaction_error)?;

        Ok(options[selection].clone())
    }
}
