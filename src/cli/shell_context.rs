use std::sync::Arc;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{
    config::{Config, ConfigManager},
    submission::{HttpTransport, SubmissionAdapter},
    wizard::TripWizard,
};

use super::commands;
use super::core::{CliError, CommandError};
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub wizard: TripWizard,
    /// Built on the first submission and dropped whenever the config changes.
    pub(crate) adapter: Option<SubmissionAdapter<HttpTransport>>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script,
        });

        let config = config_manager.load()?;
        let wizard = TripWizard::new(Arc::new(config.wizard_config()?));
        tracing::debug!(
            path = %config_manager.path().display(),
            api = %config.api_base_url,
            "shell configured"
        );

        Ok(Self {
            mode,
            registry: CommandRegistry::with_entries(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            wizard,
            adapter: None,
        })
    }

    /// Step position and title, e.g. `trip 2/4 When & Where> `.
    pub fn prompt(&self) -> String {
        if self.wizard.is_submitted() {
            return "trip submitted> ".to_string();
        }
        let step = self.wizard.step();
        format!("trip {}/4 {}> ", step.number(), step.title())
    }

    /// Yes/no question for destructive commands. Scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(CommandError::from)
    }
}
