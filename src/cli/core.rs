//! Dispatch, error reporting and wizard plumbing for the shell.

use std::{io, sync::Arc};

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::errors::{PlannerError, SubmissionError, WizardError};
use crate::submission::{HttpTransport, SubmissionAdapter};
use crate::wizard::{NextOutcome, TripWizard};

use super::output;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Fatal shell failures.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

/// Failures of a single command. Reported and the shell keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handler = self.registry.find(command).map(|entry| entry.handler);
        if let Some(handler) = handler {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .words()
            .map(|(word, _)| (levenshtein(word, &needle), word))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit trip planner?", true)
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Wizard(WizardError::AlreadySubmitted) => {
                output::error(WizardError::AlreadySubmitted);
                output::hint("Use `restart` to plan another trip.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    /// Forward move. The HTTP adapter is only built once the last step
    /// passes validation.
    pub(crate) fn advance(&mut self) -> Result<NextOutcome, CommandError> {
        let outcome = self.wizard.next()?;
        if !matches!(outcome, NextOutcome::ReadyToSubmit) {
            return Ok(outcome);
        }

        let adapter = match self.adapter.take() {
            Some(adapter) => Ok(adapter),
            None => self.build_adapter(),
        };
        let result = match adapter {
            Ok(adapter) => {
                let result = adapter.submit(self.wizard.draft());
                self.adapter = Some(adapter);
                result
            }
            Err(err) => {
                tracing::warn!(error = %err, "booking client unavailable");
                Err(SubmissionError::Network(err.to_string()))
            }
        };
        Ok(self.wizard.finish_submission(result)?)
    }

    fn build_adapter(&self) -> Result<SubmissionAdapter<HttpTransport>, CommandError> {
        let transport = HttpTransport::from_config(&self.config)?;
        Ok(SubmissionAdapter::new(transport, self.wizard.shared_config())
            .with_path(self.config.submit_path.clone()))
    }

    /// Discards the draft and starts over with the current configuration.
    pub(crate) fn restart_wizard(&mut self) -> CommandResult {
        let wizard_config = Arc::new(self.config.wizard_config()?);
        self.wizard = TripWizard::new(wizard_config);
        self.adapter = None;
        Ok(())
    }

    pub(crate) fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        self.adapter = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::draft::DraftField;
    use crate::wizard::{WizardPhase, WizardStep};

    fn script_context(dir: &tempfile::TempDir) -> ShellContext {
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        context.config.api_base_url = "http://127.0.0.1:9".into();
        context.config.timeout_secs = 1;
        context
    }

    #[test]
    fn booking_client_waits_for_the_last_step() {
        let dir = tempfile::tempdir().unwrap();
        let mut context = script_context(&dir);
        let wizard = &mut context.wizard;
        wizard.set_field(DraftField::TravelStyle, "solo").unwrap();
        wizard.set_field(DraftField::TravelDates, "2025-06-01").unwrap();
        wizard.set_field(DraftField::ArrivalCity, "Fes").unwrap();
        wizard.set_field(DraftField::DepartureCity, "Fes").unwrap();
        wizard.set_field(DraftField::Accommodation, "luxury").unwrap();
        wizard.set_field(DraftField::Budget, "$3500+").unwrap();

        for expected in [WizardStep::WhenAndWhere, WizardStep::Preferences, WizardStep::Contact] {
            assert_eq!(context.advance().unwrap(), NextOutcome::Advanced(expected));
            assert!(context.adapter.is_none());
        }

        assert_eq!(context.advance().unwrap(), NextOutcome::Blocked(WizardStep::Contact));
        assert!(context.adapter.is_none());

        context.wizard.set_field(DraftField::FullName, "Sam").unwrap();
        context.wizard.set_field(DraftField::Email, "sam@example.com").unwrap();
        context.wizard.set_field(DraftField::Phone, "600").unwrap();
        let outcome = context.advance().unwrap();
        assert!(matches!(
            outcome,
            NextOutcome::SubmissionFailed(SubmissionError::Network(_))
        ));
        assert!(context.adapter.is_some());
        assert_eq!(context.wizard.phase(), WizardPhase::Editing);
    }
}
