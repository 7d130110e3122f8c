use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::{Catalog, WizardConfig};
use crate::draft::{CollectionField, DraftField, TravelDates, TripRequestDraft};
use crate::errors::{SubmissionError, WizardError};
use crate::submission::{BookingTransport, SubmissionAdapter, SubmissionReceipt, TripRequestPayload};

use super::step::{progress, StepStatus, WizardStep};
use super::validation::{validate_step, ErrorMap};

/// Where the wizard is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    /// A POST is outstanding; `next` is refused until it resolves.
    Submitting,
    /// Terminal. The request was accepted.
    Submitted,
}

/// Result of a forward move.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    Advanced(WizardStep),
    /// The current step has errors; see [`TripWizard::errors`].
    Blocked(WizardStep),
    /// The contact step passed and the wizard is now `Submitting`. The caller
    /// must report back through [`TripWizard::finish_submission`].
    ReadyToSubmit,
    Submitted(SubmissionReceipt),
    SubmissionFailed(SubmissionError),
}

/// Grouped, human-readable snapshot of the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub sections: Vec<ReviewSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub step: WizardStep,
    pub entries: Vec<(DraftField, String)>,
}

impl ReviewSummary {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for section in &self.sections {
            lines.push(format!("{}. {}", section.step.number(), section.step.title()));
            let width = section
                .entries
                .iter()
                .map(|(field, _)| field.label().len())
                .max()
                .unwrap_or(0);
            for (field, value) in &section.entries {
                let shown = if value.is_empty() { "-" } else { value.as_str() };
                lines.push(format!("  {:<width$}  {}", field.label(), shown, width = width));
            }
        }
        lines
    }
}

/// Four-step trip-request wizard owning one draft.
#[derive(Debug, Clone)]
pub struct TripWizard {
    session_id: Uuid,
    config: Arc<WizardConfig>,
    step: WizardStep,
    draft: TripRequestDraft,
    errors: ErrorMap,
    phase: WizardPhase,
    notice: Option<String>,
}

impl TripWizard {
    pub fn new(config: Arc<WizardConfig>) -> Self {
        let mut draft = TripRequestDraft::new();
        if let Some(code) = config.default_country_code() {
            draft.country_code = code.to_string();
        }
        let session_id = Uuid::new_v4();
        tracing::debug!(session = %session_id, variant = config.variant.as_str(), "wizard started");
        Self {
            session_id,
            config,
            step: WizardStep::FIRST,
            draft,
            errors: ErrorMap::new(),
            phase: WizardPhase::Editing,
            notice: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<WizardConfig> {
        Arc::clone(&self.config)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &TripRequestDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    /// Transient message from the last failed submission.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn progress(&self) -> Vec<(WizardStep, StepStatus)> {
        progress(self.step)
    }

    /// Whether this variant collects the field at all.
    pub fn is_field_enabled(&self, field: DraftField) -> bool {
        match field {
            DraftField::Experiences => self.config.experiences.is_some(),
            DraftField::ImportantFactors => self.config.important_factors.is_some(),
            DraftField::CountryCode => self.config.country_codes.is_some(),
            DraftField::Transportation | DraftField::ImportantCriteria => {
                self.config.collect_transportation
            }
            _ => true,
        }
    }

    /// Fields shown on a step for this variant.
    pub fn fields_for(&self, step: WizardStep) -> Vec<DraftField> {
        step.fields()
            .iter()
            .copied()
            .filter(|field| self.is_field_enabled(*field))
            .collect()
    }

    /// Catalog constraining a single-value field.
    pub fn catalog_for(&self, field: DraftField) -> Option<&Catalog> {
        match field {
            DraftField::TravelStyle => Some(&self.config.travel_styles),
            DraftField::ArrivalCity | DraftField::DepartureCity => Some(&self.config.cities),
            DraftField::Accommodation => Some(&self.config.accommodations),
            DraftField::Budget => Some(&self.config.budgets),
            DraftField::CountryCode => self.config.country_codes.as_ref(),
            other => other
                .as_collection()
                .and_then(|collection| self.config.collection(collection)),
        }
    }

    /// Updates one field from raw input. Errors are left as they are until
    /// the next forward move.
    pub fn set_field(&mut self, field: DraftField, raw: &str) -> Result<(), WizardError> {
        self.ensure_open()?;
        if let Some(collection) = field.as_collection() {
            return Err(WizardError::NotAScalar(collection));
        }
        if !self.is_field_enabled(field) {
            return Err(WizardError::FieldDisabled(field));
        }

        if field == DraftField::NumberOfTravelers {
            self.draft.set_number_of_travelers(raw);
            tracing::debug!(session = %self.session_id, %field, value = self.draft.number_of_travelers, "field updated");
            return Ok(());
        }

        let value = match self.catalog_for(field) {
            Some(_) if raw.trim().is_empty() => String::new(),
            Some(catalog) => catalog
                .resolve(raw)
                .map(|entry| entry.key.clone())
                .ok_or_else(|| WizardError::InvalidChoice {
                    field,
                    value: raw.trim().to_string(),
                    options: catalog.describe_options(),
                })?,
            None => raw.to_string(),
        };

        if let Some(slot) = self.draft.text_mut(field) {
            *slot = value;
        }
        tracing::debug!(session = %self.session_id, %field, "field updated");
        Ok(())
    }

    pub fn clear_field(&mut self, field: DraftField) -> Result<(), WizardError> {
        match field.as_collection() {
            Some(collection) => {
                self.ensure_open()?;
                *self.draft.selection_mut(collection) = Default::default();
                Ok(())
            }
            None => self.set_field(field, ""),
        }
    }

    /// Stores a picked date range in the single `travelDates` field.
    pub fn set_travel_dates(&mut self, dates: TravelDates) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.draft.travel_dates = dates.encode();
        tracing::debug!(session = %self.session_id, dates = %self.draft.travel_dates, "travel dates updated");
        Ok(())
    }

    /// Flips membership of a catalog option. Returns `true` when the option
    /// is selected afterwards.
    pub fn toggle(&mut self, collection: CollectionField, value: &str) -> Result<bool, WizardError> {
        self.ensure_open()?;
        let catalog = self
            .config
            .collection(collection)
            .ok_or(WizardError::FieldDisabled(collection.field()))?;
        let key = catalog
            .resolve(value)
            .map(|entry| entry.key.clone())
            .ok_or_else(|| WizardError::InvalidChoice {
                field: collection.field(),
                value: value.trim().to_string(),
                options: catalog.describe_options(),
            })?;
        let selected = self.draft.selection_mut(collection).toggle(&key);
        tracing::debug!(session = %self.session_id, %collection, %key, selected, "selection toggled");
        Ok(selected)
    }

    /// Validates the current step and moves forward. On the contact step a
    /// clean validation switches the wizard into `Submitting`.
    pub fn next(&mut self) -> Result<NextOutcome, WizardError> {
        match self.phase {
            WizardPhase::Submitted => return Err(WizardError::AlreadySubmitted),
            WizardPhase::Submitting => return Err(WizardError::SubmissionInFlight),
            WizardPhase::Editing => {}
        }

        self.errors = validate_step(self.step, &self.draft, &self.config.rules);
        if !self.errors.is_empty() {
            tracing::debug!(
                session = %self.session_id,
                step = self.step.number(),
                fields = ?self.errors.fields().collect::<Vec<_>>(),
                "step blocked"
            );
            return Ok(NextOutcome::Blocked(self.step));
        }

        if self.step.is_last() {
            self.phase = WizardPhase::Submitting;
            self.notice = None;
            tracing::debug!(session = %self.session_id, "ready to submit");
            return Ok(NextOutcome::ReadyToSubmit);
        }

        self.step = self.step.next();
        tracing::debug!(session = %self.session_id, step = self.step.number(), "advanced");
        Ok(NextOutcome::Advanced(self.step))
    }

    /// Moves back one step without validating.
    pub fn prev(&mut self) -> Result<WizardStep, WizardError> {
        if self.is_submitted() {
            return Err(WizardError::AlreadySubmitted);
        }
        self.step = self.step.previous();
        tracing::debug!(session = %self.session_id, step = self.step.number(), "moved back");
        Ok(self.step)
    }

    /// Applies the adapter's verdict to an outstanding submission.
    pub fn finish_submission(
        &mut self,
        result: Result<SubmissionReceipt, SubmissionError>,
    ) -> Result<NextOutcome, WizardError> {
        if self.phase != WizardPhase::Submitting {
            return Err(WizardError::NoSubmissionInFlight);
        }

        match result {
            Ok(receipt) => {
                self.phase = WizardPhase::Submitted;
                self.notice = None;
                tracing::info!(session = %self.session_id, request_id = %receipt.request_id, "trip request submitted");
                Ok(NextOutcome::Submitted(receipt))
            }
            Err(SubmissionError::Validation(errors)) => {
                self.phase = WizardPhase::Editing;
                self.errors = errors.clone();
                Ok(NextOutcome::SubmissionFailed(SubmissionError::Validation(errors)))
            }
            Err(err) => {
                self.phase = WizardPhase::Editing;
                self.notice = Some(err.user_message());
                tracing::warn!(session = %self.session_id, error = %err, "trip request failed");
                Ok(NextOutcome::SubmissionFailed(err))
            }
        }
    }

    /// `next`, submitting through `adapter` when the contact step passes.
    pub fn next_with<T: BookingTransport>(
        &mut self,
        adapter: &SubmissionAdapter<T>,
    ) -> Result<NextOutcome, WizardError> {
        match self.next()? {
            NextOutcome::ReadyToSubmit => {
                let result = adapter.submit(&self.draft);
                self.finish_submission(result)
            }
            other => Ok(other),
        }
    }

    /// The body that would be posted right now.
    pub fn payload(&self) -> TripRequestPayload {
        TripRequestPayload::from_draft(&self.draft, &self.config)
    }

    /// Review of every enabled field, catalog keys shown by label.
    pub fn summary(&self) -> ReviewSummary {
        let sections = WizardStep::ALL
            .into_iter()
            .map(|step| ReviewSection {
                step,
                entries: self
                    .fields_for(step)
                    .into_iter()
                    .map(|field| (field, self.display_value(field)))
                    .collect(),
            })
            .collect();
        ReviewSummary { sections }
    }

    pub fn display_value(&self, field: DraftField) -> String {
        if let Some(collection) = field.as_collection() {
            let selection = self.draft.selection(collection);
            return match self.catalog_for(field) {
                Some(catalog) => selection
                    .iter()
                    .map(|key| catalog.label_for(key))
                    .collect::<Vec<_>>()
                    .join(", "),
                None => selection.iter().collect::<Vec<_>>().join(", "),
            };
        }
        let raw = self.draft.display_value(field);
        match self.catalog_for(field) {
            Some(catalog) if field != DraftField::CountryCode => catalog.label_for(&raw).to_string(),
            _ => raw,
        }
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.is_submitted() {
            Err(WizardError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }
}
