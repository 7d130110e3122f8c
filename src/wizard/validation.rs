//! Per-step validation gates.
//!
//! Validators only check presence and shape. They never judge whether a
//! trip is feasible.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::draft::{DraftField, TripRequestDraft};

use super::step::WizardStep;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const TRAVEL_STYLE_REQUIRED: &str = "Please select your travel style";
pub const TRAVELERS_REQUIRED: &str = "Please enter number of travelers";
pub const TRAVELERS_OUT_OF_RANGE: &str = "Please enter a valid number of travelers";
pub const TRAVEL_DATES_REQUIRED: &str = "Please provide your travel dates";
pub const ARRIVAL_CITY_REQUIRED: &str = "Please select arrival city";
pub const DEPARTURE_CITY_REQUIRED: &str = "Please select departure city";
pub const ACCOMMODATION_REQUIRED: &str = "Please select accommodation";
pub const BUDGET_REQUIRED: &str = "Please select budget";
pub const DESIRED_EXPERIENCES_REQUIRED: &str = "Please describe your desired experiences";
pub const NAME_REQUIRED: &str = "Please enter your name";
pub const EMAIL_REQUIRED: &str = "Please enter your email";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const PHONE_REQUIRED: &str = "Please enter your phone";

/// Switches that differ between wizard variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default)]
    pub require_desired_experiences: bool,
}

/// Field-keyed validation messages. An empty map means the step passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: BTreeMap<DraftField, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &String)> {
        self.entries.iter().map(|(field, message)| (*field, message))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate.trim())
}

/// Computes the errors for one step. Pure and deterministic.
pub fn validate_step(step: WizardStep, draft: &TripRequestDraft, rules: &ValidationRules) -> ErrorMap {
    let mut errors = ErrorMap::new();
    match step {
        WizardStep::TravelStyle => {
            if is_blank(&draft.travel_style) {
                errors.insert(DraftField::TravelStyle, TRAVEL_STYLE_REQUIRED);
            }
            if draft.number_of_travelers < 1 {
                errors.insert(DraftField::NumberOfTravelers, TRAVELERS_REQUIRED);
            } else if u32::try_from(draft.number_of_travelers).is_err() {
                errors.insert(DraftField::NumberOfTravelers, TRAVELERS_OUT_OF_RANGE);
            }
        }
        WizardStep::WhenAndWhere => {
            if is_blank(&draft.travel_dates) {
                errors.insert(DraftField::TravelDates, TRAVEL_DATES_REQUIRED);
            }
            if is_blank(&draft.arrival_city) {
                errors.insert(DraftField::ArrivalCity, ARRIVAL_CITY_REQUIRED);
            }
            if is_blank(&draft.departure_city) {
                errors.insert(DraftField::DepartureCity, DEPARTURE_CITY_REQUIRED);
            }
        }
        WizardStep::Preferences => {
            if is_blank(&draft.accommodation) {
                errors.insert(DraftField::Accommodation, ACCOMMODATION_REQUIRED);
            }
            if is_blank(&draft.budget) {
                errors.insert(DraftField::Budget, BUDGET_REQUIRED);
            }
            if rules.require_desired_experiences && is_blank(&draft.desired_experiences) {
                errors.insert(DraftField::DesiredExperiences, DESIRED_EXPERIENCES_REQUIRED);
            }
        }
        WizardStep::Contact => {
            if is_blank(&draft.full_name) {
                errors.insert(DraftField::FullName, NAME_REQUIRED);
            }
            if is_blank(&draft.email) {
                errors.insert(DraftField::Email, EMAIL_REQUIRED);
            } else if !is_valid_email(&draft.email) {
                errors.insert(DraftField::Email, EMAIL_INVALID);
            }
            if is_blank(&draft.phone) {
                errors.insert(DraftField::Phone, PHONE_REQUIRED);
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> ValidationRules {
        ValidationRules {
            require_desired_experiences: true,
        }
    }

    #[test]
    fn empty_draft_fails_every_step() {
        let draft = TripRequestDraft::new();
        let rules = strict();
        let first = validate_step(WizardStep::TravelStyle, &draft, &rules);
        assert_eq!(first.get(DraftField::TravelStyle), Some(TRAVEL_STYLE_REQUIRED));
        assert!(!first.contains(DraftField::NumberOfTravelers));

        let second = validate_step(WizardStep::WhenAndWhere, &draft, &rules);
        assert_eq!(second.len(), 3);

        let third = validate_step(WizardStep::Preferences, &draft, &rules);
        assert_eq!(third.len(), 3);

        let fourth = validate_step(WizardStep::Contact, &draft, &rules);
        assert_eq!(
            fourth.fields().collect::<Vec<_>>(),
            vec![DraftField::FullName, DraftField::Email, DraftField::Phone]
        );
    }

    #[test]
    fn zero_travellers_fail_step_one() {
        let mut draft = TripRequestDraft::new();
        draft.travel_style = "solo".into();
        draft.number_of_travelers = 0;
        let errors = validate_step(WizardStep::TravelStyle, &draft, &ValidationRules::default());
        assert_eq!(errors.get(DraftField::NumberOfTravelers), Some(TRAVELERS_REQUIRED));
    }

    #[test]
    fn traveller_counts_beyond_u32_fail_step_one() {
        let mut draft = TripRequestDraft::new();
        draft.travel_style = "group".into();
        draft.number_of_travelers = i64::from(u32::MAX) + 1;
        let errors = validate_step(WizardStep::TravelStyle, &draft, &ValidationRules::default());
        assert_eq!(errors.get(DraftField::NumberOfTravelers), Some(TRAVELERS_OUT_OF_RANGE));

        draft.number_of_travelers = i64::from(u32::MAX);
        assert!(validate_step(WizardStep::TravelStyle, &draft, &ValidationRules::default()).is_empty());
    }

    #[test]
    fn desired_experiences_follow_the_rule() {
        let mut draft = TripRequestDraft::new();
        draft.accommodation = "luxury".into();
        draft.budget = "$3500+".into();
        assert!(validate_step(WizardStep::Preferences, &draft, &ValidationRules::default()).is_empty());
        let errors = validate_step(WizardStep::Preferences, &draft, &strict());
        assert_eq!(
            errors.get(DraftField::DesiredExperiences),
            Some(DESIRED_EXPERIENCES_REQUIRED)
        );
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let mut draft = TripRequestDraft::new();
        draft.full_name = "   ".into();
        draft.email = "  ".into();
        draft.phone = "\t".into();
        let errors = validate_step(WizardStep::Contact, &draft, &ValidationRules::default());
        assert_eq!(errors.get(DraftField::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["amina", "amina@", "amina@example", "am ina@example.com", "@example.com"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        for good in ["amina@example.com", " amina.b@mail.example.ma "] {
            assert!(is_valid_email(good), "{good} should be accepted");
        }
    }

    #[test]
    fn validation_is_deterministic() {
        let draft = TripRequestDraft::new();
        let rules = ValidationRules::default();
        assert_eq!(
            validate_step(WizardStep::Contact, &draft, &rules),
            validate_step(WizardStep::Contact, &draft, &rules)
        );
    }
}
