use std::cell::Cell;
use std::sync::Arc;

use trip_planner::catalog::WizardConfig;
use trip_planner::draft::{CollectionField, DraftField, TravelDates};
use trip_planner::errors::{SubmissionError, WizardError};
use trip_planner::submission::{
    BookingTransport, OutboundRequest, SubmissionAdapter, TransportError, TransportResponse,
};
use trip_planner::wizard::validation::{
    EMAIL_REQUIRED, TRAVELERS_OUT_OF_RANGE, TRAVEL_DATES_REQUIRED,
};
use trip_planner::wizard::{NextOutcome, StepStatus, TripWizard, WizardPhase, WizardStep};

/// Answers every request with a fixed status and counts the calls.
struct CountingTransport {
    status: u16,
    calls: Cell<usize>,
}

impl CountingTransport {
    fn answering(status: u16) -> Self {
        Self {
            status,
            calls: Cell::new(0),
        }
    }
}

impl BookingTransport for CountingTransport {
    fn post_json(&self, _request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        Ok(TransportResponse::new(self.status, r#"{"ok":true}"#))
    }
}

fn current_wizard() -> TripWizard {
    TripWizard::new(Arc::new(WizardConfig::current()))
}

fn fill_first_three_steps(wizard: &mut TripWizard) {
    wizard.set_field(DraftField::TravelStyle, "family").unwrap();
    wizard.set_field(DraftField::NumberOfTravelers, "4").unwrap();
    assert_eq!(wizard.next(), Ok(NextOutcome::Advanced(WizardStep::WhenAndWhere)));

    let dates = TravelDates::from_inputs(Some("2025-03-10"), Some("2025-03-20")).unwrap();
    wizard.set_travel_dates(dates).unwrap();
    wizard.set_field(DraftField::ArrivalCity, "Marrakech").unwrap();
    wizard.set_field(DraftField::DepartureCity, "Fes").unwrap();
    assert_eq!(wizard.next(), Ok(NextOutcome::Advanced(WizardStep::Preferences)));

    wizard.set_field(DraftField::Accommodation, "comfort").unwrap();
    wizard.set_field(DraftField::Budget, "$2000-$3500").unwrap();
    assert_eq!(wizard.next(), Ok(NextOutcome::Advanced(WizardStep::Contact)));
}

#[test]
fn end_to_end_flow_blocks_then_submits() {
    let mut wizard = current_wizard();
    wizard.set_field(DraftField::TravelStyle, "family").unwrap();
    wizard.set_field(DraftField::NumberOfTravelers, "4").unwrap();
    assert_eq!(wizard.next(), Ok(NextOutcome::Advanced(WizardStep::WhenAndWhere)));

    assert_eq!(wizard.next(), Ok(NextOutcome::Blocked(WizardStep::WhenAndWhere)));
    assert_eq!(wizard.errors().get(DraftField::TravelDates), Some(TRAVEL_DATES_REQUIRED));

    wizard.prev().unwrap();
    fill_first_three_steps(&mut wizard);

    let transport = CountingTransport::answering(201);
    let adapter = SubmissionAdapter::new(&transport, wizard.shared_config());

    let outcome = wizard.next_with(&adapter).unwrap();
    assert_eq!(outcome, NextOutcome::Blocked(WizardStep::Contact));
    assert_eq!(wizard.errors().get(DraftField::Email), Some(EMAIL_REQUIRED));
    assert_eq!(transport.calls.get(), 0);

    wizard.set_field(DraftField::FullName, "Amina El Idrissi").unwrap();
    wizard.set_field(DraftField::Email, "amina@example.com").unwrap();
    wizard.set_field(DraftField::Phone, "612345678").unwrap();

    let outcome = wizard.next_with(&adapter).unwrap();
    assert!(matches!(outcome, NextOutcome::Submitted(ref receipt) if receipt.status == 201));
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(wizard.phase(), WizardPhase::Submitted);
    assert_eq!(wizard.next_with(&adapter), Err(WizardError::AlreadySubmitted));
    assert_eq!(transport.calls.get(), 1);
}

#[test]
fn step_gating_reports_the_missing_field() {
    let mut wizard = current_wizard();
    wizard.set_field(DraftField::NumberOfTravelers, "2").unwrap();
    assert_eq!(wizard.next(), Ok(NextOutcome::Blocked(WizardStep::TravelStyle)));
    assert_eq!(wizard.step(), WizardStep::TravelStyle);
    assert_eq!(
        wizard.errors().fields().collect::<Vec<_>>(),
        vec![DraftField::TravelStyle]
    );
}

#[test]
fn zero_travelers_is_kept_and_blocks() {
    let mut wizard = current_wizard();
    wizard.set_field(DraftField::TravelStyle, "solo").unwrap();
    wizard.set_field(DraftField::NumberOfTravelers, "0").unwrap();
    assert_eq!(wizard.draft().number_of_travelers, 0);
    assert_eq!(wizard.next(), Ok(NextOutcome::Blocked(WizardStep::TravelStyle)));
    assert!(wizard.errors().contains(DraftField::NumberOfTravelers));

    wizard.set_field(DraftField::NumberOfTravelers, "lots").unwrap();
    assert_eq!(wizard.draft().number_of_travelers, 1);
}

#[test]
fn oversized_traveler_count_blocks_instead_of_changing() {
    let mut wizard = current_wizard();
    wizard.set_field(DraftField::TravelStyle, "group").unwrap();
    wizard.set_field(DraftField::NumberOfTravelers, "5000000000").unwrap();
    assert_eq!(wizard.draft().number_of_travelers, 5_000_000_000);
    assert_eq!(wizard.next(), Ok(NextOutcome::Blocked(WizardStep::TravelStyle)));
    assert_eq!(
        wizard.errors().get(DraftField::NumberOfTravelers),
        Some(TRAVELERS_OUT_OF_RANGE)
    );
    assert_eq!(wizard.payload().number_of_travelers, 5_000_000_000);

    wizard.set_field(DraftField::NumberOfTravelers, "12").unwrap();
    assert_eq!(wizard.next(), Ok(NextOutcome::Advanced(WizardStep::WhenAndWhere)));
    assert_eq!(wizard.payload().number_of_travelers, 12);
}

#[test]
fn back_always_moves_one_step_and_floors_at_one() {
    let mut wizard = current_wizard();
    assert_eq!(wizard.prev(), Ok(WizardStep::TravelStyle));

    fill_first_three_steps(&mut wizard);
    wizard.set_field(DraftField::Budget, "").unwrap();
    assert_eq!(wizard.prev(), Ok(WizardStep::Preferences));
    assert_eq!(wizard.prev(), Ok(WizardStep::WhenAndWhere));
    assert_eq!(wizard.prev(), Ok(WizardStep::TravelStyle));
    assert_eq!(wizard.prev(), Ok(WizardStep::TravelStyle));
}

#[test]
fn errors_from_one_step_do_not_bleed_into_the_next() {
    let mut wizard = current_wizard();
    wizard.next().unwrap();
    assert!(wizard.errors().contains(DraftField::TravelStyle));

    wizard.set_field(DraftField::TravelStyle, "couple").unwrap();
    wizard.next().unwrap();
    assert!(wizard.errors().is_empty());

    wizard.next().unwrap();
    let fields: Vec<_> = wizard.errors().fields().collect();
    assert_eq!(
        fields,
        vec![
            DraftField::TravelDates,
            DraftField::ArrivalCity,
            DraftField::DepartureCity
        ]
    );
}

#[test]
fn toggling_twice_restores_the_selection() {
    let mut wizard = current_wizard();
    let before = wizard.draft().adventure_activities.clone();

    assert_eq!(wizard.toggle(CollectionField::AdventureActivities, "Hiking"), Ok(true));
    assert!(wizard.draft().adventure_activities.contains("Hiking"));
    assert_eq!(wizard.toggle(CollectionField::AdventureActivities, "hiking"), Ok(false));
    assert_eq!(wizard.draft().adventure_activities, before);

    assert_eq!(wizard.toggle(CollectionField::Experiences, "Desert Camp"), Ok(true));
    assert!(wizard.draft().experiences.contains("desert-camp"));
}

#[test]
fn unknown_toggle_options_are_rejected() {
    let mut wizard = current_wizard();
    let err = wizard
        .toggle(CollectionField::AdventureActivities, "Skydiving")
        .unwrap_err();
    assert!(matches!(
        err,
        WizardError::InvalidChoice {
            field: DraftField::AdventureActivities,
            ..
        }
    ));
    assert!(wizard.draft().adventure_activities.is_empty());
}

#[test]
fn legacy_variant_requires_desired_experiences() {
    let mut wizard = TripWizard::new(Arc::new(WizardConfig::legacy()));
    wizard.set_field(DraftField::TravelStyle, "group").unwrap();
    wizard.next().unwrap();
    wizard.set_field(DraftField::TravelDates, "next spring").unwrap();
    wizard.set_field(DraftField::ArrivalCity, "Agadir").unwrap();
    wizard.set_field(DraftField::DepartureCity, "Tangier").unwrap();
    wizard.next().unwrap();
    wizard.set_field(DraftField::Accommodation, "mixed").unwrap();
    wizard.set_field(DraftField::Budget, "$500-$1000").unwrap();

    assert_eq!(wizard.next(), Ok(NextOutcome::Blocked(WizardStep::Preferences)));
    assert!(wizard.errors().contains(DraftField::DesiredExperiences));

    wizard
        .set_field(DraftField::DesiredExperiences, "Surf lessons and tagine")
        .unwrap();
    wizard.set_field(DraftField::Transportation, "Private driver").unwrap();
    assert_eq!(wizard.next(), Ok(NextOutcome::Advanced(WizardStep::Contact)));
    assert_eq!(wizard.draft().country_code, "");
}

#[test]
fn failed_submission_keeps_the_draft_and_sets_a_notice() {
    let mut wizard = current_wizard();
    fill_first_three_steps(&mut wizard);
    wizard.set_field(DraftField::FullName, "Sam").unwrap();
    wizard.set_field(DraftField::Email, "sam@example.org").unwrap();
    wizard.set_field(DraftField::Phone, "600000000").unwrap();

    assert_eq!(wizard.next(), Ok(NextOutcome::ReadyToSubmit));
    assert_eq!(wizard.phase(), WizardPhase::Submitting);
    assert_eq!(wizard.next(), Err(WizardError::SubmissionInFlight));
    assert_eq!(
        wizard.set_field(DraftField::Email, "other@example.org"),
        Ok(())
    );

    let outcome = wizard
        .finish_submission(Err(SubmissionError::RateLimited))
        .unwrap();
    assert_eq!(outcome, NextOutcome::SubmissionFailed(SubmissionError::RateLimited));
    assert_eq!(wizard.phase(), WizardPhase::Editing);
    assert_eq!(wizard.step(), WizardStep::Contact);
    assert_eq!(
        wizard.notice(),
        Some("Too many requests. Please try again later.")
    );
    assert_eq!(wizard.draft().full_name, "Sam");

    assert_eq!(wizard.next(), Ok(NextOutcome::ReadyToSubmit));
    assert_eq!(wizard.notice(), None);
}

#[test]
fn progress_marks_steps_around_the_current_one() {
    let mut wizard = current_wizard();
    wizard.set_field(DraftField::TravelStyle, "solo").unwrap();
    wizard.next().unwrap();
    let statuses: Vec<StepStatus> = wizard.progress().into_iter().map(|(_, s)| s).collect();
    assert_eq!(
        statuses,
        vec![
            StepStatus::Completed,
            StepStatus::Active,
            StepStatus::Upcoming,
            StepStatus::Upcoming
        ]
    );
}

#[test]
fn summary_uses_catalog_labels() {
    let mut wizard = current_wizard();
    fill_first_three_steps(&mut wizard);
    wizard.toggle(CollectionField::ImportantFactors, "safety").unwrap();

    let summary = wizard.summary();
    let preferences = summary
        .sections
        .iter()
        .find(|section| section.step == WizardStep::Preferences)
        .unwrap();
    let value = |field: DraftField| {
        preferences
            .entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value.as_str())
    };
    assert_eq!(value(DraftField::Budget), Some("$2,000 - $3,500"));
    assert_eq!(value(DraftField::Accommodation), Some("Comfort"));
    assert_eq!(value(DraftField::ImportantFactors), Some("Safety"));
}
