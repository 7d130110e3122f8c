mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{spawn_booking_server, unreachable_base_url};
use serde_json::json;
use trip_planner::catalog::WizardConfig;
use trip_planner::draft::{DraftField, TravelDates};
use trip_planner::errors::{SubmissionError, NETWORK_FAILURE_MESSAGE};
use trip_planner::submission::{HttpTransport, SubmissionAdapter};
use trip_planner::wizard::{NextOutcome, TripWizard, WizardPhase, WizardStep};

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(base_url, Duration::from_secs(5)).unwrap()
}

fn ready_wizard() -> TripWizard {
    let mut wizard = TripWizard::new(Arc::new(WizardConfig::current()));
    wizard.set_field(DraftField::TravelStyle, "group").unwrap();
    wizard.set_field(DraftField::NumberOfTravelers, "6").unwrap();
    wizard.next().unwrap();
    wizard
        .set_travel_dates(TravelDates::from_inputs(Some("2025-10-01"), Some("2025-10-09")).unwrap())
        .unwrap();
    wizard.set_field(DraftField::ArrivalCity, "Tangier").unwrap();
    wizard.set_field(DraftField::DepartureCity, "Agadir").unwrap();
    wizard.next().unwrap();
    wizard.set_field(DraftField::Accommodation, "standard").unwrap();
    wizard.set_field(DraftField::Budget, "$1000-$2000").unwrap();
    wizard.next().unwrap();
    wizard.set_field(DraftField::FullName, "Lina").unwrap();
    wizard.set_field(DraftField::Email, "lina@example.com").unwrap();
    wizard.set_field(DraftField::Phone, "612345678").unwrap();
    assert_eq!(wizard.step(), WizardStep::Contact);
    wizard
}

#[test]
fn accepted_request_carries_request_id_and_payload() {
    let (base_url, seen) = spawn_booking_server(StatusCode::CREATED, json!({"id": "tr_42"}));
    let mut wizard = ready_wizard();
    let adapter = SubmissionAdapter::new(transport(&base_url), wizard.shared_config());

    let outcome = wizard.next_with(&adapter).unwrap();
    let receipt = match outcome {
        NextOutcome::Submitted(receipt) => receipt,
        other => panic!("expected submission, got {other:?}"),
    };
    assert_eq!(receipt.status, 201);
    assert_eq!(receipt.body, Some(json!({"id": "tr_42"})));
    assert_eq!(wizard.phase(), WizardPhase::Submitted);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (request_id, payload) = &seen[0];
    assert_eq!(request_id.as_deref(), Some(receipt.request_id.to_string().as_str()));
    assert_eq!(payload["travelDates"], json!("2025-10-01 to 2025-10-09"));
    assert_eq!(payload["phone"], json!("+212 612345678"));
    assert_eq!(payload["numberOfTravelers"], json!(6));
}

#[test]
fn rate_limited_response_leaves_the_wizard_editable() {
    let (base_url, seen) = spawn_booking_server(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": "Rate limit exceeded"}),
    );
    let mut wizard = ready_wizard();
    let adapter = SubmissionAdapter::new(transport(&base_url), wizard.shared_config());

    let outcome = wizard.next_with(&adapter).unwrap();
    assert_eq!(outcome, NextOutcome::SubmissionFailed(SubmissionError::RateLimited));
    assert_eq!(wizard.phase(), WizardPhase::Editing);
    assert_eq!(
        wizard.notice(),
        Some("Too many requests. Please try again later.")
    );
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn server_error_message_comes_from_the_body() {
    let (base_url, _seen) = spawn_booking_server(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({"error": "Travel dates are in the past"}),
    );
    let wizard = ready_wizard();
    let adapter = SubmissionAdapter::new(transport(&base_url), wizard.shared_config());

    let err = adapter.submit(wizard.draft()).unwrap_err();
    assert_eq!(err.user_message(), "Travel dates are in the past");
}

#[test]
fn unreachable_server_is_a_network_failure() {
    let wizard = ready_wizard();
    let adapter = SubmissionAdapter::new(
        transport(&unreachable_base_url()),
        wizard.shared_config(),
    );

    let err = adapter.submit(wizard.draft()).unwrap_err();
    assert!(matches!(err, SubmissionError::Network(_)));
    assert_eq!(err.user_message(), NETWORK_FAILURE_MESSAGE);
}
