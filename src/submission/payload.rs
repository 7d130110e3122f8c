use serde::{Deserialize, Serialize};

use crate::catalog::WizardConfig;
use crate::draft::TripRequestDraft;

/// Body of `POST /api/trip-requests`.
///
/// Optional members are omitted entirely when the wizard variant does not
/// collect them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequestPayload {
    pub travel_style: String,
    pub travel_dates: String,
    pub arrival_city: String,
    pub departure_city: String,
    pub accommodation: String,
    pub budget: String,
    pub adventure_activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important_factors: Option<Vec<String>>,
    pub desired_experiences: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important_criteria: Option<String>,
    pub number_of_travelers: i64,
    pub traveler_ages: String,
    pub extra_details: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl TripRequestPayload {
    pub fn from_draft(draft: &TripRequestDraft, config: &WizardConfig) -> Self {
        let text = |value: &str| value.trim().to_string();
        Self {
            travel_style: text(&draft.travel_style),
            travel_dates: text(&draft.travel_dates),
            arrival_city: text(&draft.arrival_city),
            departure_city: text(&draft.departure_city),
            accommodation: text(&draft.accommodation),
            budget: text(&draft.budget),
            adventure_activities: draft.adventure_activities.to_vec(),
            experiences: config
                .experiences
                .as_ref()
                .map(|_| draft.experiences.to_vec()),
            important_factors: config
                .important_factors
                .as_ref()
                .map(|_| draft.important_factors.to_vec()),
            desired_experiences: text(&draft.desired_experiences),
            transportation: config
                .collect_transportation
                .then(|| text(&draft.transportation)),
            important_criteria: config
                .collect_transportation
                .then(|| text(&draft.important_criteria)),
            number_of_travelers: draft.number_of_travelers,
            traveler_ages: text(&draft.traveler_ages),
            extra_details: text(&draft.extra_details),
            full_name: text(&draft.full_name),
            email: text(&draft.email),
            phone: draft.combined_phone(config.country_codes.is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_draft() -> TripRequestDraft {
        let mut draft = TripRequestDraft::new();
        draft.full_name = " Amina Benali ".into();
        draft.email = "amina@example.com".into();
        draft.country_code = "+212".into();
        draft.phone = "612345678".into();
        draft
    }

    #[test]
    fn current_variant_sends_catalog_arrays_and_prefixed_phone() {
        let payload = TripRequestPayload::from_draft(&contact_draft(), &WizardConfig::current());
        assert_eq!(payload.phone, "+212 612345678");
        assert_eq!(payload.full_name, "Amina Benali");
        assert_eq!(payload.experiences, Some(Vec::new()));
        assert_eq!(payload.transportation, None);

        let json = serde_json::to_value(&payload).expect("serializes");
        assert!(json.get("importantFactors").is_some());
        assert!(json.get("importantCriteria").is_none());
    }

    #[test]
    fn legacy_variant_sends_phone_verbatim_and_free_text_extras() {
        let mut draft = contact_draft();
        draft.transportation = "Private driver".into();
        let payload = TripRequestPayload::from_draft(&draft, &WizardConfig::legacy());
        assert_eq!(payload.phone, "612345678");
        assert_eq!(payload.transportation.as_deref(), Some("Private driver"));
        assert_eq!(payload.important_criteria.as_deref(), Some(""));

        let json = serde_json::to_value(&payload).expect("serializes");
        assert!(json.get("experiences").is_none());
    }

    #[test]
    fn traveller_count_is_sent_as_stored() {
        let mut draft = contact_draft();
        draft.number_of_travelers = 12;
        let payload = TripRequestPayload::from_draft(&draft, &WizardConfig::current());
        assert_eq!(payload.number_of_travelers, 12);
    }
}
