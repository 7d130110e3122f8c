//! The trip-request draft: the single record a wizard session fills in.

mod travel_dates;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use travel_dates::{TravelDates, DATE_FORMAT, RANGE_SEPARATOR};

use crate::errors::WizardError;

/// Every field of [`TripRequestDraft`], named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    TravelStyle,
    NumberOfTravelers,
    TravelerAges,
    TravelDates,
    ArrivalCity,
    DepartureCity,
    Accommodation,
    Budget,
    AdventureActivities,
    Experiences,
    ImportantFactors,
    DesiredExperiences,
    Transportation,
    ImportantCriteria,
    FullName,
    Email,
    CountryCode,
    Phone,
    ExtraDetails,
}

impl DraftField {
    pub const ALL: [DraftField; 19] = [
        DraftField::TravelStyle,
        DraftField::NumberOfTravelers,
        DraftField::TravelerAges,
        DraftField::TravelDates,
        DraftField::ArrivalCity,
        DraftField::DepartureCity,
        DraftField::Accommodation,
        DraftField::Budget,
        DraftField::AdventureActivities,
        DraftField::Experiences,
        DraftField::ImportantFactors,
        DraftField::DesiredExperiences,
        DraftField::Transportation,
        DraftField::ImportantCriteria,
        DraftField::FullName,
        DraftField::Email,
        DraftField::CountryCode,
        DraftField::Phone,
        DraftField::ExtraDetails,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            DraftField::TravelStyle => "travelStyle",
            DraftField::NumberOfTravelers => "numberOfTravelers",
            DraftField::TravelerAges => "travelerAges",
            DraftField::TravelDates => "travelDates",
            DraftField::ArrivalCity => "arrivalCity",
            DraftField::DepartureCity => "departureCity",
            DraftField::Accommodation => "accommodation",
            DraftField::Budget => "budget",
            DraftField::AdventureActivities => "adventureActivities",
            DraftField::Experiences => "experiences",
            DraftField::ImportantFactors => "importantFactors",
            DraftField::DesiredExperiences => "desiredExperiences",
            DraftField::Transportation => "transportation",
            DraftField::ImportantCriteria => "importantCriteria",
            DraftField::FullName => "fullName",
            DraftField::Email => "email",
            DraftField::CountryCode => "countryCode",
            DraftField::Phone => "phone",
            DraftField::ExtraDetails => "extraDetails",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::TravelStyle => "Travel style",
            DraftField::NumberOfTravelers => "Number of travelers",
            DraftField::TravelerAges => "Ages of travelers",
            DraftField::TravelDates => "Travel dates",
            DraftField::ArrivalCity => "Arrival city",
            DraftField::DepartureCity => "Departure city",
            DraftField::Accommodation => "Accommodation",
            DraftField::Budget => "Budget",
            DraftField::AdventureActivities => "Adventure activities",
            DraftField::Experiences => "Experiences",
            DraftField::ImportantFactors => "Important factors",
            DraftField::DesiredExperiences => "Desired experiences",
            DraftField::Transportation => "Transportation",
            DraftField::ImportantCriteria => "Important criteria",
            DraftField::FullName => "Full name",
            DraftField::Email => "Email",
            DraftField::CountryCode => "Country code",
            DraftField::Phone => "Phone",
            DraftField::ExtraDetails => "Extra details",
        }
    }

    /// The toggle collection this field names, if any.
    pub fn as_collection(&self) -> Option<CollectionField> {
        match self {
            DraftField::AdventureActivities => Some(CollectionField::AdventureActivities),
            DraftField::Experiences => Some(CollectionField::Experiences),
            DraftField::ImportantFactors => Some(CollectionField::ImportantFactors),
            _ => None,
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Accepts `travelDates`, `travel_dates`, `travel-dates` and friends.
impl FromStr for DraftField {
    type Err = WizardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_key(input);
        DraftField::ALL
            .iter()
            .copied()
            .find(|field| normalize_key(field.wire_name()) == wanted)
            .ok_or_else(|| WizardError::UnknownField(input.trim().to_string()))
    }
}

fn normalize_key(input: &str) -> String {
    input
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Multi-select fields mutated through toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionField {
    AdventureActivities,
    Experiences,
    ImportantFactors,
}

impl CollectionField {
    pub fn field(&self) -> DraftField {
        match self {
            CollectionField::AdventureActivities => DraftField::AdventureActivities,
            CollectionField::Experiences => DraftField::Experiences,
            CollectionField::ImportantFactors => DraftField::ImportantFactors,
        }
    }
}

impl fmt::Display for CollectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().wire_name())
    }
}

impl FromStr for CollectionField {
    type Err = WizardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let field = DraftField::from_str(input)?;
        field
            .as_collection()
            .ok_or(WizardError::NotACollection(field))
    }
}

/// Set of catalog keys with toggle semantics. Keys stay in the order they
/// were first selected so the submitted array is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    keys: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the key when absent, removes it when present. Returns `true`
    /// when the key is selected afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if let Some(position) = self.keys.iter().position(|existing| existing == key) {
            self.keys.remove(position);
            false
        } else {
            self.keys.push(key.to_string());
            true
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|existing| existing == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.keys.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for key in iter {
            let key = key.into();
            if !set.contains(&key) {
                set.keys.push(key);
            }
        }
        set
    }
}

/// In-progress trip request. Owned by exactly one wizard; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequestDraft {
    pub travel_style: String,
    pub number_of_travelers: i64,
    pub traveler_ages: String,
    pub travel_dates: String,
    pub arrival_city: String,
    pub departure_city: String,
    pub accommodation: String,
    pub budget: String,
    pub adventure_activities: SelectionSet,
    pub experiences: SelectionSet,
    pub important_factors: SelectionSet,
    pub desired_experiences: String,
    pub transportation: String,
    pub important_criteria: String,
    pub full_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub extra_details: String,
}

impl Default for TripRequestDraft {
    fn default() -> Self {
        Self {
            travel_style: String::new(),
            number_of_travelers: 1,
            traveler_ages: String::new(),
            travel_dates: String::new(),
            arrival_city: String::new(),
            departure_city: String::new(),
            accommodation: String::new(),
            budget: String::new(),
            adventure_activities: SelectionSet::new(),
            experiences: SelectionSet::new(),
            important_factors: SelectionSet::new(),
            desired_experiences: String::new(),
            transportation: String::new(),
            important_criteria: String::new(),
            full_name: String::new(),
            email: String::new(),
            country_code: String::new(),
            phone: String::new(),
            extra_details: String::new(),
        }
    }
}

impl TripRequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a plain text field. `None` for the traveller count
    /// and the toggle collections, which have their own setters.
    pub fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        let slot = match field {
            DraftField::TravelStyle => &mut self.travel_style,
            DraftField::TravelerAges => &mut self.traveler_ages,
            DraftField::TravelDates => &mut self.travel_dates,
            DraftField::ArrivalCity => &mut self.arrival_city,
            DraftField::DepartureCity => &mut self.departure_city,
            DraftField::Accommodation => &mut self.accommodation,
            DraftField::Budget => &mut self.budget,
            DraftField::DesiredExperiences => &mut self.desired_experiences,
            DraftField::Transportation => &mut self.transportation,
            DraftField::ImportantCriteria => &mut self.important_criteria,
            DraftField::FullName => &mut self.full_name,
            DraftField::Email => &mut self.email,
            DraftField::CountryCode => &mut self.country_code,
            DraftField::Phone => &mut self.phone,
            DraftField::ExtraDetails => &mut self.extra_details,
            DraftField::NumberOfTravelers
            | DraftField::AdventureActivities
            | DraftField::Experiences
            | DraftField::ImportantFactors => return None,
        };
        Some(slot)
    }

    pub fn selection(&self, collection: CollectionField) -> &SelectionSet {
        match collection {
            CollectionField::AdventureActivities => &self.adventure_activities,
            CollectionField::Experiences => &self.experiences,
            CollectionField::ImportantFactors => &self.important_factors,
        }
    }

    pub fn selection_mut(&mut self, collection: CollectionField) -> &mut SelectionSet {
        match collection {
            CollectionField::AdventureActivities => &mut self.adventure_activities,
            CollectionField::Experiences => &mut self.experiences,
            CollectionField::ImportantFactors => &mut self.important_factors,
        }
    }

    /// Stores the traveller count from raw input. Blank or non-numeric input
    /// falls back to 1; numbers below 1 are kept so validation reports them.
    pub fn set_number_of_travelers(&mut self, raw: &str) {
        self.number_of_travelers = raw.trim().parse::<i64>().unwrap_or(1);
    }

    /// Renders a field for review screens.
    pub fn display_value(&self, field: DraftField) -> String {
        match field {
            DraftField::NumberOfTravelers => self.number_of_travelers.to_string(),
            DraftField::AdventureActivities
            | DraftField::Experiences
            | DraftField::ImportantFactors => {
                let set = field
                    .as_collection()
                    .map(|collection| self.selection(collection).iter().collect::<Vec<_>>())
                    .unwrap_or_default();
                set.join(", ")
            }
            DraftField::TravelStyle => self.travel_style.clone(),
            DraftField::TravelerAges => self.traveler_ages.clone(),
            DraftField::TravelDates => self.travel_dates.clone(),
            DraftField::ArrivalCity => self.arrival_city.clone(),
            DraftField::DepartureCity => self.departure_city.clone(),
            DraftField::Accommodation => self.accommodation.clone(),
            DraftField::Budget => self.budget.clone(),
            DraftField::DesiredExperiences => self.desired_experiences.clone(),
            DraftField::Transportation => self.transportation.clone(),
            DraftField::ImportantCriteria => self.important_criteria.clone(),
            DraftField::FullName => self.full_name.clone(),
            DraftField::Email => self.email.clone(),
            DraftField::CountryCode => self.country_code.clone(),
            DraftField::Phone => self.phone.clone(),
            DraftField::ExtraDetails => self.extra_details.clone(),
        }
    }

    /// Phone number as sent to the booking endpoint.
    pub fn combined_phone(&self, with_country_code: bool) -> String {
        let phone = self.phone.trim();
        let code = self.country_code.trim();
        if with_country_code && !code.is_empty() {
            format!("{code} {phone}")
        } else {
            phone.to_string()
        }
    }
}
