use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draft::DraftField;

/// The four pages of the trip-planning wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    TravelStyle,
    WhenAndWhere,
    Preferences,
    Contact,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::TravelStyle,
        WizardStep::WhenAndWhere,
        WizardStep::Preferences,
        WizardStep::Contact,
    ];

    pub const FIRST: WizardStep = WizardStep::TravelStyle;
    pub const LAST: WizardStep = WizardStep::Contact;

    /// 1-based position shown to the traveller.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::TravelStyle => 1,
            WizardStep::WhenAndWhere => 2,
            WizardStep::Preferences => 3,
            WizardStep::Contact => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::TravelStyle => "Travel Style",
            WizardStep::WhenAndWhere => "When & Where",
            WizardStep::Preferences => "Preferences",
            WizardStep::Contact => "Contact",
        }
    }

    /// Following step, saturating at the last one.
    pub fn next(&self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    /// Preceding step, saturating at the first one.
    pub fn previous(&self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(Self::FIRST)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    /// Fields collected on this page, in display order.
    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            WizardStep::TravelStyle => &[
                DraftField::TravelStyle,
                DraftField::NumberOfTravelers,
                DraftField::TravelerAges,
            ],
            WizardStep::WhenAndWhere => &[
                DraftField::TravelDates,
                DraftField::ArrivalCity,
                DraftField::DepartureCity,
            ],
            WizardStep::Preferences => &[
                DraftField::Accommodation,
                DraftField::Budget,
                DraftField::AdventureActivities,
                DraftField::Experiences,
                DraftField::ImportantFactors,
                DraftField::DesiredExperiences,
                DraftField::Transportation,
                DraftField::ImportantCriteria,
            ],
            WizardStep::Contact => &[
                DraftField::FullName,
                DraftField::Email,
                DraftField::CountryCode,
                DraftField::Phone,
                DraftField::ExtraDetails,
            ],
        }
    }

    /// Page on which a field is collected.
    pub fn owning(field: DraftField) -> Self {
        Self::ALL
            .into_iter()
            .find(|step| step.fields().contains(&field))
            .unwrap_or(Self::LAST)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Self::ALL.len(), self.title())
    }
}

/// Progress marker for the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Upcoming,
}

/// Status of every step relative to the current one.
pub fn progress(current: WizardStep) -> Vec<(WizardStep, StepStatus)> {
    WizardStep::ALL
        .into_iter()
        .map(|step| {
            let status = match step.cmp(&current) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            };
            (step, status)
        })
        .collect()
}
