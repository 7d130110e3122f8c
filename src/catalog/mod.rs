//! Option tables backing the wizard's choice fields.
//!
//! Every list a traveller picks from (travel styles, cities, accommodation
//! tiers, budget brackets, activity and experience catalogs, dialling codes)
//! is plain data held in a [`WizardConfig`]. The state machine only ever sees
//! catalog keys, so a different field set is a different table rather than a
//! code change. Two presets ship with the crate: [`WizardVariant::Current`]
//! and the older [`WizardVariant::Legacy`] layout.

mod presets;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::draft::CollectionField;
use crate::errors::PlannerError;
use crate::wizard::ValidationRules;

/// A single selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
            description: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered list of options. Lookups accept either the key or the label,
/// ignoring ASCII case and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Builds a catalog whose keys double as labels.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            keys.into_iter()
                .map(|key| {
                    let key = key.into();
                    CatalogEntry::new(key.clone(), key)
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Resolves user input to an entry. Exact key matches win over
    /// case-insensitive key or label matches.
    pub fn resolve(&self, input: &str) -> Option<&CatalogEntry> {
        let needle = input.trim();
        if needle.is_empty() {
            return None;
        }
        self.get(needle).or_else(|| {
            self.entries.iter().find(|entry| {
                entry.key.eq_ignore_ascii_case(needle) || entry.label.eq_ignore_ascii_case(needle)
            })
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Comma-separated keys without duplicates, for error messages.
    pub fn describe_options(&self) -> String {
        let mut seen: Vec<&str> = Vec::with_capacity(self.entries.len());
        for key in self.keys() {
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        seen.join(", ")
    }

    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map(|entry| entry.label.as_str()).unwrap_or(key)
    }
}

/// Named preset selecting catalogs and validation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardVariant {
    #[default]
    Current,
    Legacy,
}

impl WizardVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardVariant::Current => "current",
            WizardVariant::Legacy => "legacy",
        }
    }
}

/// Complete description of one wizard flavour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    pub variant: WizardVariant,
    pub travel_styles: Catalog,
    pub cities: Catalog,
    pub accommodations: Catalog,
    pub budgets: Catalog,
    pub adventure_activities: Catalog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Catalog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important_factors: Option<Catalog>,
    /// Dialling codes. `None` means the phone field is sent as typed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_codes: Option<Catalog>,
    /// Sends the free-text `transportation` and `importantCriteria` fields.
    #[serde(default)]
    pub collect_transportation: bool,
    #[serde(default)]
    pub rules: ValidationRules,
}

impl WizardConfig {
    pub fn current() -> Self {
        presets::current()
    }

    pub fn legacy() -> Self {
        presets::legacy()
    }

    pub fn for_variant(variant: WizardVariant) -> Self {
        match variant {
            WizardVariant::Current => Self::current(),
            WizardVariant::Legacy => Self::legacy(),
        }
    }

    /// Loads a custom table set from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, PlannerError> {
        let data = fs::read_to_string(path)?;
        let config: WizardConfig = serde_json::from_str(&data)?;
        config.check()?;
        Ok(config)
    }

    /// Rejects tables the wizard cannot be driven with.
    pub fn check(&self) -> Result<(), PlannerError> {
        let required = [
            ("travelStyles", &self.travel_styles),
            ("cities", &self.cities),
            ("accommodations", &self.accommodations),
            ("budgets", &self.budgets),
        ];
        for (name, catalog) in required {
            if catalog.is_empty() {
                return Err(PlannerError::Config(format!(
                    "catalog `{name}` must list at least one option"
                )));
            }
        }
        if let Some(codes) = &self.country_codes {
            if codes.is_empty() {
                return Err(PlannerError::Config(
                    "catalog `countryCodes` is present but empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Catalog backing a toggle collection, if this variant offers it.
    pub fn collection(&self, field: CollectionField) -> Option<&Catalog> {
        match field {
            CollectionField::AdventureActivities => Some(&self.adventure_activities),
            CollectionField::Experiences => self.experiences.as_ref(),
            CollectionField::ImportantFactors => self.important_factors.as_ref(),
        }
    }

    pub fn default_country_code(&self) -> Option<&str> {
        self.country_codes
            .as_ref()
            .and_then(|codes| codes.entries().first())
            .map(|entry| entry.key.as_str())
    }

    /// Looks up a catalog by the name used on the command line.
    pub fn catalog_by_name(&self, name: &str) -> Option<&Catalog> {
        let normalized: String = name
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "travelstyles" | "travelstyle" | "styles" => Some(&self.travel_styles),
            "cities" | "city" | "arrivalcity" | "departurecity" => Some(&self.cities),
            "accommodations" | "accommodation" => Some(&self.accommodations),
            "budgets" | "budget" => Some(&self.budgets),
            "adventureactivities" | "activities" => Some(&self.adventure_activities),
            "experiences" => self.experiences.as_ref(),
            "importantfactors" | "factors" => self.important_factors.as_ref(),
            "countrycodes" | "countrycode" | "codes" => self.country_codes.as_ref(),
            _ => None,
        }
    }

    /// Catalog names available for this variant, in display order.
    pub fn catalog_names(&self) -> Vec<&'static str> {
        let mut names = vec![
            "travelStyles",
            "cities",
            "accommodations",
            "budgets",
            "adventureActivities",
        ];
        if self.experiences.is_some() {
            names.push("experiences");
        }
        if self.important_factors.is_some() {
            names.push("importantFactors");
        }
        if self.country_codes.is_some() {
            names.push("countryCodes");
        }
        names
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self::current()
    }
}
