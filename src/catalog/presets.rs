use super::{Catalog, CatalogEntry, WizardConfig, WizardVariant};
use crate::wizard::ValidationRules;

const CITIES: &[(&str, &str)] = &[
    ("Marrakech", "🏵️"),
    ("Casablanca", "🌊"),
    ("Fes", "🕌"),
    ("Tangier", "⚓"),
    ("Agadir", "🏖️"),
];

const BUDGETS: &[(&str, &str)] = &[
    ("$500-$1000", "$500 - $1,000"),
    ("$1000-$2000", "$1,000 - $2,000"),
    ("$2000-$3500", "$2,000 - $3,500"),
    ("$3500+", "$3,500+"),
];

const ACTIVITIES: &[(&str, &str)] = &[
    ("Camel Trekking", "🐪"),
    ("Hiking", "🥾"),
    ("Surfing", "🏄"),
    ("Quad Biking", "🏍️"),
    ("Sandboarding", "🏂"),
    ("Hot Air Balloon", "🎈"),
    ("Cooking Class", "👨‍🍳"),
    ("Photography Tour", "📸"),
];

const EXPERIENCES: &[(&str, &str, &str)] = &[
    ("desert-camp", "Desert Camp", "A night under the stars in the Sahara"),
    ("medina-tour", "Medina Tour", "Guided walks through the old cities"),
    ("hammam-spa", "Hammam & Spa", "Traditional bath and wellness rituals"),
    ("berber-villages", "Berber Villages", "Meet Amazigh families in the Atlas"),
    ("atlas-mountains", "Atlas Mountains", "Valleys, passes and waterfalls"),
    ("coastal-escape", "Coastal Escape", "Essaouira winds and Atlantic beaches"),
];

const IMPORTANT_FACTORS: &[(&str, &str)] = &[
    ("authenticity", "Authenticity"),
    ("comfort", "Comfort"),
    ("safety", "Safety"),
    ("flexibility", "Flexibility"),
    ("local-guides", "Local Guides"),
    ("value-for-money", "Value for Money"),
];

/// Dialling codes offered next to the phone field, Morocco first.
pub(crate) const COUNTRY_CODES: &[(&str, &str)] = &[
    ("+212", "MA"),
    ("+1", "US"),
    ("+1", "CA"),
    ("+44", "GB"),
    ("+33", "FR"),
    ("+49", "DE"),
    ("+34", "ES"),
    ("+39", "IT"),
    ("+31", "NL"),
    ("+32", "BE"),
    ("+41", "CH"),
    ("+43", "AT"),
    ("+46", "SE"),
    ("+47", "NO"),
    ("+45", "DK"),
    ("+358", "FI"),
    ("+351", "PT"),
    ("+30", "GR"),
    ("+353", "IE"),
    ("+352", "LU"),
    ("+376", "AD"),
    ("+377", "MC"),
    ("+61", "AU"),
    ("+64", "NZ"),
    ("+81", "JP"),
    ("+82", "KR"),
    ("+86", "CN"),
    ("+91", "IN"),
    ("+65", "SG"),
    ("+852", "HK"),
    ("+971", "AE"),
    ("+966", "SA"),
    ("+974", "QA"),
    ("+965", "KW"),
    ("+973", "BH"),
    ("+968", "OM"),
    ("+20", "EG"),
    ("+213", "DZ"),
    ("+216", "TN"),
    ("+218", "LY"),
    ("+249", "SD"),
    ("+961", "LB"),
    ("+962", "JO"),
    ("+972", "IL"),
    ("+970", "PS"),
    ("+90", "TR"),
    ("+55", "BR"),
    ("+52", "MX"),
    ("+54", "AR"),
    ("+56", "CL"),
    ("+57", "CO"),
    ("+51", "PE"),
    ("+27", "ZA"),
    ("+234", "NG"),
    ("+254", "KE"),
    ("+250", "RW"),
    ("+255", "TZ"),
    ("+251", "ET"),
    ("+233", "GH"),
    ("+221", "SN"),
    ("+225", "CI"),
];

fn travel_styles() -> Catalog {
    Catalog::new(vec![
        CatalogEntry::new("solo", "Solo").with_icon("🧳"),
        CatalogEntry::new("couple", "Couple").with_icon("💑"),
        CatalogEntry::new("family", "Family").with_icon("👨‍👩‍👧‍👦"),
        CatalogEntry::new("group", "Group").with_icon("👥"),
    ])
}

fn with_icons(pairs: &[(&str, &str)]) -> Catalog {
    Catalog::new(
        pairs
            .iter()
            .map(|(name, icon)| CatalogEntry::new(*name, *name).with_icon(*icon))
            .collect(),
    )
}

fn keyed(pairs: &[(&str, &str)]) -> Catalog {
    Catalog::new(
        pairs
            .iter()
            .map(|(key, label)| CatalogEntry::new(*key, *label))
            .collect(),
    )
}

pub(super) fn current() -> WizardConfig {
    WizardConfig {
        variant: WizardVariant::Current,
        travel_styles: travel_styles(),
        cities: with_icons(CITIES),
        accommodations: Catalog::new(vec![
            CatalogEntry::new("standard", "Standard").with_icon("🏨"),
            CatalogEntry::new("comfort", "Comfort").with_icon("🛏️"),
            CatalogEntry::new("luxury", "Luxury").with_icon("👑"),
        ]),
        budgets: keyed(BUDGETS),
        adventure_activities: with_icons(ACTIVITIES),
        experiences: Some(Catalog::new(
            EXPERIENCES
                .iter()
                .map(|(key, label, blurb)| CatalogEntry::new(*key, *label).with_description(*blurb))
                .collect(),
        )),
        important_factors: Some(keyed(IMPORTANT_FACTORS)),
        country_codes: Some(keyed(COUNTRY_CODES)),
        collect_transportation: false,
        rules: ValidationRules {
            require_desired_experiences: false,
        },
    }
}

pub(super) fn legacy() -> WizardConfig {
    WizardConfig {
        variant: WizardVariant::Legacy,
        travel_styles: travel_styles(),
        cities: with_icons(CITIES),
        accommodations: Catalog::new(vec![
            CatalogEntry::new("budget", "Budget").with_icon("🏕️"),
            CatalogEntry::new("standard", "Standard").with_icon("🏨"),
            CatalogEntry::new("luxury", "Luxury").with_icon("👑"),
            CatalogEntry::new("mixed", "Mixed").with_icon("🎭"),
        ]),
        budgets: keyed(BUDGETS),
        adventure_activities: with_icons(ACTIVITIES),
        experiences: None,
        important_factors: None,
        country_codes: None,
        collect_transportation: true,
        rules: ValidationRules {
            require_desired_experiences: true,
        },
    }
}
