use std::fmt;

use chrono::NaiveDate;

use crate::errors::WizardError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const RANGE_SEPARATOR: &str = " to ";

const END_ONLY_PREFIX: &str = "to ";

/// A date range as picked from two date inputs, either side optional.
///
/// Encoded into the single `travelDates` string as `"<start> to <end>"`,
/// `"<start>"` when only the start is known, and `"to <end>"` when only the
/// end is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TravelDates {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TravelDates {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parses picker input; blank or `-` leaves that side unset.
    pub fn from_inputs(start: Option<&str>, end: Option<&str>) -> Result<Self, WizardError> {
        Ok(Self {
            start: parse_side(start)?,
            end: parse_side(end)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn encode(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!(
                "{}{}{}",
                start.format(DATE_FORMAT),
                RANGE_SEPARATOR,
                end.format(DATE_FORMAT)
            ),
            (Some(start), None) => start.format(DATE_FORMAT).to_string(),
            (None, Some(end)) => format!("{}{}", END_ONLY_PREFIX, end.format(DATE_FORMAT)),
            (None, None) => String::new(),
        }
    }

    /// Recovers the range from an encoded string. Returns `None` for free
    /// text that was not produced by [`TravelDates::encode`].
    pub fn decode(encoded: &str) -> Option<Self> {
        let trimmed = encoded.trim();
        if trimmed.is_empty() {
            return Some(Self::default());
        }
        if let Some((start, end)) = trimmed.split_once(RANGE_SEPARATOR) {
            return Some(Self {
                start: Some(parse_date(start)?),
                end: Some(parse_date(end)?),
            });
        }
        if let Some(end) = trimmed.strip_prefix(END_ONLY_PREFIX) {
            return Some(Self {
                start: None,
                end: Some(parse_date(end)?),
            });
        }
        parse_date(trimmed).map(|start| Self {
            start: Some(start),
            end: None,
        })
    }

    /// Number of nights between both ends, when both are known and ordered.
    pub fn nights(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_days()),
            _ => None,
        }
    }
}

impl fmt::Display for TravelDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn parse_side(raw: Option<&str>) -> Result<Option<NaiveDate>, WizardError> {
    match raw.map(str::trim) {
        None | Some("") | Some("-") => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| WizardError::InvalidDate(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn encodes_each_shape() {
        let full = TravelDates::new(Some(date(2025, 3, 15)), Some(date(2025, 3, 25)));
        assert_eq!(full.encode(), "2025-03-15 to 2025-03-25");
        let start_only = TravelDates::new(Some(date(2025, 3, 15)), None);
        assert_eq!(start_only.encode(), "2025-03-15");
        let end_only = TravelDates::new(None, Some(date(2025, 3, 25)));
        assert_eq!(end_only.encode(), "to 2025-03-25");
        assert_eq!(TravelDates::default().encode(), "");
    }

    #[test]
    fn decode_reads_back_encoded_ranges() {
        let end_only = TravelDates::new(None, Some(date(2025, 4, 2)));
        assert_eq!(TravelDates::decode(&end_only.encode()), Some(end_only));
        assert_eq!(
            TravelDates::decode("2025-03-15 to 2025-03-25").and_then(|d| d.nights()),
            Some(10)
        );
    }

    #[test]
    fn decode_leaves_free_text_alone() {
        assert_eq!(TravelDates::decode("Flexible, sometime in spring"), None);
        assert_eq!(TravelDates::decode("March 15 to March 25"), None);
    }

    #[test]
    fn from_inputs_rejects_malformed_dates() {
        assert_eq!(
            TravelDates::from_inputs(Some("15/03/2025"), None),
            Err(WizardError::InvalidDate("15/03/2025".into()))
        );
        let parsed = TravelDates::from_inputs(Some("-"), Some("2025-05-01")).expect("valid");
        assert_eq!(parsed.start, None);
        assert_eq!(parsed.end, Some(date(2025, 5, 1)));
    }
}
