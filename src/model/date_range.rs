use chrono::NaiveDate;

/// Format used by the picker and the input fields.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// The selected range, held as the formatted strings the pickers emit.
///
/// Either side may be empty until the user picks a date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRangeState {
    pub from: String,
    pub to: String,
}

impl DateRangeState {
    pub fn set_from(&mut self, date: impl Into<String>) {
        self.from = date.into();
        log::debug!("from date set to {:?}", self.from);
    }

    pub fn set_to(&mut self, date: impl Into<String>) {
        self.to = date.into();
        log::debug!("to date set to {:?}", self.to);
    }

    /// Both ends parsed, or `None` if either is absent or unreadable.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((parse_date(&self.from)?, parse_date(&self.to)?))
    }
}

/// Parse an `MM/DD/YYYY` string. Empty input is treated as absent.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Reassemble a `month/day/year` string for display.
pub fn format_date(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let mut parts = s.split('/');
    let month = parts.next().unwrap_or_default();
    let day = parts.next().unwrap_or_default();
    let year = parts.next().unwrap_or_default();
    format!("{}/{}/{}", month, day, year)
}

/// Every calendar day from `start` to `end`, inclusive.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}
