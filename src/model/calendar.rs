use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Empty,
    Day(u32),
}

/// The month currently displayed by a calendar picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    /// 1-based month.
    pub month: u32,
    pub year: i32,
}

impl CalendarMonth {
    /// Out-of-range months are clamped into 1..=12.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            month: month.clamp(1, 12),
            year,
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        match (self.first_day(), next.first_day()) {
            (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
            _ => 0,
        }
    }

    /// Weekday of day 1, Sunday = 0.
    pub fn leading_blanks(&self) -> u32 {
        self.first_day()
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Blank cells for the days before the 1st, then one cell per day.
    pub fn cells(&self) -> Vec<CalendarCell> {
        let blanks = (0..self.leading_blanks()).map(|_| CalendarCell::Empty);
        let days = (1..=self.days_in_month()).map(CalendarCell::Day);
        blanks.chain(days).collect()
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The `MM/DD/YYYY` string emitted when `day` is clicked.
    pub fn format_day(&self, day: u32) -> String {
        format!("{:02}/{:02}/{}", self.month, day, self.year)
    }
}

impl Default for CalendarMonth {
    fn default() -> Self {
        Self::current()
    }
}
