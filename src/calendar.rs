use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// A full calendar day, 00:00:00 through 23:59:59 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    pub fn for_day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + Duration::days(1) - Duration::seconds(1);
        Self { start, end }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn day_name(&self) -> String {
        self.start.format("%A").to_string()
    }
}

/// The two working days being planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWindows {
    pub tomorrow: DateWindow,
    pub day_after: DateWindow,
}

impl TargetWindows {
    pub fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.tomorrow.date(), self.day_after.date())
    }
}

/// Roll a Saturday or Sunday forward to the following Monday.
pub fn skip_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

pub fn resolve_target_dates(today: NaiveDate) -> TargetWindows {
    let tomorrow = skip_weekend(today + Duration::days(1));
    let mut day_after = skip_weekend(today + Duration::days(2));

    // Both days are rolled independently, so Friday and Saturday inputs collide on Monday.
    if day_after <= tomorrow {
        day_after = skip_weekend(tomorrow + Duration::days(1));
    }

    TargetWindows {
        tomorrow: DateWindow::for_day(tomorrow),
        day_after: DateWindow::for_day(day_after),
    }
}

/// Same as [`resolve_target_dates`] but takes a wall-clock instant and drops its time of day.
pub fn resolve_target_dates_at(now: NaiveDateTime) -> TargetWindows {
    resolve_target_dates(now.date())
}

pub fn parse_plan_date(value: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

/// Source of "today" for planning requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanClock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl PlanClock {
    pub fn today(&self) -> NaiveDate {
        match self {
            PlanClock::System => Local::now().date_naive(),
            PlanClock::Fixed(date) => *date,
        }
    }

    pub fn target_windows(&self) -> TargetWindows {
        resolve_target_dates(self.today())
    }
}
