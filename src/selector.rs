//! Day selection
//!
//! Maps a calendar weekday (Monday = 0 … Sunday = 6) onto the plan by
//! wrapping modulo the number of day-entries, so any non-empty plan always
//! yields an entry. The weekday comes from the local wall clock.

use chrono::Weekday;

use crate::error::MailerError;
use crate::types::{DayEntry, WorkoutPlan};

/// Weekdays in selection order, Monday first
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Index into the plan for `weekday`
pub fn day_index(plan: &WorkoutPlan, weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize % plan.len()
}

/// Select the day-entry for `weekday`, with the index it was taken from
pub fn select_day(plan: &WorkoutPlan, weekday: Weekday) -> (usize, &DayEntry) {
    let index = day_index(plan, weekday);
    (index, &plan.days()[index])
}

/// Full English name of a weekday, as used in subject lines
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday given as a name (`monday`, `Mon`) or an index `0`-`6`
pub fn parse_weekday(value: &str) -> Result<Weekday, MailerError> {
    let trimmed = value.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        return WEEK
            .get(index)
            .copied()
            .ok_or_else(|| MailerError::InvalidWeekday(value.to_string()));
    }
    trimmed
        .parse::<Weekday>()
        .map_err(|_| MailerError::InvalidWeekday(value.to_string()))
}
