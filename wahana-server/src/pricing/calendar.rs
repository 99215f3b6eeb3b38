//! Calendar date classification

use chrono::{Datelike, NaiveDate, Weekday};
use shared::models::{DateClass, OverrideKind};

/// Classify a visit date
///
/// Priority: explicit override, then weekly closure, then weekend, then
/// regular. `closed_weekdays` uses 0 = Monday .. 6 = Sunday.
pub fn classify(date: NaiveDate, override_kind: Option<OverrideKind>, closed_weekdays: &[u32]) -> DateClass {
    match override_kind {
        Some(OverrideKind::Closed) => return DateClass::Closed,
        Some(OverrideKind::HighSeason) => return DateClass::HighSeason,
        None => {}
    }

    let weekday = date.weekday().num_days_from_monday();
    if closed_weekdays.contains(&weekday) {
        return DateClass::Closed;
    }

    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DateClass::Weekend,
        _ => DateClass::Regular,
    }
}
