use chrono::{Datelike, Local, Month};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalendarEntry {
    pub month: Month,
    pub activities: &'static [&'static str],
    pub crops: &'static [&'static str],
}

/// Ordered by month.
const CROP_CALENDAR: [CalendarEntry; 3] = [
    CalendarEntry {
        month: Month::March,
        activities: &["Harvest Rabi crops", "Prepare for summer crops"],
        crops: &["Summer vegetables", "Fodder crops"],
    },
    CalendarEntry {
        month: Month::June,
        activities: &[
            "Sow Kharif crops",
            "Prepare fields",
            "Apply basal fertilizer",
        ],
        crops: &["Rice", "Cotton", "Sugarcane"],
    },
    CalendarEntry {
        month: Month::November,
        activities: &[
            "Sow Rabi crops",
            "Harvest Kharif crops",
            "Prepare for winter",
        ],
        crops: &["Wheat", "Mustard", "Chickpea"],
    },
];

pub fn entries() -> &'static [CalendarEntry] {
    &CROP_CALENDAR
}

/// The entry in effect during `month`: the latest one starting at or before
/// it, wrapping to the previous year's last entry for January and February.
pub fn entry_for(month: Month) -> &'static CalendarEntry {
    let m = month.number_from_month();
    CROP_CALENDAR
        .iter()
        .rev()
        .find(|e| e.month.number_from_month() <= m)
        .unwrap_or(&CROP_CALENDAR[CROP_CALENDAR.len() - 1])
}

pub fn current_month() -> Month {
    month_from_number(Local::now().month()).unwrap_or(Month::January)
}

/// Accepts a month number (1-12) or an English month name or abbreviation.
pub fn parse_month(s: &str) -> Option<Month> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return month_from_number(n);
    }
    s.parse::<Month>().ok()
}

fn month_from_number(n: u32) -> Option<Month> {
    u8::try_from(n).ok().and_then(|n| Month::try_from(n).ok())
}
