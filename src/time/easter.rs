use chrono::{
    Days,
    NaiveDate
};
use serde::{
    Deserialize,
    Serialize
};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum EasterType {
    Western,
    Orthodox
}

impl EasterType {
    pub fn easter(&self, year: i32) -> Option<NaiveDate> {
        match self {
            EasterType::Western => calculate_easter(year),
            EasterType::Orthodox => calculate_julian_easter(year)
        }
    }
}

/// Gregorian Easter Sunday (Meeus/Jones/Butcher).
///
/// Returns `None` for years that do not produce a representable date
/// (non-positive years).
pub fn calculate_easter(year: i32) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;

    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Orthodox Easter Sunday (Meeus' Julian algorithm), expressed as a date on
/// the Gregorian civil calendar.
pub fn calculate_julian_easter(year: i32) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }

    let a = year % 4;
    let b = year % 7;
    let c = year % 19;
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34) % 7;

    let month = (d + e + 114) / 31;
    let day = (d + e + 114) % 31 + 1;
    let julian = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?;

    // Easter never precedes March, so the drift of the current Julian year applies.
    let drift = year / 100 - year / 400 - 2;
    julian.checked_add_days(Days::new(drift.max(0) as u64))
}
