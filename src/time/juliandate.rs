use chrono::{
    DateTime,
    Datelike,
    TimeZone,
    Timelike,
    Utc
};

const MODIFIED_JULIAN_EPOCH: f64 = 2_400_000.5;

/// Julian Day Number of `t`. Julian days begin at 12:00 UTC.
pub fn julian_day_number<T: TimeZone>(t: &DateTime<T>) -> i64 {
    // http://www.tondering.dk/claus/cal/julperiod.php#formula
    let utc = t.with_timezone(&Utc);
    let month = utc.month() as i64;
    let a = (14 - month) / 12;
    let y = utc.year() as i64 + 4800 - a;
    let m = month + 12 * a - 3;

    let jdn = utc.day() as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;
    if utc.hour() < 12 {
        jdn - 1
    } else {
        jdn
    }
}

/// Julian Date of `t`, including the time of day as a fraction.
pub fn julian_date<T: TimeZone>(t: &DateTime<T>) -> f64 {
    let utc = t.with_timezone(&Utc);
    let mut jdn = julian_day_number(&utc);
    if utc.hour() < 12 {
        jdn += 1;
    }

    jdn as f64
        + (utc.hour() as f64 - 12.0) / 24.0
        + utc.minute() as f64 / 1440.0
        + utc.second() as f64 / 86400.0
}

/// Modified Julian Date of `t`. Modified Julian days begin at 00:00 UTC.
pub fn modified_julian_date<T: TimeZone>(t: &DateTime<T>) -> f64 {
    julian_date(t) - MODIFIED_JULIAN_EPOCH
}

pub fn modified_julian_day_number<T: TimeZone>(t: &DateTime<T>) -> i64 {
    modified_julian_date(t).floor() as i64
}
