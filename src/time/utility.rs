use chrono::{
    DateTime,
    Datelike,
    LocalResult,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    TimeDelta,
    TimeZone,
    Weekday
};
use chrono_tz::Tz;

#[inline]
pub const fn is_leap (year: i32) -> bool {
    ((year % 4 == 0) && (year % 100!= 0)) || (year % 400 == 0)
}

pub const fn days_of_month (year: i32, month: u32) -> u32 {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if month == 0 || month > 12 {
        return 0;
    }

    if is_leap(year) {
        LEAP_EOM[month as usize]
    } else {
        NO_LEAP_EOM[month as usize]
    }
}

#[inline]
pub fn is_weekend (d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn month_first_day (year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn month_last_day (year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, days_of_month(year, month))
}

/// Reports the nth occurrence of `weekday` counting from `d`.
///
/// `d` itself counts as an occurrence, so `n == 1` (or `-1`) returns `d`
/// unchanged when it already falls on `weekday`.
///
/// - `n > 0`: count forwards.
/// - `n == 0`: no result.
/// - `n < 0`: count backwards.
pub fn weekday_n_from (d: NaiveDate, weekday: Weekday, n: i32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }

    let forward = (weekday.num_days_from_monday() as i64
                   - d.weekday().num_days_from_monday() as i64).rem_euclid(7);
    let n = n as i64;
    let shift_days = if forward == 0 {
        if n > 0 { (n - 1) * 7 } else { (n + 1) * 7 }
    } else if n > 0 {
        forward + (n - 1) * 7
    } else {
        forward + n * 7
    };

    d.checked_add_signed(TimeDelta::try_days(shift_days)?)
}

/// Reports the nth occurrence of `weekday` in the given month, counted from
/// the first day of the month for `n > 0` and from the last day for `n < 0`.
///
/// Counting carries on into the following (or preceding) months when `n`
/// exceeds the occurrences available in the month itself.
pub fn weekday_n (year: i32, month: u32, weekday: Weekday, n: i32) -> Option<NaiveDate> {
    if n > 0 {
        weekday_n_from(month_first_day(year, month)?, weekday, n)
    } else if n < 0 {
        weekday_n_from(month_last_day(year, month)?, weekday, n)
    } else {
        None
    }
}

/// Reports whether `d` is the nth occurrence of `weekday` within its own month.
pub fn is_weekday_n (d: NaiveDate, weekday: Weekday, n: i32) -> bool {
    if n == 0 || d.weekday() != weekday {
        return false;
    }

    if n > 0 {
        return (d.day0() / 7) as i64 == (n - 1) as i64;
    }

    weekday_n(d.year(), d.month(), weekday, n) == Some(d)
}

/// Resolves a local date and time at `location`.
///
/// Ambiguous local times resolve to the earliest instant. Local times inside a
/// DST gap resolve to the first valid instant after the gap.
pub fn localize (location: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match location.from_local_datetime(&naive) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=8).find_map(|quarter| {
            let shifted = naive.checked_add_signed(TimeDelta::minutes(15 * quarter))?;
            location.from_local_datetime(&shifted).earliest()
        })
    }
}

pub fn day_start (t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    localize(t.timezone(), t.date_naive().and_time(NaiveTime::MIN))
}

pub fn day_end (t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let last_nano = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?;
    localize(t.timezone(), t.date_naive().and_time(last_nano))
}

/// First day of the month of `t`, time of day unchanged.
pub fn month_start (t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let first = month_first_day(t.year(), t.month())?;
    localize(t.timezone(), first.and_time(t.time()))
}

/// Last day of the month of `t`, time of day unchanged.
pub fn month_end (t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let last = month_last_day(t.year(), t.month())?;
    localize(t.timezone(), last.and_time(t.time()))
}
