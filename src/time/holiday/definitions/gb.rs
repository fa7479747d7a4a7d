//! Bank holidays of the United Kingdom (England and Wales unless noted).
//!
//! Holidays on a weekend are observed on the following Monday. Boxing Day
//! moves one day further when Christmas already took the Monday.

use chrono::{
    NaiveDate,
    Weekday
};

use crate::time::holiday::definitions::common;
use crate::time::holiday::holiday::{
    Holiday,
    HolidayOverride,
    ObservanceType
};
use crate::time::holiday::holidayrule::{
    HolidayRule,
    moved_in_years
};
use crate::time::holiday::weekendadjustment::{
    AltDay,
    weekend_to_monday
};

fn bank(holiday: Holiday, name: &str, observed: Vec<AltDay>) -> Holiday {
    holiday.clone_with(
        &HolidayOverride::renamed(name)
            .with_observance(ObservanceType::Bank)
            .with_observed(observed)
    )
}

fn last_monday(month: u32) -> HolidayRule {
    HolidayRule::weekday_offset(month, Weekday::Mon, -1)
}

// one-off holiday granted for a single year
fn special(name: &str, year: i32, month: u32, day: u32) -> Holiday {
    Holiday::new(name)
        .with_observance(ObservanceType::Bank)
        .with_rule(HolidayRule::day_of_month(month, day))
        .with_start_year(year)
        .with_end_year(year)
}

pub fn new_year() -> Holiday {
    bank(common::new_year(), "New Year's Day", weekend_to_monday())
}

pub fn good_friday() -> Holiday {
    bank(common::good_friday(), "Good Friday", Vec::new())
}

pub fn easter_monday() -> Holiday {
    bank(common::easter_monday(), "Easter Monday", Vec::new())
}

/// First Monday of May, moved to VE Day in 2020.
pub fn early_may() -> Holiday {
    Holiday::new("Early May")
        .with_observance(ObservanceType::Bank)
        .with_rule(HolidayRule::weekday_offset(5, Weekday::Mon, 1))
        .with_except_years(vec![2020])
}

pub fn ve_day() -> Holiday {
    special("VE Day", 2020, 5, 8)
}

/// Last Monday of May, moved to early June for the royal jubilees.
pub fn spring_holiday() -> Holiday {
    let moved = [(2002, 6, 4), (2012, 6, 4), (2022, 6, 2)]
        .into_iter()
        .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect();
    Holiday::new("Spring Bank Holiday")
        .with_observance(ObservanceType::Bank)
        .with_rule(moved_in_years(last_monday(5), moved))
}

pub fn golden_jubilee() -> Holiday {
    special("Golden Jubilee", 2002, 6, 3)
}

pub fn diamond_jubilee() -> Holiday {
    special("Diamond Jubilee", 2012, 6, 5)
}

pub fn platinum_jubilee() -> Holiday {
    special("Platinum Jubilee", 2022, 6, 3)
}

pub fn state_funeral() -> Holiday {
    special("State Funeral of Queen Elizabeth II", 2022, 9, 19)
}

pub fn coronation() -> Holiday {
    special("Coronation of King Charles III", 2023, 5, 8)
}

pub fn summer_holiday() -> Holiday {
    Holiday::new("Summer Bank Holiday")
        .with_observance(ObservanceType::Bank)
        .with_rule(last_monday(8))
}

/// Scotland takes the summer bank holiday on the first Monday of August.
pub fn summer_holiday_scotland() -> Holiday {
    Holiday::new("Summer Bank Holiday")
        .with_observance(ObservanceType::Bank)
        .with_rule(HolidayRule::weekday_offset(8, Weekday::Mon, 1))
}

pub fn christmas_day() -> Holiday {
    bank(common::christmas_day(), "Christmas Day", weekend_to_monday())
}

pub fn boxing_day() -> Holiday {
    bank(
        common::christmas_day_2(),
        "Boxing Day",
        vec![
            AltDay::new(Weekday::Sat, 2),
            AltDay::new(Weekday::Sun, 2),
            AltDay::new(Weekday::Mon, 1)
        ]
    )
}

/// The standard bank holidays of England and Wales.
pub fn holidays() -> Vec<Holiday> {
    vec![
        new_year(),
        good_friday(),
        easter_monday(),
        early_may(),
        ve_day(),
        spring_holiday(),
        golden_jubilee(),
        diamond_jubilee(),
        platinum_jubilee(),
        state_funeral(),
        coronation(),
        summer_holiday(),
        christmas_day(),
        boxing_day()
    ]
}

/// Every holiday of the table, keyed by the name used in configuration files.
pub fn named_holidays() -> Vec<(&'static str, Holiday)> {
    vec![
        ("new_year", new_year()),
        ("good_friday", good_friday()),
        ("easter_monday", easter_monday()),
        ("early_may", early_may()),
        ("ve_day", ve_day()),
        ("spring_holiday", spring_holiday()),
        ("golden_jubilee", golden_jubilee()),
        ("diamond_jubilee", diamond_jubilee()),
        ("platinum_jubilee", platinum_jubilee()),
        ("state_funeral", state_funeral()),
        ("coronation", coronation()),
        ("summer_holiday", summer_holiday()),
        ("summer_holiday_scotland", summer_holiday_scotland()),
        ("christmas_day", christmas_day()),
        ("boxing_day", boxing_day())
    ]
}
