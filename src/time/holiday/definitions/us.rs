//! Federal holidays of the United States.
//!
//! Holidays on a Saturday are observed the Friday before, holidays on a Sunday
//! the Monday after.

use chrono::Weekday;

use crate::time::holiday::definitions::common;
use crate::time::holiday::holiday::{
    Holiday,
    HolidayOverride,
    ObservanceType
};
use crate::time::holiday::holidayrule::HolidayRule;
use crate::time::holiday::weekendadjustment::weekend_to_nearest;

fn nth_weekday(name: &str, month: u32, weekday: Weekday, n: i32) -> Holiday {
    Holiday::new(name)
        .with_observance(ObservanceType::Public)
        .with_rule(HolidayRule::weekday_offset(month, weekday, n))
}

fn fixed_observed(name: &str, month: u32, day: u32) -> Holiday {
    Holiday::new(name)
        .with_observance(ObservanceType::Public)
        .with_rule(HolidayRule::day_of_month(month, day))
        .with_observed(weekend_to_nearest())
}

pub fn new_year() -> Holiday {
    common::new_year().clone_with(
        &HolidayOverride::renamed("New Year's Day")
            .with_observance(ObservanceType::Public)
            .with_observed(weekend_to_nearest())
    )
}

pub fn mlk_day() -> Holiday {
    nth_weekday("Martin Luther King Jr. Day", 1, Weekday::Mon, 3)
}

pub fn presidents_day() -> Holiday {
    nth_weekday("Presidents' Day", 2, Weekday::Mon, 3)
}

pub fn memorial_day() -> Holiday {
    nth_weekday("Memorial Day", 5, Weekday::Mon, -1)
}

pub fn juneteenth() -> Holiday {
    fixed_observed("Juneteenth", 6, 19).with_start_year(2021)
}

pub fn independence_day() -> Holiday {
    fixed_observed("Independence Day", 7, 4)
}

pub fn labor_day() -> Holiday {
    nth_weekday("Labor Day", 9, Weekday::Mon, 1)
}

pub fn columbus_day() -> Holiday {
    nth_weekday("Columbus Day", 10, Weekday::Mon, 2)
}

pub fn veterans_day() -> Holiday {
    fixed_observed("Veterans Day", 11, 11)
}

pub fn thanksgiving_day() -> Holiday {
    nth_weekday("Thanksgiving Day", 11, Weekday::Thu, 4)
}

/// Not a federal holiday, but widely granted.
pub fn day_after_thanksgiving() -> Holiday {
    thanksgiving_day()
        .clone_with(&HolidayOverride::renamed("Day After Thanksgiving Day"))
        .with_calc_offset(1)
}

pub fn christmas_day() -> Holiday {
    common::christmas_day().clone_with(
        &HolidayOverride::renamed("Christmas Day")
            .with_observance(ObservanceType::Public)
            .with_observed(weekend_to_nearest())
    )
}

/// The standard federal holidays.
pub fn holidays() -> Vec<Holiday> {
    vec![
        new_year(),
        mlk_day(),
        presidents_day(),
        memorial_day(),
        juneteenth(),
        independence_day(),
        labor_day(),
        columbus_day(),
        veterans_day(),
        thanksgiving_day(),
        christmas_day()
    ]
}

/// Every holiday of the table, keyed by the name used in configuration files.
pub fn named_holidays() -> Vec<(&'static str, Holiday)> {
    vec![
        ("new_year", new_year()),
        ("mlk_day", mlk_day()),
        ("presidents_day", presidents_day()),
        ("memorial_day", memorial_day()),
        ("juneteenth", juneteenth()),
        ("independence_day", independence_day()),
        ("labor_day", labor_day()),
        ("columbus_day", columbus_day()),
        ("veterans_day", veterans_day()),
        ("thanksgiving_day", thanksgiving_day()),
        ("day_after_thanksgiving", day_after_thanksgiving()),
        ("christmas_day", christmas_day())
    ]
}
