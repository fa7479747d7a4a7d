use std::fmt;
use std::sync::Arc;

use chrono::{
    Datelike,
    NaiveDate,
    TimeDelta,
    Weekday
};

use crate::time::easter::EasterType;
use crate::time::holiday::holiday::Holiday;
use crate::time::utility::{
    weekday_n,
    weekday_n_from
};

/// Irregular rule evaluated by a user supplied function of `(holiday, year)`.
pub type CustomRuleFn = Arc<dyn Fn(&Holiday, i32) -> Option<NaiveDate> + Send + Sync>;

/// The strategy used to compute the base occurrence of a holiday in a year.
///
/// Every strategy reports `None` instead of panicking when its parameters do
/// not describe a real date (month 13, 31 June, weekday offset 0).
#[derive(Clone)]
pub enum HolidayRule {
    /// The same day every year, e.g. 4 July.
    DayOfMonth {
        month: u32,
        day: u32
    },
    /// The nth weekday of a month, counted from the end of the month when
    /// `offset` is negative.
    WeekdayOffset {
        month: u32,
        weekday: Weekday,
        offset: i32
    },
    /// The nth weekday counted from an anchor day, the anchor included.
    WeekdayFrom {
        month: u32,
        day: u32,
        weekday: Weekday,
        offset: i32
    },
    /// A fixed number of days from Easter Sunday.
    EasterOffset {
        easter_type: EasterType,
        offset: i32
    },
    Custom(CustomRuleFn)
}

impl HolidayRule {
    pub fn day_of_month(month: u32, day: u32) -> HolidayRule {
        HolidayRule::DayOfMonth { month, day }
    }

    pub fn weekday_offset(month: u32, weekday: Weekday, offset: i32) -> HolidayRule {
        HolidayRule::WeekdayOffset { month, weekday, offset }
    }

    pub fn weekday_from(month: u32, day: u32, weekday: Weekday, offset: i32) -> HolidayRule {
        HolidayRule::WeekdayFrom { month, day, weekday, offset }
    }

    pub fn easter_offset(easter_type: EasterType, offset: i32) -> HolidayRule {
        HolidayRule::EasterOffset { easter_type, offset }
    }

    pub fn custom<F>(f: F) -> HolidayRule
    where
        F: Fn(&Holiday, i32) -> Option<NaiveDate> + Send + Sync + 'static {
        HolidayRule::Custom(Arc::new(f))
    }

    pub fn evaluate(&self, holiday: &Holiday, year: i32) -> Option<NaiveDate> {
        match self {
            HolidayRule::DayOfMonth { month, day } => {
                NaiveDate::from_ymd_opt(year, *month, *day)
            },
            HolidayRule::WeekdayOffset { month, weekday, offset } => {
                weekday_n(year, *month, *weekday, *offset)
            },
            HolidayRule::WeekdayFrom { month, day, weekday, offset } => {
                let anchor = NaiveDate::from_ymd_opt(year, *month, *day)?;
                weekday_n_from(anchor, *weekday, *offset)
            },
            HolidayRule::EasterOffset { easter_type, offset } => {
                let easter = easter_type.easter(year)?;
                easter.checked_add_signed(TimeDelta::try_days(*offset as i64)?)
            },
            HolidayRule::Custom(f) => f(holiday, year)
        }
    }
}

impl fmt::Debug for HolidayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayRule::DayOfMonth { month, day } => f
                .debug_struct("DayOfMonth")
                .field("month", month)
                .field("day", day)
                .finish(),
            HolidayRule::WeekdayOffset { month, weekday, offset } => f
                .debug_struct("WeekdayOffset")
                .field("month", month)
                .field("weekday", weekday)
                .field("offset", offset)
                .finish(),
            HolidayRule::WeekdayFrom { month, day, weekday, offset } => f
                .debug_struct("WeekdayFrom")
                .field("month", month)
                .field("day", day)
                .field("weekday", weekday)
                .field("offset", offset)
                .finish(),
            HolidayRule::EasterOffset { easter_type, offset } => f
                .debug_struct("EasterOffset")
                .field("easter_type", easter_type)
                .field("offset", offset)
                .finish(),
            HolidayRule::Custom(_) => f.write_str("Custom(..)")
        }
    }
}

/// Follows `base`, except in the years of `replacements` where the holiday
/// falls on the listed date instead.
///
/// Building block for rules that were rescheduled by decree in a handful of
/// years, such as a bank holiday moved for a jubilee.
pub fn moved_in_years(
    base: HolidayRule,
    replacements: Vec<NaiveDate>
) -> HolidayRule {
    HolidayRule::custom(move |holiday, year| {
        match replacements.iter().find(|d| d.year() == year) {
            Some(d) => Some(*d),
            None => base.evaluate(holiday, year)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn eval(rule: HolidayRule, year: i32) -> Option<NaiveDate> {
        let holiday = Holiday::new("test").with_rule(rule.clone());
        rule.evaluate(&holiday, year)
    }

    #[test]
    fn day_of_month_is_the_same_every_year() {
        for year in 2015..=2020 {
            assert_eq!(eval(HolidayRule::day_of_month(6, 20), year), Some(ymd(year, 6, 20)));
        }
    }

    #[test]
    fn day_of_month_rejects_invalid_dates() {
        assert_eq!(eval(HolidayRule::day_of_month(13, 1), 2020), None);
        assert_eq!(eval(HolidayRule::day_of_month(6, 31), 2020), None);
        assert_eq!(eval(HolidayRule::day_of_month(2, 29), 2021), None);
        assert_eq!(eval(HolidayRule::day_of_month(2, 29), 2020), Some(ymd(2020, 2, 29)));
    }

    #[test]
    fn weekday_offset_table() {
        let cases = [
            (1, Some(ymd(2015, 6, 2))),
            (2, Some(ymd(2015, 6, 9))),
            (3, Some(ymd(2015, 6, 16))),
            (4, Some(ymd(2015, 6, 23))),
            (5, Some(ymd(2015, 6, 30))),
            (0, None),
            (-1, Some(ymd(2015, 6, 30))),
            (-2, Some(ymd(2015, 6, 23))),
            (-3, Some(ymd(2015, 6, 16))),
            (-4, Some(ymd(2015, 6, 9))),
            (-5, Some(ymd(2015, 6, 2))),
        ];
        for (offset, want) in cases {
            let rule = HolidayRule::weekday_offset(6, Weekday::Tue, offset);
            assert_eq!(eval(rule, 2015), want, "offset = {offset}");
        }
    }

    #[test]
    fn weekday_from_table() {
        let cases = [
            (1, Some(ymd(2015, 6, 16))),
            (2, Some(ymd(2015, 6, 23))),
            (3, Some(ymd(2015, 6, 30))),
            (4, Some(ymd(2015, 7, 7))),
            (5, Some(ymd(2015, 7, 14))),
            (0, None),
            (-1, Some(ymd(2015, 6, 9))),
            (-2, Some(ymd(2015, 6, 2))),
            (-3, Some(ymd(2015, 5, 26))),
            (-4, Some(ymd(2015, 5, 19))),
            (-5, Some(ymd(2015, 5, 12))),
        ];
        for (offset, want) in cases {
            let rule = HolidayRule::weekday_from(6, 15, Weekday::Tue, offset);
            assert_eq!(eval(rule, 2015), want, "offset = {offset}");
        }
    }

    #[test]
    fn easter_offset_table() {
        let cases = [
            (2015, 0, EasterType::Western, ymd(2015, 4, 5)),
            (2016, 10, EasterType::Western, ymd(2016, 4, 6)),
            (2017, -10, EasterType::Western, ymd(2017, 4, 6)),
            (2015, 0, EasterType::Orthodox, ymd(2015, 4, 12)),
            (2016, 10, EasterType::Orthodox, ymd(2016, 5, 11)),
            (2017, -10, EasterType::Orthodox, ymd(2017, 4, 6)),
        ];
        for (year, offset, easter_type, want) in cases {
            let rule = HolidayRule::easter_offset(easter_type, offset);
            assert_eq!(eval(rule, year), Some(want), "{year} {offset} {easter_type:?}");
        }
    }

    #[test]
    fn custom_rule_sees_the_holiday() {
        let rule = HolidayRule::custom(|h, year| {
            if h.name() == "odd years" && year % 2 == 1 {
                NaiveDate::from_ymd_opt(year, 3, 1)
            } else {
                None
            }
        });
        let holiday = Holiday::new("odd years").with_rule(rule.clone());
        assert_eq!(rule.evaluate(&holiday, 2021), Some(ymd(2021, 3, 1)));
        assert_eq!(rule.evaluate(&holiday, 2022), None);
        assert_eq!(format!("{rule:?}"), "Custom(..)");
    }

    #[test]
    fn moved_in_years_replaces_only_listed_years() {
        let rule = moved_in_years(
            HolidayRule::weekday_offset(5, Weekday::Mon, -1),
            vec![ymd(2012, 6, 4), ymd(2022, 6, 2)]
        );
        assert_eq!(eval(rule.clone(), 2012), Some(ymd(2012, 6, 4)));
        assert_eq!(eval(rule.clone(), 2022), Some(ymd(2022, 6, 2)));
        assert_eq!(eval(rule, 2021), Some(ymd(2021, 5, 31)));
    }
}
