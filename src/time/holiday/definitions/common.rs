//! Feasts shared by many national calendars. Regional tables derive their
//! entries from these with [`Holiday::clone_with`].

use crate::time::easter::EasterType;
use crate::time::holiday::holiday::Holiday;
use crate::time::holiday::holidayrule::HolidayRule;

fn fixed(name: &str, month: u32, day: u32) -> Holiday {
    Holiday::new(name).with_rule(HolidayRule::day_of_month(month, day))
}

fn easter_based(name: &str, offset: i32) -> Holiday {
    Holiday::new(name).with_rule(HolidayRule::easter_offset(EasterType::Western, offset))
}

fn orthodox_easter_based(name: &str, offset: i32) -> Holiday {
    Holiday::new(name).with_rule(HolidayRule::easter_offset(EasterType::Orthodox, offset))
}

pub fn new_year() -> Holiday {
    fixed("New Year's Day", 1, 1)
}

pub fn epiphany() -> Holiday {
    fixed("Epiphany", 1, 6)
}

pub fn maundy_thursday() -> Holiday {
    easter_based("Maundy Thursday", -3)
}

pub fn good_friday() -> Holiday {
    easter_based("Good Friday", -2)
}

pub fn easter() -> Holiday {
    easter_based("Easter", 0)
}

pub fn easter_monday() -> Holiday {
    easter_based("Easter Monday", 1)
}

pub fn workers_day() -> Holiday {
    fixed("International Workers' Day", 5, 1)
}

pub fn ascension_day() -> Holiday {
    easter_based("Ascension Day", 39)
}

pub fn pentecost() -> Holiday {
    easter_based("Pentecost", 49)
}

pub fn pentecost_monday() -> Holiday {
    easter_based("Pentecost Monday", 50)
}

pub fn corpus_christi() -> Holiday {
    easter_based("Corpus Christi", 60)
}

pub fn assumption_of_mary() -> Holiday {
    fixed("Assumption of Mary", 8, 15)
}

pub fn all_saints_day() -> Holiday {
    fixed("All Saints' Day", 11, 1)
}

pub fn armistice_day() -> Holiday {
    fixed("Armistice Day", 11, 11)
}

pub fn immaculate_conception() -> Holiday {
    fixed("Immaculate Conception", 12, 8)
}

pub fn christmas_day() -> Holiday {
    fixed("Christmas Day", 12, 25)
}

pub fn christmas_day_2() -> Holiday {
    fixed("2nd Day of Christmas", 12, 26)
}

pub fn orthodox_good_friday() -> Holiday {
    orthodox_easter_based("Orthodox Good Friday", -2)
}

pub fn orthodox_easter() -> Holiday {
    orthodox_easter_based("Orthodox Easter", 0)
}

pub fn orthodox_easter_monday() -> Holiday {
    orthodox_easter_based("Orthodox Easter Monday", 1)
}

pub fn orthodox_pentecost() -> Holiday {
    orthodox_easter_based("Orthodox Pentecost", 49)
}

/// Every common feast, keyed by the name used in configuration files.
pub fn named_holidays() -> Vec<(&'static str, Holiday)> {
    vec![
        ("new_year", new_year()),
        ("epiphany", epiphany()),
        ("maundy_thursday", maundy_thursday()),
        ("good_friday", good_friday()),
        ("easter", easter()),
        ("easter_monday", easter_monday()),
        ("workers_day", workers_day()),
        ("ascension_day", ascension_day()),
        ("pentecost", pentecost()),
        ("pentecost_monday", pentecost_monday()),
        ("corpus_christi", corpus_christi()),
        ("assumption_of_mary", assumption_of_mary()),
        ("all_saints_day", all_saints_day()),
        ("armistice_day", armistice_day()),
        ("immaculate_conception", immaculate_conception()),
        ("christmas_day", christmas_day()),
        ("christmas_day_2", christmas_day_2()),
        ("orthodox_good_friday", orthodox_good_friday()),
        ("orthodox_easter", orthodox_easter()),
        ("orthodox_easter_monday", orthodox_easter_monday()),
        ("orthodox_pentecost", orthodox_pentecost())
    ]
}
